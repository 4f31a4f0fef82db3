use crate::bezier::ControlPolygon;
use crate::error::SimError;
use crate::point::Point2;
use crate::spring::SpringParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Simulation options, as read from a JSON config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    /// `None` means synthetic unless a rate source is available
    pub use_synthetic_motion: Option<bool>,
    pub step_size: f64,
    pub stiffness: f64,
    pub damping: f64,
    pub sensitivity: f64,
    pub offset_clamp: f64,
    /// One tick is one integration step regardless of the wall-clock delta
    pub fixed_timestep: bool,
    /// Frame rate whose interval counts as one step when `fixed_timestep` is off
    pub reference_fps: f64,
    /// Keep a touched target until the next touch, a release or the timeout
    pub hold_override: bool,
    pub override_timeout: Option<f64>,
    pub control_points: ControlPolygon,
    /// Base points for rate integration; defaults to the initial P1 and P2
    pub rate_base: Option<[Point2; 2]>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            use_synthetic_motion: None,
            step_size: 0.02,
            stiffness: 0.1,
            damping: 0.8,
            sensitivity: 50.0,
            offset_clamp: 150.0,
            fixed_timestep: true,
            reference_fps: 60.0,
            hold_override: true,
            override_timeout: None,
            control_points: ControlPolygon::default(),
            rate_base: None,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn spring_params(&self) -> SpringParams {
        SpringParams::new(self.stiffness, self.damping)
    }

    pub fn rate_base(&self) -> [Point2; 2] {
        self.rate_base
            .unwrap_or([self.control_points.p1, self.control_points.p2])
    }

    pub fn validate(&self) -> Result<(), SimError> {
        positive("stepSize", self.step_size)?;
        positive("referenceFps", self.reference_fps)?;
        non_negative("stiffness", self.stiffness)?;
        non_negative("damping", self.damping)?;
        non_negative("sensitivity", self.sensitivity)?;
        non_negative("offsetClamp", self.offset_clamp)?;
        if let Some(timeout) = self.override_timeout {
            non_negative("overrideTimeout", timeout)?;
        }

        let rate_base = self.rate_base.unwrap_or_default();
        let points = self
            .control_points
            .points()
            .into_iter()
            .chain(rate_base);
        for (index, point) in points.enumerate() {
            if !point.is_finite() {
                return Err(SimError::NonFiniteControlPoint { index });
            }
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), SimError> {
    if !value.is_finite() {
        return Err(SimError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(SimError::invalid(name, value, "must be greater than zero"));
    }
    Ok(())
}

fn non_negative(name: &'static str, value: f64) -> Result<(), SimError> {
    if !value.is_finite() {
        return Err(SimError::invalid(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(SimError::invalid(name, value, "must not be negative"));
    }
    Ok(())
}

/// One angular-rate reading, timestamped in seconds since the session start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSample {
    pub time: f64,
    pub rate_x: f64,
    pub rate_y: f64,
}

/// Load a recorded rate trace (JSON array of samples), sorted by time
pub fn load_rate_trace(path: &Path) -> Result<Vec<RateSample>, SimError> {
    let json = std::fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut samples: Vec<RateSample> = serde_json::from_str(&json)?;
    samples.sort_by(|a, b| a.time.total_cmp(&b.time));
    Ok(samples)
}

/// Pointer input at `time`; `location == None` lifts the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub time: f64,
    pub location: Option<Point2>,
}

impl FromStr for TouchEvent {
    type Err = SimError;

    /// Accepts `X,Y@SECONDS` or `up@SECONDS`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SimError::InvalidTouch(s.to_string());
        let (what, time) = s.trim().split_once('@').ok_or_else(invalid)?;
        let time: f64 = time.trim().parse().map_err(|_| invalid())?;
        if !time.is_finite() {
            return Err(invalid());
        }

        if what.trim().eq_ignore_ascii_case("up") {
            return Ok(TouchEvent {
                time,
                location: None,
            });
        }

        let (x, y) = what.split_once(',').ok_or_else(invalid)?;
        let x: f64 = x.trim().parse().map_err(|_| invalid())?;
        let y: f64 = y.trim().parse().map_err(|_| invalid())?;
        let location = Point2::new(x, y);
        if !location.is_finite() {
            return Err(invalid());
        }
        Ok(TouchEvent {
            time,
            location: Some(location),
        })
    }
}

/// Colors and stroke widths used by the frame renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderStyle {
    pub background: String,
    pub curve_color: String,
    pub curve_width: f64,
    pub control_point_color: String,
    pub control_point_radius: f64,
    pub polygon_color: String,
    pub polygon_width: f64,
    pub tangent_color: String,
    pub tangent_length: f64,
    pub target_color: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            curve_color: "#007aff".to_string(),
            curve_width: 3.0,
            control_point_color: "#ff3b30".to_string(),
            control_point_radius: 5.0,
            polygon_color: "#8e8e93".to_string(),
            polygon_width: 1.0,
            tangent_color: "#34c759".to_string(),
            tangent_length: 40.0,
            target_color: "#ff9500".to_string(),
        }
    }
}

/// Bounds of a rendered frame in simulation coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}
