//! Target policy: where the two tracked points are driven each tick.
//!
//! Targets come either from a closed-form oscillator of time or from an
//! integrated angular-rate signal. A pointer touch can override the target of
//! whichever tracked point is nearer to it.

use crate::math_utils::clamp_symmetric;
use crate::point::Point2;
use serde::Serialize;

/// How much of the offset is mirrored onto the second tracked point
const SECOND_POINT_OFFSET_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MotionMode {
    Synthetic,
    RateIntegration,
}

impl MotionMode {
    /// Pick the mode for a session. Without a rate source the result is always
    /// synthetic, whatever was requested.
    pub fn resolve(use_synthetic_motion: Option<bool>, rate_source_available: bool) -> Self {
        if !rate_source_available {
            return MotionMode::Synthetic;
        }
        match use_synthetic_motion {
            Some(true) => MotionMode::Synthetic,
            Some(false) | None => MotionMode::RateIntegration,
        }
    }
}

/// Oscillator targets for wall-clock `time` in seconds
pub fn synthetic_targets(time: f64) -> [Point2; 2] {
    [
        Point2::new(time.sin() * 100.0 + 200.0, (0.7 * time).cos() * 100.0 + 400.0),
        Point2::new(
            (1.3 * time).sin() * 120.0 + 200.0,
            (0.9 * time).cos() * 80.0 + 400.0,
        ),
    ]
}

/// Accumulated, clamped integral of angular-rate samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateIntegrator {
    offset_x: f64,
    offset_y: f64,
    sensitivity: f64,
    clamp: f64,
}

impl RateIntegrator {
    pub fn new(sensitivity: f64, clamp: f64) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            sensitivity,
            clamp: clamp.abs(),
        }
    }

    /// Rotation about the device Y axis moves the X offset and vice versa.
    /// Samples whose scaled delta is NaN (a NaN rate, or an infinite rate at
    /// zero sensitivity) are dropped.
    pub fn ingest(&mut self, rate_x: f64, rate_y: f64) {
        let delta_x = rate_y * self.sensitivity;
        let delta_y = rate_x * self.sensitivity;
        if delta_x.is_nan() || delta_y.is_nan() {
            return;
        }
        self.offset_x = clamp_symmetric(self.offset_x + delta_x, self.clamp);
        self.offset_y = clamp_symmetric(self.offset_y + delta_y, self.clamp);
    }

    pub fn offset(&self) -> Point2 {
        Point2::new(self.offset_x, self.offset_y)
    }

    pub fn targets(&self, base: [Point2; 2]) -> [Point2; 2] {
        let offset = self.offset();
        [
            base[0] + offset,
            base[1] - SECOND_POINT_OFFSET_FACTOR * offset,
        ]
    }
}

/// Mode plus whatever state that mode reads
#[derive(Debug, Clone, Copy)]
pub struct TargetPolicy {
    mode: MotionMode,
    integrator: RateIntegrator,
    base: [Point2; 2],
}

impl TargetPolicy {
    pub fn new(mode: MotionMode, integrator: RateIntegrator, base: [Point2; 2]) -> Self {
        Self {
            mode,
            integrator,
            base,
        }
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    pub fn integrator(&self) -> &RateIntegrator {
        &self.integrator
    }

    /// Samples are dropped in synthetic mode.
    pub fn ingest_rate(&mut self, rate_x: f64, rate_y: f64) {
        if self.mode == MotionMode::RateIntegration {
            self.integrator.ingest(rate_x, rate_y);
        }
    }

    pub fn targets(&self, time: f64) -> [Point2; 2] {
        match self.mode {
            MotionMode::Synthetic => synthetic_targets(time),
            MotionMode::RateIntegration => self.integrator.targets(self.base),
        }
    }
}

/// Index of the tracked point nearer to `location`; ties go to the first
pub fn nearer_index(points: [Point2; 2], location: Point2) -> usize {
    let first = points[0].distance(location);
    let second = points[1].distance(location);
    if second < first {
        1
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveOverride {
    target: Point2,
    /// Tick time at which the override was first applied
    since: Option<f64>,
}

/// Touch overrides for the two tracked points.
///
/// With `hold` set an override stays active until it is replaced by a newer
/// touch, released, or older than `timeout`. Without `hold` it lasts for the
/// tick that consumes it and the policy target wins again afterwards.
#[derive(Debug, Clone)]
pub struct TargetOverrides {
    slots: [Option<ActiveOverride>; 2],
    hold: bool,
    timeout: Option<f64>,
}

impl TargetOverrides {
    pub fn new(hold: bool, timeout: Option<f64>) -> Self {
        Self {
            slots: [None, None],
            hold,
            timeout,
        }
    }

    pub fn set(&mut self, index: usize, target: Point2) {
        self.slots[index] = Some(ActiveOverride {
            target,
            since: None,
        });
    }

    pub fn release(&mut self) {
        self.slots = [None, None];
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.slots[index].is_some()
    }

    /// Replace policy targets with active overrides, expiring timed-out ones first
    pub fn apply(&mut self, time: f64, targets: &mut [Point2; 2]) {
        let timeout = self.timeout;
        for (slot, target) in self.slots.iter_mut().zip(targets.iter_mut()) {
            let Some(active) = slot else { continue };
            let since = *active.since.get_or_insert(time);
            if timeout.is_some_and(|limit| time > since && time - since >= limit) {
                log::debug!("touch override expired after {:.3}s", time - since);
                *slot = None;
                continue;
            }
            *target = active.target;
        }
    }

    /// Called after integration; drops overrides that only last one tick
    pub fn end_tick(&mut self) {
        if !self.hold {
            self.slots = [None, None];
        }
    }
}
