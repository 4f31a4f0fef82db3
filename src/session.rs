//! Session-scoped simulation state and the per-frame tick.
//!
//! All external input (rate samples, touches) goes through a channel that the
//! session drains at the start of every tick, so the sensor callback may live
//! on another thread while the simulation state itself is never shared.

use crate::bezier::{ControlPolygon, TangentMark};
use crate::error::SimError;
use crate::models::SimConfig;
use crate::point::Point2;
use crate::spring::{SpringParams, SpringState};
use crate::target::{nearer_index, MotionMode, RateIntegrator, TargetOverrides, TargetPolicy};
use flume::{Receiver, Sender};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Rate { rate_x: f64, rate_y: f64 },
    Touch(Point2),
    Release,
}

/// Cloneable handle for feeding input into a [`Session`] from any thread
#[derive(Debug, Clone)]
pub struct InputSender {
    sender: Sender<Input>,
}

impl InputSender {
    pub fn send(&self, input: Input) -> Result<(), SimError> {
        self.sender.send(input).map_err(|_| SimError::SessionClosed)
    }

    pub fn rate(&self, rate_x: f64, rate_y: f64) -> Result<(), SimError> {
        self.send(Input::Rate { rate_x, rate_y })
    }

    pub fn touch(&self, location: Point2) -> Result<(), SimError> {
        self.send(Input::Touch(location))
    }

    pub fn release(&self) -> Result<(), SimError> {
        self.send(Input::Release)
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub polygon: ControlPolygon,
    pub curve: Vec<Point2>,
    pub tangents: Vec<TangentMark>,
    pub targets: [Point2; 2],
}

pub struct Session {
    endpoints: ControlPolygon,
    springs: [SpringState; 2],
    params: SpringParams,
    policy: TargetPolicy,
    overrides: TargetOverrides,
    step_size: f64,
    fixed_timestep: bool,
    reference_fps: f64,
    last_time: Option<f64>,
    ticks: u64,
    sender: Sender<Input>,
    receiver: Receiver<Input>,
}

impl Session {
    /// Build a session from a config. `rate_source_available` decides whether
    /// rate integration is possible at all.
    pub fn new(config: &SimConfig, rate_source_available: bool) -> Result<Self, SimError> {
        config.validate()?;

        let mode = MotionMode::resolve(config.use_synthetic_motion, rate_source_available);
        log::debug!("session motion mode: {mode:?}");

        let polygon = config.control_points;
        let policy = TargetPolicy::new(
            mode,
            RateIntegrator::new(config.sensitivity, config.offset_clamp),
            config.rate_base(),
        );
        let (sender, receiver) = flume::unbounded();

        Ok(Self {
            endpoints: polygon,
            springs: [
                SpringState::at_rest(polygon.p1),
                SpringState::at_rest(polygon.p2),
            ],
            params: config.spring_params(),
            policy,
            overrides: TargetOverrides::new(config.hold_override, config.override_timeout),
            step_size: config.step_size,
            fixed_timestep: config.fixed_timestep,
            reference_fps: config.reference_fps,
            last_time: None,
            ticks: 0,
            sender,
            receiver,
        })
    }

    pub fn input_sender(&self) -> InputSender {
        InputSender {
            sender: self.sender.clone(),
        }
    }

    pub fn mode(&self) -> MotionMode {
        self.policy.mode()
    }

    pub fn springs(&self) -> &[SpringState; 2] {
        &self.springs
    }

    pub fn rate_offset(&self) -> Point2 {
        self.policy.integrator().offset()
    }

    pub fn override_active(&self, index: usize) -> bool {
        self.overrides.is_active(index)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one frame at wall-clock `time` (seconds, monotonic):
    /// drain queued input, recompute targets, integrate both springs.
    pub fn tick(&mut self, time: f64) {
        self.drain_input();

        let mut targets = self.policy.targets(time);
        self.overrides.apply(time, &mut targets);

        let dt_units = self.timestep_units(time);
        for (spring, target) in self.springs.iter_mut().zip(targets) {
            spring.target = target;
            if self.fixed_timestep {
                spring.step(self.params);
            } else {
                spring.step_scaled(self.params, dt_units);
            }
        }

        self.overrides.end_tick();
        self.last_time = Some(time);
        self.ticks += 1;
        log::trace!(
            "tick {} t={time:.4} p1=({:.2}, {:.2}) p2=({:.2}, {:.2})",
            self.ticks,
            self.springs[0].position.x,
            self.springs[0].position.y,
            self.springs[1].position.x,
            self.springs[1].position.y,
        );
    }

    fn drain_input(&mut self) {
        while let Ok(input) = self.receiver.try_recv() {
            self.handle_input(input);
        }
    }

    fn handle_input(&mut self, input: Input) {
        match input {
            Input::Rate { rate_x, rate_y } => self.policy.ingest_rate(rate_x, rate_y),
            Input::Touch(location) => {
                let positions = [self.springs[0].position, self.springs[1].position];
                let index = nearer_index(positions, location);
                log::debug!(
                    "touch at ({:.1}, {:.1}) overrides tracked point P{}",
                    location.x,
                    location.y,
                    index + 1
                );
                self.springs[index].target = location;
                self.overrides.set(index, location);
            }
            Input::Release => {
                log::debug!("touch released");
                self.overrides.release();
            }
        }
    }

    /// Elapsed time since the previous tick in reference-frame units. The first
    /// tick counts as one unit; a clock that runs backwards counts as zero.
    fn timestep_units(&self, time: f64) -> f64 {
        match self.last_time {
            Some(last) => ((time - last) * self.reference_fps).max(0.0),
            None => 1.0,
        }
    }

    pub fn polygon(&self) -> ControlPolygon {
        self.endpoints
            .with_interior(self.springs[0].position, self.springs[1].position)
    }

    pub fn targets(&self) -> [Point2; 2] {
        [self.springs[0].target, self.springs[1].target]
    }

    /// Read-only render query for the current state
    pub fn render_frame(&self) -> RenderFrame {
        let polygon = self.polygon();
        RenderFrame {
            polygon,
            curve: polygon.sample(self.step_size),
            tangents: polygon.tangent_marks(),
            targets: self.targets(),
        }
    }
}
