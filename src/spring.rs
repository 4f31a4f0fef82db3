//! Discrete spring-damper integration for the tracked interior points.

use crate::point::Point2;
use serde::{Deserialize, Serialize};

/// Spring constants shared by both tracked points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringParams {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self { stiffness, damping }
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 0.1,
            damping: 0.8,
        }
    }
}

/// Position, velocity and target of one tracked control point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringState {
    pub position: Point2,
    pub velocity: Point2,
    pub target: Point2,
}

impl SpringState {
    /// At rest on its own target
    pub fn at_rest(position: Point2) -> Self {
        Self {
            position,
            velocity: Point2::ZERO,
            target: position,
        }
    }

    pub fn acceleration(&self, params: SpringParams) -> Point2 {
        params.stiffness * (self.target - self.position) - params.damping * self.velocity
    }

    /// One unit timestep of semi-implicit Euler:
    ///
    /// ```text
    /// a = k (target - x) - c v
    /// v = v + a
    /// x = x + v
    /// ```
    pub fn step(&mut self, params: SpringParams) {
        let acceleration = self.acceleration(params);
        self.velocity = self.velocity + acceleration;
        self.position = self.position + self.velocity;
    }

    /// Same update with the timestep measured in units of the reference frame
    /// interval. `dt_units == 1.0` is identical to [`SpringState::step`].
    pub fn step_scaled(&mut self, params: SpringParams, dt_units: f64) {
        let acceleration = self.acceleration(params);
        self.velocity = self.velocity + acceleration * dt_units;
        self.position = self.position + self.velocity * dt_units;
    }

    pub fn is_settled(&self, threshold: f64) -> bool {
        self.position.distance(self.target) < threshold && self.velocity.length() < threshold
    }
}
