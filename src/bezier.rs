//! Cubic Bezier evaluation: position, tangent and sampled polylines

use crate::math_utils::{bernstein_derivative_weights, bernstein_weights};
use crate::point::Point2;
use serde::{Deserialize, Serialize};

/// Parameters at which tangent annotations are produced for the renderer
pub const TANGENT_MARK_PARAMS: [f64; 3] = [0.0, 0.5, 1.0];

/// Smallest parameter step [`ControlPolygon::sample`] advances by; finer
/// requests are coarsened to it so the polyline stays bounded
pub const MIN_SAMPLE_STEP: f64 = 1e-6;

/// Four control points of a single cubic segment, ordered P0..P3
///
/// No coincident-point restriction is enforced; degenerate polygons are valid curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPolygon {
    pub p0: Point2,
    pub p1: Point2,
    pub p2: Point2,
    pub p3: Point2,
}

/// Unit tangent direction at parameter `t`, anchored at the curve point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TangentMark {
    pub t: f64,
    pub point: Point2,
    pub direction: Point2,
}

impl ControlPolygon {
    pub const fn new(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    pub fn points(&self) -> [Point2; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Same endpoints, replaced interior points
    pub fn with_interior(&self, p1: Point2, p2: Point2) -> Self {
        Self { p1, p2, ..*self }
    }

    /// `B(t) = (1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3`
    pub fn position(&self, t: f64) -> Point2 {
        let [w0, w1, w2, w3] = bernstein_weights(t);
        w0 * self.p0 + w1 * self.p1 + w2 * self.p2 + w3 * self.p3
    }

    /// `B'(t) = 3(1-t)^2 (P1-P0) + 6(1-t) t (P2-P1) + 3 t^2 (P3-P2)`
    ///
    /// May be the zero vector; callers must check before normalizing.
    pub fn tangent(&self, t: f64) -> Point2 {
        let [d0, d1, d2] = bernstein_derivative_weights(t);
        d0 * (self.p1 - self.p0) + d1 * (self.p2 - self.p1) + d2 * (self.p3 - self.p2)
    }

    /// Polyline at `t = 0, step, 2*step, ...` while `t <= 1`.
    ///
    /// `t` is advanced by repeated addition, so whether `t = 1` is the last
    /// sample depends on how `step_size` accumulates. The first sample is always
    /// `position(0)`; a non-positive or non-finite step yields only that sample.
    /// Steps below [`MIN_SAMPLE_STEP`] sample at that step instead.
    pub fn sample(&self, step_size: f64) -> Vec<Point2> {
        if !(step_size.is_finite() && step_size > 0.0) {
            return vec![self.position(0.0)];
        }
        let step_size = step_size.max(MIN_SAMPLE_STEP);

        let mut points = Vec::with_capacity((1.0 / step_size) as usize + 2);
        let mut t = 0.0;
        while t <= 1.0 {
            points.push(self.position(t));
            t += step_size;
        }
        points
    }

    /// Tangent annotations at [`TANGENT_MARK_PARAMS`]. Parameters whose tangent
    /// has zero magnitude are skipped.
    pub fn tangent_marks(&self) -> Vec<TangentMark> {
        TANGENT_MARK_PARAMS
            .iter()
            .filter_map(|&t| {
                self.tangent(t).normalized().map(|direction| TangentMark {
                    t,
                    point: self.position(t),
                    direction,
                })
            })
            .collect()
    }
}

impl Default for ControlPolygon {
    fn default() -> Self {
        Self {
            p0: Point2::new(100.0, 400.0),
            p1: Point2::new(150.0, 100.0),
            p2: Point2::new(250.0, 700.0),
            p3: Point2::new(300.0, 400.0),
        }
    }
}
