//! 2D point/vector value type used by the evaluator, the spring integrator and the target policy

use crate::math_utils;
use euclid::default::Point2D;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ZERO: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise product `(a.x * b.x, a.y * b.y)`
    pub fn mul_components(self, other: Point2) -> Point2 {
        Point2::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise quotient. The caller guarantees both divisor components are nonzero.
    pub fn div_components(self, other: Point2) -> Point2 {
        Point2::new(self.x / other.x, self.y / other.y)
    }

    pub fn scale(self, scalar: f64) -> Point2 {
        Point2::new(self.x * scalar, self.y * scalar)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point2) -> f64 {
        math_utils::distance((self.x, self.y), (other.x, other.y))
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector
    pub fn normalized(self) -> Option<Point2> {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        Some(Point2::new(self.x / len, self.y / len))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_f32(self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point2 {
    type Output = Point2;

    fn neg(self) -> Point2 {
        Point2::new(-self.x, -self.y)
    }
}

/// `scalar * point`
impl Mul<Point2> for f64 {
    type Output = Point2;

    fn mul(self, rhs: Point2) -> Point2 {
        rhs.scale(self)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;

    fn mul(self, rhs: f64) -> Point2 {
        self.scale(rhs)
    }
}

/// `point * point` multiplies component-wise
impl Mul for Point2 {
    type Output = Point2;

    fn mul(self, rhs: Point2) -> Point2 {
        self.mul_components(rhs)
    }
}

/// `point / point` divides component-wise
impl Div for Point2 {
    type Output = Point2;

    fn div(self, rhs: Point2) -> Point2 {
        self.div_components(rhs)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Point2::new(x, y)
    }
}

impl From<Point2D<f64>> for Point2 {
    fn from(p: Point2D<f64>) -> Self {
        Point2::new(p.x, p.y)
    }
}

impl From<Point2> for Point2D<f64> {
    fn from(p: Point2) -> Self {
        Point2D::new(p.x, p.y)
    }
}
