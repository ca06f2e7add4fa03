//! Plane coordinate type for the placement engine.
//!
//! The engine is unit-agnostic: callers pick one consistent unit (pixels,
//! meters, ...) for all coordinates and the coverage radius.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point (or free vector) in the plane.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Origin.
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared distance (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Length of this point as a vector from the origin.
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Normalize to unit length. Returns the input unchanged for zero-length vectors.
    #[inline]
    pub fn normalized(&self) -> Point2D {
        let len = self.length();
        if len > 0.0 {
            Point2D::new(self.x / len, self.y / len)
        } else {
            *self
        }
    }

    /// Dot product with another point (as vectors).
    #[inline]
    pub fn dot(&self, other: Point2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Cross product (z-component of the 3D cross product).
    #[inline]
    pub fn cross(&self, other: Point2D) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Linear interpolation toward another point.
    #[inline]
    pub fn lerp(&self, other: Point2D, t: f32) -> Point2D {
        Point2D::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Point2D::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert!((a.distance_squared(b) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalized() {
        let v = Point2D::new(0.0, 2.0);
        let n = v.normalized();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.y - 1.0).abs() < 1e-6);

        // Zero vector stays zero instead of producing NaN
        let z = Point2D::ZERO.normalized();
        assert_eq!(z, Point2D::ZERO);
    }

    #[test]
    fn test_lerp() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, -4.0);
        let mid = a.lerp(b, 0.5);
        assert!((mid.x - 5.0).abs() < 1e-6);
        assert!((mid.y + 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_vector_ops() {
        let a = Point2D::new(1.0, 2.0);
        let b = Point2D::new(3.0, -1.0);
        assert_eq!(a + b, Point2D::new(4.0, 1.0));
        assert_eq!(a - b, Point2D::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Point2D::new(2.0, 4.0));
        assert!((a.dot(b) - 1.0).abs() < 1e-6);
        assert!((a.cross(b) + 7.0).abs() < 1e-6);
    }
}
