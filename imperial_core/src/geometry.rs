//! # Geometry Helpers
//!
//! A minimal 3D vector and unbounded line, enough to measure the shortest
//! distance between two lines in model space (decimal feet).
//!
//! ## Example
//!
//! ```rust
//! use imperial_core::geometry::{Line, Xyz};
//!
//! // Two skew lines, one 10 ft above the other
//! let a = Line::new(Xyz::new(0.0, 0.0, 0.0), Xyz::new(1.0, 0.0, 0.0)).unwrap();
//! let b = Line::new(Xyz::new(0.0, 0.0, 10.0), Xyz::new(0.0, 1.0, 0.0)).unwrap();
//! assert!((a.distance(&b) - 10.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use crate::errors::{UnitsError, UnitsResult};

/// Cross products shorter than this are treated as parallel
const PARALLEL_TOLERANCE: f64 = 1e-9;

/// Point or vector in model coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    pub const ZERO: Xyz = Xyz { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Xyz { x, y, z }
    }

    pub fn dot(self, other: Xyz) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Xyz) -> Xyz {
        Xyz {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, `None` for a zero-length vector
    pub fn normalize(self) -> Option<Xyz> {
        let len = self.length();
        if len < PARALLEL_TOLERANCE || !len.is_finite() {
            return None;
        }
        Some(self * (1.0 / len))
    }
}

impl Add for Xyz {
    type Output = Xyz;
    fn add(self, rhs: Xyz) -> Xyz {
        Xyz::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Xyz {
    type Output = Xyz;
    fn sub(self, rhs: Xyz) -> Xyz {
        Xyz::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Xyz {
    type Output = Xyz;
    fn mul(self, rhs: f64) -> Xyz {
        Xyz::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Xyz {
    type Output = Xyz;
    fn neg(self) -> Xyz {
        Xyz::new(-self.x, -self.y, -self.z)
    }
}

/// Unbounded line through `origin` along unit `direction`.
///
/// Deserialization goes through [`Line::new`], so a zero direction is
/// rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLine")]
pub struct Line {
    origin: Xyz,
    direction: Xyz,
}

#[derive(Deserialize)]
struct RawLine {
    origin: Xyz,
    direction: Xyz,
}

impl TryFrom<RawLine> for Line {
    type Error = UnitsError;

    fn try_from(raw: RawLine) -> UnitsResult<Self> {
        Line::new(raw.origin, raw.direction)
    }
}

impl Line {
    /// Create a line; `direction` is normalized and must not be zero.
    pub fn new(origin: Xyz, direction: Xyz) -> UnitsResult<Self> {
        let direction = direction.normalize().ok_or_else(|| {
            UnitsError::precondition(
                "direction",
                format!("({}, {}, {})", direction.x, direction.y, direction.z),
                "Line direction must be a non-zero finite vector",
            )
        })?;
        Ok(Line { origin, direction })
    }

    pub fn origin(&self) -> Xyz {
        self.origin
    }

    /// Unit direction
    pub fn direction(&self) -> Xyz {
        self.direction
    }

    /// Line through two distinct points.
    pub fn bound(start: Xyz, end: Xyz) -> UnitsResult<Self> {
        Line::new(start, end - start)
    }

    /// Shortest distance between the two lines, treating both as unbounded.
    pub fn distance(&self, other: &Line) -> f64 {
        let between = other.origin - self.origin;
        let normal = self.direction.cross(other.direction);
        let normal_len = normal.length();

        if normal_len < PARALLEL_TOLERANCE {
            // Parallel: distance from other's origin to this line
            return between.cross(self.direction).length() / self.direction.length();
        }
        between.dot(normal).abs() / normal_len
    }
}
