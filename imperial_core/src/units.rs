//! # Unit Types
//!
//! Type-safe wrappers for the units a building model moves between. Model
//! lengths are stored as decimal feet and angles as radians; drawings and
//! schedules want inches, millimeters or degrees.
//!
//! All wrappers are plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Example
//!
//! ```rust
//! use imperial_core::units::{Feet, Inches, Millimeters};
//!
//! let height = Feet(10.0);
//! let inches: Inches = height.into();
//! assert_eq!(inches.0, 120.0);
//!
//! let mm: Millimeters = height.into();
//! assert!((mm.0 - 3048.0).abs() < 1e-9);
//!
//! assert_eq!(Feet::from_imperial("10'").unwrap(), height);
//! assert_eq!(height.to_imperial(8).unwrap(), "10'");
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::errors::UnitsResult;
use crate::notation::{self, DEFAULT_PARSE_DENOMINATOR};

const MM_PER_FOOT: f64 = 304.8;
const SQ_M_PER_SQ_FT: f64 = 0.092_903_04;

// ============================================================================
// Length Units
// ============================================================================

/// Length in decimal feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

impl From<Feet> for Millimeters {
    fn from(ft: Feet) -> Self {
        Millimeters(ft.0 * MM_PER_FOOT)
    }
}

impl From<Millimeters> for Feet {
    fn from(mm: Millimeters) -> Self {
        Feet(mm.0 / MM_PER_FOOT)
    }
}

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * MM_PER_FOOT / 1000.0)
    }
}

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 * 1000.0 / MM_PER_FOOT)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl Feet {
    /// Parse feet-inch notation such as `12'-6 1/2"`.
    pub fn from_imperial(text: &str) -> UnitsResult<Self> {
        notation::parse_to_feet(text, DEFAULT_PARSE_DENOMINATOR).map(Feet)
    }

    /// Format as feet-inch notation at `1/denominator` inch resolution.
    pub fn to_imperial(self, denominator: i32) -> UnitsResult<String> {
        notation::format_from_feet(self.0, denominator)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqFt> for SqM {
    fn from(sqft: SqFt) -> Self {
        SqM(sqft.0 * SQ_M_PER_SQ_FT)
    }
}

impl From<SqM> for SqFt {
    fn from(sqm: SqM) -> Self {
        SqFt(sqm.0 / SQ_M_PER_SQ_FT)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians (the model's internal angle unit)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SqFt);
impl_arithmetic!(SqM);
impl_arithmetic!(Degrees);
impl_arithmetic!(Radians);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_feet_to_inches() {
        let ft = Feet(10.0);
        let inches: Inches = ft.into();
        assert_eq!(inches.0, 120.0);
    }

    #[test]
    fn test_metric_lengths() {
        let mm: Millimeters = Feet(1.0).into();
        assert_relative_eq!(mm.0, 304.8);

        let m: Meters = Feet(100.0).into();
        assert_relative_eq!(m.0, 30.48, epsilon = 1e-12);

        let back: Feet = Millimeters(914.4).into();
        assert_relative_eq!(back.0, 3.0, epsilon = 1e-12);

        let mm: Millimeters = Meters(2.5).into();
        assert_relative_eq!(mm.0, 2500.0);
    }

    #[test]
    fn test_area_and_angle() {
        let sqm: SqM = SqFt(1000.0).into();
        assert_relative_eq!(sqm.0, 92.90304, epsilon = 1e-9);

        let rad: Radians = Degrees(180.0).into();
        assert_relative_eq!(rad.0, std::f64::consts::PI, epsilon = 1e-12);
        let deg: Degrees = Radians(std::f64::consts::FRAC_PI_2).into();
        assert_relative_eq!(deg.0, 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = Feet(10.0);
        let b = Feet(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_imperial_helpers() {
        let ft = Feet::from_imperial("3'-4 1/2\"").unwrap();
        assert_relative_eq!(ft.0, 3.0 + 4.5 / 12.0, epsilon = 1e-12);
        assert_eq!(ft.to_imperial(16).unwrap(), "3'-4 1/2\"");
        assert!(Feet::from_imperial("3 feet").is_err());
    }

    #[test]
    fn test_serialization() {
        let ft = Feet(12.5);
        let json = serde_json::to_string(&ft).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Feet = serde_json::from_str(&json).unwrap();
        assert_eq!(ft, roundtrip);
    }
}
