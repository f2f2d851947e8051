//! Color formatting helpers.
//!
//! Converts an RGB color between `#RRGGBB` text and the packed integer the
//! model stores in color parameters (`r + g * 256 + b * 65536`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{UnitsError, UnitsResult};

const MAX_PACKED: i32 = 0x00FF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Uppercase `#RRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse six hex digits, with or without a leading `#`.
    pub fn from_hex(text: &str) -> UnitsResult<Self> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(UnitsError::format(text, 0, "Expected six hex digits, e.g. #FF8000"));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| UnitsError::format(text, i, e.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_revit_int(self) -> i32 {
        i32::from(self.r) | i32::from(self.g) << 8 | i32::from(self.b) << 16
    }

    pub fn from_revit_int(value: i32) -> UnitsResult<Self> {
        if !(0..=MAX_PACKED).contains(&value) {
            return Err(UnitsError::precondition(
                "value",
                value.to_string(),
                "Packed color must be within 0..=16777215",
            ));
        }
        Ok(Rgb::new(
            (value & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            ((value >> 16) & 0xFF) as u8,
        ))
    }
}

/// `R-G-B`, the label style used in color pickers and schedules
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        let orange = Rgb::new(255, 128, 0);
        assert_eq!(orange.to_hex(), "#FF8000");
        assert_eq!(Rgb::from_hex("#ff8000").unwrap(), orange);
        assert_eq!(Rgb::from_hex(" FF8000 ").unwrap(), orange);
    }

    #[test]
    fn test_hex_rejects_malformed() {
        for text in ["", "#FFF", "#GG0000", "#FF80001", "##FF8000", "#FF 800"] {
            assert!(Rgb::from_hex(text).unwrap_err().is_format(), "{:?}", text);
        }
    }

    #[test]
    fn test_revit_int() {
        assert_eq!(Rgb::new(255, 0, 0).to_revit_int(), 255);
        assert_eq!(Rgb::new(0, 0, 255).to_revit_int(), 16_711_680);
        assert_eq!(Rgb::WHITE.to_revit_int(), MAX_PACKED);
        assert_eq!(Rgb::from_revit_int(0x0080FF).unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_revit_int(0).unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_revit_int_out_of_range() {
        assert_eq!(Rgb::from_revit_int(-1).unwrap_err().error_code(), "PRECONDITION");
        assert!(Rgb::from_revit_int(MAX_PACKED + 1).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rgb::new(255, 0, 0).to_string(), "255-0-0");
    }
}
