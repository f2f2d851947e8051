//! # imperial_core - Feet-Inch Notation and Model Unit Helpers
//!
//! `imperial_core` converts between the decimal feet a building model stores
//! and the feet-inch-fraction notation people write on drawings, plus a few
//! small helpers that travel with it: unit conversion, line-to-line distance
//! and color formatting.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: Value types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use imperial_core::{format_from_feet, parse_to_feet, try_parse_to_feet};
//!
//! let feet = parse_to_feet("12'-6 1/2\"", 32).unwrap();
//! assert_eq!(format_from_feet(feet, 8).unwrap(), "12'-6 1/2\"");
//!
//! assert_eq!(try_parse_to_feet("twelve feet", 32), None);
//! ```
//!
//! ## Modules
//!
//! - [`notation`] - Imperial notation parser and formatter
//! - [`units`] - Type-safe unit wrappers
//! - [`geometry`] - Vectors, lines, line-to-line distance
//! - [`color`] - RGB hex and packed-integer encodings
//! - [`settings`] - Default resolutions and their JSON file
//! - [`errors`] - Structured error types

pub mod color;
pub mod errors;
pub mod geometry;
pub mod notation;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{UnitsError, UnitsResult};
pub use notation::{
    format_from_feet, format_parts, parse_to_feet, try_parse_to_feet, ImperialParts,
    DEFAULT_FORMAT_DENOMINATOR, DEFAULT_PARSE_DENOMINATOR,
};
pub use settings::{load_settings, save_settings, NotationSettings};
