//! # Error Types
//!
//! Structured error types for imperial_core. Each variant carries enough
//! context (the offending input, the field, the character offset) for a
//! caller to report the problem or fix it programmatically.
//!
//! ## Example
//!
//! ```rust
//! use imperial_core::errors::{UnitsError, UnitsResult};
//!
//! fn validate_denominator(denominator: i32) -> UnitsResult<()> {
//!     if denominator <= 0 {
//!         return Err(UnitsError::precondition(
//!             "denominator",
//!             denominator.to_string(),
//!             "Denominator must be a positive integer",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_denominator(8).is_ok());
//! assert_eq!(validate_denominator(0).unwrap_err().error_code(), "PRECONDITION");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for imperial_core operations
pub type UnitsResult<T> = Result<T, UnitsError>;

/// Structured error type for conversions and settings I/O.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum UnitsError {
    /// Text does not follow the expected notation
    #[error("Format error in '{input}' at offset {position}: {reason}")]
    Format {
        input: String,
        position: usize,
        reason: String,
    },

    /// An argument violates the operation's precondition
    #[error("Invalid argument '{field}': {value} - {reason}")]
    Precondition {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl UnitsError {
    /// Create a Format error
    pub fn format(input: impl Into<String>, position: usize, reason: impl Into<String>) -> Self {
        UnitsError::Format {
            input: input.into(),
            position,
            reason: reason.into(),
        }
    }

    /// Create a Precondition error
    pub fn precondition(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        UnitsError::Precondition {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        UnitsError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the caller passed malformed text rather than a bad argument
    pub fn is_format(&self) -> bool {
        matches!(self, UnitsError::Format { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            UnitsError::Format { .. } => "FORMAT",
            UnitsError::Precondition { .. } => "PRECONDITION",
            UnitsError::FileError { .. } => "FILE_ERROR",
            UnitsError::SerializationError { .. } => "SERIALIZATION_ERROR",
            UnitsError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
