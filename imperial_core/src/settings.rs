//! # Notation Settings
//!
//! Default resolutions for parsing and formatting, persisted as a small JSON
//! file so that a team can share one convention (e.g. 1/16" on shop drawings).
//!
//! ## File Format
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "parse_denominator": 32,
//!   "format_denominator": 8
//! }
//! ```
//!
//! Missing fields take their defaults. Saves are atomic: write to `.tmp`,
//! fsync, rename.
//!
//! ## Example
//!
//! ```rust,no_run
//! use imperial_core::settings::{load_settings, save_settings, NotationSettings};
//! use std::path::Path;
//!
//! let settings = NotationSettings { format_denominator: 16, ..Default::default() };
//! save_settings(&settings, Path::new("imperial.json"))?;
//!
//! let loaded = load_settings(Path::new("imperial.json"))?;
//! assert_eq!(loaded.format_denominator, 16);
//! # Ok::<(), imperial_core::errors::UnitsError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{UnitsError, UnitsResult};
use crate::notation::{self, DEFAULT_FORMAT_DENOMINATOR, DEFAULT_PARSE_DENOMINATOR};

/// Current schema version for settings files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Resolutions used when callers do not pass one explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotationSettings {
    /// Schema version of the file this was read from
    pub version: String,

    /// Parse resolution in fractions of an inch
    pub parse_denominator: i32,

    /// Format resolution in fractions of an inch
    pub format_denominator: i32,
}

impl Default for NotationSettings {
    fn default() -> Self {
        NotationSettings {
            version: SCHEMA_VERSION.to_string(),
            parse_denominator: DEFAULT_PARSE_DENOMINATOR,
            format_denominator: DEFAULT_FORMAT_DENOMINATOR,
        }
    }
}

impl NotationSettings {
    /// Both denominators must be positive.
    pub fn validate(&self) -> UnitsResult<()> {
        for (field, value) in [
            ("parse_denominator", self.parse_denominator),
            ("format_denominator", self.format_denominator),
        ] {
            if value <= 0 {
                return Err(UnitsError::precondition(
                    field,
                    value.to_string(),
                    "Denominator must be a positive integer",
                ));
            }
        }
        Ok(())
    }

    /// Parse with the configured resolution.
    pub fn parse(&self, text: &str) -> UnitsResult<f64> {
        notation::parse_to_feet(text, self.parse_denominator)
    }

    /// Format with the configured resolution.
    pub fn format(&self, feet: f64) -> UnitsResult<String> {
        notation::format_from_feet(feet, self.format_denominator)
    }
}

/// Save settings with atomic write semantics.
pub fn save_settings(settings: &NotationSettings, path: &Path) -> UnitsResult<()> {
    settings.validate()?;

    let json = serde_json::to_string_pretty(settings).map_err(|e| UnitsError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        UnitsError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        UnitsError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        UnitsError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        UnitsError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), "saved notation settings");
    Ok(())
}

/// Sibling temp file: `imperial.cfg` -> `imperial.cfg.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Load and validate settings.
///
/// # Returns
///
/// * `Err(UnitsError::VersionMismatch)` - File version is incompatible
/// * `Err(UnitsError::SerializationError)` - Invalid JSON
/// * `Err(UnitsError::FileError)` - I/O error
/// * `Err(UnitsError::Precondition)` - A denominator is not positive
pub fn load_settings(path: &Path) -> UnitsResult<NotationSettings> {
    let mut file = File::open(path).map_err(|e| {
        UnitsError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        UnitsError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let settings: NotationSettings =
        serde_json::from_str(&contents).map_err(|e| UnitsError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&settings.version).map_err(|e| {
        warn!(path = %path.display(), version = %settings.version, "incompatible settings file");
        e
    })?;
    settings.validate()?;

    info!(
        path = %path.display(),
        parse_denominator = settings.parse_denominator,
        format_denominator = settings.format_denominator,
        "loaded notation settings"
    );
    Ok(settings)
}

/// Major must match; in 0.x a newer minor is rejected.
fn validate_version(file_version: &str) -> UnitsResult<()> {
    let mismatch = || UnitsError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0 && file_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}
