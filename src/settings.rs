//! User-facing configuration: number formatting and chart style.
//!
//! Settings are JSON. Every field has a default, so a partial file only
//! overrides what it names.

use crate::chart::ChartStyle;
use crate::data::{DataError, DataResult};
use crate::format::NumberFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub format: NumberFormat,
    pub chart: ChartStyle,
}

impl Settings {
    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> DataResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file, failing on I/O or parse errors.
    pub fn read_from(path: &Path) -> DataResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings from a JSON file, falling back to defaults.
    ///
    /// A missing or malformed file is never fatal.
    pub fn load_from(path: &Path) -> Self {
        match Self::read_from(path) {
            Ok(settings) => {
                debug!(path = %path.display(), "Loaded settings");
                settings
            }
            Err(DataError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON.
    pub fn save_to(&self, path: &Path) -> DataResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
