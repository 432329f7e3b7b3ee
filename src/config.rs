//! Dashboard settings, read from an optional JSON file and overridden by CLI flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::export::DEFAULT_EXPORT_FILENAME;

/// Source workbook looked up in the working directory when none is given.
pub const DEFAULT_SOURCE: &str = "Data_Pembukuan_SAKTI_Dummy.xlsx";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Transaction workbook to load.
    pub source_path: PathBuf,
    /// Suggested name in the export dialog.
    pub export_filename: String,
    /// Frames in the KPI counting animation.
    pub animation_steps: usize,
    /// Delay between animation frames, in milliseconds.
    pub animation_step_ms: u64,
    pub window_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            animation_steps: 10,
            animation_step_ms: 10,
            window_title: "Dashboard Realisasi Anggaran".to_string(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn animation_step(&self) -> Duration {
        Duration::from_millis(self.animation_step_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "source_path": "data/2024.xlsx", "animation_steps": 4 }"#)
            .unwrap();

        let settings = Settings::from_file(&path).unwrap();

        assert_eq!(settings.source_path, PathBuf::from("data/2024.xlsx"));
        assert_eq!(settings.animation_steps, 4);
        assert_eq!(settings.export_filename, "realisasi.xlsx");
        assert_eq!(settings.animation_step(), Duration::from_millis(10));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ animation_steps: ten }").unwrap();

        let err = Settings::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
