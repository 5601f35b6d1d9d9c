//! Application settings loaded from a RON file.
//!
//! ```ron
//! (
//!     log: (console: true, file: true, directory: Some("logs")),
//!     test_mode: false,
//!     zoom: (zoom_intensity: 0.001, max_scale: 2.5, min_viewport_size: 900.0),
//! )
//! ```
//!
//! Every field is optional; missing ones fall back to [`Settings::default`].

use crate::zoom::{ZoomConfig, ZoomConfigError};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SETTINGS_DIR: &str = "zoom-pane";
const SETTINGS_FILE: &str = "settings.ron";

/// Errors that can occur when loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: ron::de::SpannedError,
    },
    #[error("invalid zoom settings: {0}")]
    InvalidZoom(#[from] ZoomConfigError),
}

impl SettingsError {
    /// True when the settings file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Write log lines to stderr.
    pub console: bool,
    /// Write log lines to a timestamped file.
    pub file: bool,
    /// Directory for log files; the working directory when unset.
    pub directory: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            console: true,
            file: false,
            directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log: LogSettings,
    /// Enables debug-level logging.
    pub test_mode: bool,
    pub zoom: ZoomConfig,
}

impl Settings {
    /// `<config dir>/zoom-pane/settings.ron`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Parses settings from RON text. `origin` is only used in error messages.
    pub fn from_ron_str(text: &str, origin: &Path) -> Result<Self, SettingsError> {
        let settings: Settings = ron::from_str(text).map_err(|source| SettingsError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        settings.zoom.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text, path)
    }

    /// Like [`Settings::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(err) if err.is_not_found() => Ok(Self::default()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("zoom_pane_settings_{}_{name}", std::process::id()))
    }

    #[test]
    fn empty_document_gives_defaults() {
        let settings = Settings::from_ron_str("()", Path::new("inline")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.log.console);
        assert!(!settings.log.file);
        assert_eq!(settings.zoom.max_scale, 2.5);
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let text = r#"(
            log: (file: true, directory: Some("logs")),
            test_mode: true,
            zoom: (max_scale: 4.0),
        )"#;
        let settings = Settings::from_ron_str(text, Path::new("inline")).unwrap();

        assert!(settings.log.console);
        assert!(settings.log.file);
        assert_eq!(settings.log.directory, Some(PathBuf::from("logs")));
        assert!(settings.test_mode);
        assert_eq!(settings.zoom.max_scale, 4.0);
        assert_eq!(settings.zoom.zoom_intensity, 0.001);
    }

    #[test]
    fn invalid_zoom_is_rejected() {
        let err = Settings::from_ron_str("(zoom: (max_scale: -1.0))", Path::new("inline"))
            .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidZoom(_)), "{err}");
    }

    #[test]
    fn only_a_missing_file_counts_as_not_found() {
        let dir = temp_path("a_directory");
        fs::create_dir_all(&dir).unwrap();

        let err = Settings::load(&dir).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
        assert!(!err.is_not_found());
        assert!(Settings::load_or_default(&dir).is_err());

        let err = Settings::from_ron_str("(zoom: (max_scale: 0.0))", Path::new("inline"))
            .unwrap_err();
        assert!(!err.is_not_found());

        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn syntax_error_names_the_file() {
        let err = Settings::from_ron_str("(test_mode: maybe)", Path::new("broken.ron"))
            .unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = temp_path("missing.ron");
        let _ = fs::remove_file(&path);

        let err = Settings::load(&path).unwrap_err();
        assert!(err.is_not_found(), "{err}");
        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = temp_path("present.ron");
        fs::write(&path, "(test_mode: true, log: (console: false))").unwrap();

        let settings = Settings::load_or_default(&path).unwrap();
        assert!(settings.test_mode);
        assert!(!settings.log.console);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn default_path_ends_with_settings_file() {
        if let Some(path) = Settings::default_path() {
            assert!(path.ends_with("zoom-pane/settings.ron"));
        }
    }
}
