//! Application Configuration
//! Replaces the hardcoded CSV path with an injected settings struct.

use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "WEATHER_CHARTS_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "weather_charts.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),
}

/// How the three charts are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Interactive egui window
    Window,
    /// PNG files written with plotters
    Png,
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Window
    }
}

/// Run settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    /// Station name used in the trend chart title.
    pub location: String,
    /// Rows with an earlier `yyyy` are dropped.
    pub start_year: i32,
    pub display: DisplayMode,
    pub output_dir: PathBuf,
    pub open_images: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/bradforddata.csv"),
            location: "Bradford".to_string(),
            start_year: 2013,
            display: DisplayMode::default(),
            output_dir: PathBuf::from("charts"),
            open_images: true,
        }
    }
}

impl AppConfig {
    /// Resolve the config for this run.
    ///
    /// `WEATHER_CHARTS_CONFIG` wins and must point at an existing file.
    /// Otherwise `weather_charts.json` is read if it exists, else defaults apply.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::from_file(fallback)
        } else {
            info!("No {} found, using default settings", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// Read settings from a JSON file; missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config = Self::from_json(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_json_keeps_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = AppConfig::from_json(r#"{ "csv_path": "leeds.csv", "display": "png" }"#)?;

        assert_eq!(config.csv_path, PathBuf::from("leeds.csv"));
        assert_eq!(config.display, DisplayMode::Png);
        assert_eq!(config.start_year, 2013);
        assert_eq!(config.location, "Bradford");
        assert!(config.open_images);
        Ok(())
    }

    #[test]
    fn unknown_display_mode_is_rejected() {
        assert!(AppConfig::from_json(r#"{ "display": "pdf" }"#).is_err());
    }

    #[test]
    fn from_file_reads_json() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{ "start_year": 2018, "location": "Oxford" }}"#)?;

        let config = AppConfig::from_file(file.path())?;
        assert_eq!(config.start_year, 2018);
        assert_eq!(config.location, "Oxford");
        assert_eq!(config.output_dir, PathBuf::from("charts"));
        Ok(())
    }

    #[test]
    fn from_file_missing_is_read_error() {
        let err = AppConfig::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(..)));
    }
}
