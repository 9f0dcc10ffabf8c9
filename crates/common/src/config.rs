//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Region selection settings.
    pub capture: CaptureDefaults,

    /// Text recognition settings.
    pub recognition: RecognitionDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Region selection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureDefaults {
    /// Both sides of a selection must exceed this many pixels to be kept.
    pub min_selection_px: u32,

    /// Opacity of the dark veil drawn over the frozen screenshot.
    pub overlay_alpha: f32,
}

/// Text recognition parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionDefaults {
    /// Explicit path to the tesseract executable. `None` searches `PATH`.
    pub tesseract_cmd: Option<PathBuf>,

    /// Language passed to the engine (`-l`).
    pub language: String,

    /// OCR engine mode (`--oem`).
    pub oem: u8,

    /// Page segmentation modes tried in order (`--psm`).
    pub modes: Vec<u8>,

    /// Run one attempt with the engine's default configuration when every
    /// mode came back empty.
    pub default_fallback: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "snapname=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for CaptureDefaults {
    fn default() -> Self {
        Self {
            min_selection_px: 10,
            overlay_alpha: 0.3,
        }
    }
}

impl Default for RecognitionDefaults {
    fn default() -> Self {
        Self {
            tesseract_cmd: None,
            language: "eng".to_string(),
            oem: 3,
            modes: vec![6, 7, 8, 3],
            default_fallback: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .unwrap_or_else(|_| std::env::temp_dir().display().to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("snapname").join("config.json")
}
