//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ShotframeError, ShotframeResult};

/// Corner radius applied to screenshots, in source pixels.
pub const DEFAULT_CORNER_RADIUS: u32 = 80;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default compositing inputs and outputs.
    pub composite: CompositeDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default paths and parameters for a compositing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeDefaults {
    /// Directory walked recursively for screenshots.
    pub screenshots_dir: PathBuf,

    /// Frame (bezel) image drawn over every screenshot.
    pub frame_path: PathBuf,

    /// Directory receiving the composited images.
    pub output_dir: PathBuf,

    /// Rounded corner radius in pixels.
    pub corner_radius: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "shotframe=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for CompositeDefaults {
    fn default() -> Self {
        Self {
            screenshots_dir: PathBuf::from("integration_test/screenshots"),
            frame_path: PathBuf::from("assets/internal/frame.png"),
            output_dir: PathBuf::from("assets/internal/release_screenshots"),
            corner_radius: DEFAULT_CORNER_RADIUS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from `path`, usually [`config_file_path`].
    ///
    /// A missing file yields defaults. A present but unreadable or malformed
    /// file is an error so the caller can report it once logging is up.
    pub fn try_load_at(path: &Path) -> ShotframeResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load config from an explicit path. Missing or malformed files are errors.
    pub fn load_from(path: &Path) -> ShotframeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShotframeError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to `path` as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ShotframeResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("shotframe").join("config.json")
}
