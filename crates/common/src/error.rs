//! Error types shared across Shotframe crates.

use std::path::{Path, PathBuf};

/// Top-level error type for Shotframe operations.
#[derive(Debug, thiserror::Error)]
pub enum ShotframeError {
    #[error("Failed to load frame image {path}: {message}")]
    FrameLoad { path: PathBuf, message: String },

    #[error("Failed to create output directory {path}: {message}")]
    OutputDir { path: PathBuf, message: String },

    #[error("Failed to decode screenshot {path}: {message}")]
    ScreenshotDecode { path: PathBuf, message: String },

    #[error("Failed to save composited screenshot {path}: {message}")]
    ScreenshotSave { path: PathBuf, message: String },

    #[error(
        "Screenshot {path} is {shot_width}x{shot_height}, larger than the \
         {frame_width}x{frame_height} frame"
    )]
    ScreenshotTooLarge {
        path: PathBuf,
        shot_width: u32,
        shot_height: u32,
        frame_width: u32,
        frame_height: u32,
    },

    #[error("Directory walk failed: {message}")]
    Walk { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using ShotframeError.
pub type ShotframeResult<T> = Result<T, ShotframeError>;

impl ShotframeError {
    pub fn frame_load(path: impl AsRef<Path>, msg: impl ToString) -> Self {
        Self::FrameLoad {
            path: path.as_ref().to_path_buf(),
            message: msg.to_string(),
        }
    }

    pub fn output_dir(path: impl AsRef<Path>, msg: impl ToString) -> Self {
        Self::OutputDir {
            path: path.as_ref().to_path_buf(),
            message: msg.to_string(),
        }
    }

    pub fn screenshot_decode(path: impl AsRef<Path>, msg: impl ToString) -> Self {
        Self::ScreenshotDecode {
            path: path.as_ref().to_path_buf(),
            message: msg.to_string(),
        }
    }

    pub fn screenshot_save(path: impl AsRef<Path>, msg: impl ToString) -> Self {
        Self::ScreenshotSave {
            path: path.as_ref().to_path_buf(),
            message: msg.to_string(),
        }
    }

    pub fn walk(msg: impl ToString) -> Self {
        Self::Walk {
            message: msg.to_string(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Attach the screenshot path to an error raised before the path was known.
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        match self {
            Self::ScreenshotTooLarge {
                shot_width,
                shot_height,
                frame_width,
                frame_height,
                ..
            } => Self::ScreenshotTooLarge {
                path: path.as_ref().to_path_buf(),
                shot_width,
                shot_height,
                frame_width,
                frame_height,
            },
            other => other,
        }
    }
}
