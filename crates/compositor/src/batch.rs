//! Batch driver: load the frame once, walk the screenshot directory, and
//! write one composited image per screenshot.
//!
//! The first error of any kind stops the walk and is returned.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use shotframe_common::config::CompositeDefaults;
use shotframe_common::error::{ShotframeError, ShotframeResult};

use crate::compositor::Compositor;
use crate::io::{load_png, save_png};

/// Extension of files picked up from the screenshot directory.
pub const SCREENSHOT_EXTENSION: &str = "png";

/// Inputs for a single batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Directory walked recursively for screenshots.
    pub screenshots_dir: PathBuf,
    /// Frame image drawn over each screenshot.
    pub frame_path: PathBuf,
    /// Flat output directory, created if missing.
    pub output_dir: PathBuf,
    /// Rounded corner radius in pixels.
    pub corner_radius: u32,
}

impl From<&CompositeDefaults> for BatchConfig {
    fn from(defaults: &CompositeDefaults) -> Self {
        Self {
            screenshots_dir: defaults.screenshots_dir.clone(),
            frame_path: defaults.frame_path.clone(),
            output_dir: defaults.output_dir.clone(),
            corner_radius: defaults.corner_radius,
        }
    }
}

/// Outcome of a successful batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Output files in the order they were written.
    pub written: Vec<PathBuf>,
}

/// Run the whole batch described by `config`.
///
/// The frame is loaded before anything else is touched, so a missing frame
/// leaves the output directory untouched.
pub fn run_batch(config: &BatchConfig) -> ShotframeResult<BatchSummary> {
    let frame = load_png(&config.frame_path)
        .map_err(|e| ShotframeError::frame_load(&config.frame_path, e))?;
    tracing::info!(
        path = %config.frame_path.display(),
        width = frame.width(),
        height = frame.height(),
        "Loaded frame"
    );

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| ShotframeError::output_dir(&config.output_dir, e))?;

    let compositor = Compositor::new(frame, config.corner_radius);
    let mut summary = BatchSummary::default();

    for path in screenshot_paths(&config.screenshots_dir) {
        let path = path?;
        let output_path = process_screenshot(&compositor, &path, &config.output_dir)?;
        summary.written.push(output_path);
    }

    tracing::info!(
        count = summary.written.len(),
        output = %config.output_dir.display(),
        "Batch complete"
    );
    Ok(summary)
}

/// Lazily yield every PNG file under `root`, in traversal order.
///
/// Traversal failures (unreadable entries, a missing root) are yielded as
/// [`ShotframeError::Walk`].
pub fn screenshot_paths(root: &Path) -> impl Iterator<Item = ShotframeResult<PathBuf>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if !entry.file_type().is_dir() && is_screenshot(entry.path()) => {
                Some(Ok(entry.into_path()))
            }
            Ok(_) => None,
            Err(e) => Some(Err(ShotframeError::walk(e))),
        })
}

fn is_screenshot(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == SCREENSHOT_EXTENSION)
}

/// Decode, compose, and save one screenshot. Returns the output path.
pub fn process_screenshot(
    compositor: &Compositor,
    screenshot_path: &Path,
    output_dir: &Path,
) -> ShotframeResult<PathBuf> {
    let screenshot = load_png(screenshot_path).map_err(|e| {
        tracing::error!(path = %screenshot_path.display(), error = %e, "Failed to load screenshot");
        ShotframeError::screenshot_decode(screenshot_path, e)
    })?;

    let composed = compositor.compose(&screenshot).map_err(|e| {
        let err = e.with_path(screenshot_path);
        tracing::error!(error = %err, "Failed to compose screenshot");
        err
    })?;

    let file_name = screenshot_path.file_name().ok_or_else(|| {
        ShotframeError::screenshot_save(screenshot_path, "screenshot path has no file name")
    })?;
    let output_path = output_dir.join(file_name);

    save_png(&composed, &output_path).map_err(|e| {
        tracing::error!(path = %output_path.display(), error = %e, "Failed to save output");
        ShotframeError::screenshot_save(&output_path, e)
    })?;

    tracing::info!(path = %output_path.display(), "Saved composited screenshot");
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_screenshot_matches_exact_extension() {
        assert!(is_screenshot(Path::new("a/b/shot.png")));
        assert!(!is_screenshot(Path::new("shot.PNG")));
        assert!(!is_screenshot(Path::new("shot.jpg")));
        assert!(!is_screenshot(Path::new("png")));
        // A bare dotfile has no extension.
        assert!(!is_screenshot(Path::new("shots/.png")));
    }

    #[test]
    fn test_screenshot_paths_recurses_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("ios").join("6.5");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::create_dir_all(dir.path().join("dir.png")).unwrap();
        std::fs::write(dir.path().join("top.png"), b"").unwrap();
        std::fs::write(nested.join("deep.png"), b"").unwrap();
        std::fs::write(nested.join("notes.txt"), b"").unwrap();

        let mut names: Vec<String> = screenshot_paths(dir.path())
            .map(|p| p.unwrap().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["deep.png", "top.png"]);
    }

    #[test]
    fn test_screenshot_paths_reports_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = screenshot_paths(&dir.path().join("absent"));
        assert!(matches!(paths.next(), Some(Err(ShotframeError::Walk { .. }))));
    }

    #[test]
    fn test_batch_config_from_defaults() {
        let config = BatchConfig::from(&CompositeDefaults::default());
        assert_eq!(config.corner_radius, 80);
        assert_eq!(config.frame_path, PathBuf::from("assets/internal/frame.png"));
    }
}
