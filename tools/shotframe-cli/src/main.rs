//! Shotframe CLI — composite store screenshots onto a device frame.
//!
//! Usage:
//!   shotframe [--screenshots <DIR>] [--frame <PATH>] [--output <DIR>] [--radius <PX>]
//!   shotframe --write-config [OPTIONS]
//!
//! Unset flags fall back to the config file, then to built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use shotframe_common::config::{config_file_path, AppConfig, CompositeDefaults};
use shotframe_common::error::ShotframeError;
use shotframe_compositor::{run_batch, BatchConfig};

#[derive(Parser, Debug)]
#[command(
    name = "shotframe",
    about = "Center screenshots inside a frame image with rounded corners",
    version,
    author
)]
struct Cli {
    /// Directory searched recursively for PNG screenshots
    /// [default: integration_test/screenshots]
    #[arg(long, value_name = "DIR")]
    screenshots: Option<PathBuf>,

    /// Frame image drawn over every screenshot
    /// [default: assets/internal/frame.png]
    #[arg(long, value_name = "PATH")]
    frame: Option<PathBuf>,

    /// Output directory, created if missing
    /// [default: assets/internal/release_screenshots]
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Corner radius in pixels [default: 80]
    #[arg(long, value_name = "PX")]
    radius: Option<u32>,

    /// Read settings from this JSON file instead of the standard location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Save the resolved settings to the config file and exit
    #[arg(long)]
    write_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Overlay explicit flags on top of configured defaults.
    fn batch_config(&self, defaults: &CompositeDefaults) -> BatchConfig {
        let mut config = BatchConfig::from(defaults);
        if let Some(dir) = &self.screenshots {
            config.screenshots_dir = dir.clone();
        }
        if let Some(frame) = &self.frame {
            config.frame_path = frame.clone();
        }
        if let Some(dir) = &self.output {
            config.output_dir = dir.clone();
        }
        if let Some(radius) = self.radius {
            config.corner_radius = radius;
        }
        config
    }
}

/// Resolve the app config.
///
/// An explicit `--config` must load. A broken file at the standard location
/// falls back to defaults; the error is handed back so it can be logged once
/// the subscriber exists.
fn load_app_config(
    cli: &Cli,
    standard_path: &Path,
) -> anyhow::Result<(AppConfig, Option<ShotframeError>)> {
    match &cli.config {
        Some(path) if cli.write_config => {
            let config = AppConfig::try_load_at(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            Ok((config, None))
        }
        Some(path) => {
            let config = AppConfig::load_from(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            Ok((config, None))
        }
        None => match AppConfig::try_load_at(standard_path) {
            Ok(config) => Ok((config, None)),
            Err(e) => Ok((AppConfig::default(), Some(e))),
        },
    }
}

fn report_config_fallback(path: &Path, err: &ShotframeError) {
    tracing::warn!(
        path = %path.display(),
        error = %err,
        "Failed to load config, using defaults"
    );
}

/// Persist `batch` as the composite defaults of `app_config` at `target`.
fn write_config(app_config: &AppConfig, batch: &BatchConfig, target: &Path) -> anyhow::Result<()> {
    let mut config = app_config.clone();
    config.composite = CompositeDefaults {
        screenshots_dir: batch.screenshots_dir.clone(),
        frame_path: batch.frame_path.clone(),
        output_dir: batch.output_dir.clone(),
        corner_radius: batch.corner_radius,
    };
    config
        .save_to(target)
        .with_context(|| format!("Failed to write config {}", target.display()))?;
    tracing::info!(path = %target.display(), "Wrote config");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let standard_path = config_file_path();
    let (app_config, config_error) = load_app_config(&cli, &standard_path)?;

    // Initialize logging
    let mut logging = app_config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    shotframe_common::logging::init_logging(&logging);

    if let Some(err) = &config_error {
        report_config_fallback(&standard_path, err);
    }

    let batch = cli.batch_config(&app_config.composite);
    tracing::debug!(?batch, "Resolved batch configuration");

    if cli.write_config {
        let target = cli.config.as_deref().unwrap_or(&standard_path);
        return write_config(&app_config, &batch, target);
    }

    match run_batch(&batch) {
        Ok(summary) => {
            tracing::info!(count = summary.written.len(), "Framed screenshots written");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to process screenshots");
            Err(e).context("Screenshot framing aborted")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_malformed_standard_config_warns_after_logging_starts() {
        let dir = tempfile::tempdir().unwrap();
        let standard_path = dir.path().join("shotframe").join("config.json");
        std::fs::create_dir_all(standard_path.parent().unwrap()).unwrap();
        std::fs::write(&standard_path, "{ not json").unwrap();

        let cli = Cli::parse_from(["shotframe"]);
        let (config, config_error) = load_app_config(&cli, &standard_path).unwrap();
        assert_eq!(config.composite, CompositeDefaults::default());
        let err = config_error.expect("malformed config should be reported");

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            report_config_fallback(&standard_path, &err)
        });

        let output = logs.contents();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("Failed to load config"), "{output}");
        assert!(output.contains("config.json"), "{output}");
    }

    #[test]
    fn test_missing_standard_config_is_silent_default() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["shotframe"]);
        let (config, config_error) =
            load_app_config(&cli, &dir.path().join("config.json")).unwrap();
        assert!(config_error.is_none());
        assert_eq!(config.composite.corner_radius, 80);
    }

    #[test]
    fn test_explicit_malformed_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, "{ not json").unwrap();
        let cli = Cli::parse_from(["shotframe", "--config", path.to_str().unwrap()]);

        assert!(load_app_config(&cli, &dir.path().join("config.json")).is_err());
    }

    #[test]
    fn test_write_config_persists_resolved_flags() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("new").join("config.json");
        let cli = Cli::parse_from([
            "shotframe",
            "--write-config",
            "--config",
            target.to_str().unwrap(),
            "--frame",
            "bezel.png",
            "--radius",
            "24",
        ]);

        let (app_config, _) = load_app_config(&cli, &dir.path().join("config.json")).unwrap();
        let batch = cli.batch_config(&app_config.composite);
        write_config(&app_config, &batch, &target).unwrap();

        let saved = AppConfig::load_from(&target).unwrap();
        assert_eq!(saved.composite.frame_path, PathBuf::from("bezel.png"));
        assert_eq!(saved.composite.corner_radius, 24);
        assert_eq!(
            saved.composite.output_dir,
            PathBuf::from("assets/internal/release_screenshots")
        );
    }

    #[test]
    fn test_flags_default_to_configured_values() {
        let cli = Cli::parse_from(["shotframe"]);
        let config = cli.batch_config(&CompositeDefaults::default());
        assert_eq!(
            config.screenshots_dir,
            PathBuf::from("integration_test/screenshots")
        );
        assert_eq!(config.frame_path, PathBuf::from("assets/internal/frame.png"));
        assert_eq!(
            config.output_dir,
            PathBuf::from("assets/internal/release_screenshots")
        );
        assert_eq!(config.corner_radius, 80);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "shotframe",
            "--screenshots",
            "shots",
            "--frame",
            "bezel.png",
            "--output",
            "out",
            "--radius",
            "12",
        ]);
        let defaults = CompositeDefaults {
            corner_radius: 40,
            ..CompositeDefaults::default()
        };
        let config = cli.batch_config(&defaults);
        assert_eq!(config.screenshots_dir, PathBuf::from("shots"));
        assert_eq!(config.frame_path, PathBuf::from("bezel.png"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.corner_radius, 12);
    }

    #[test]
    fn test_unset_radius_uses_config_file_value() {
        let cli = Cli::parse_from(["shotframe", "-v"]);
        let defaults = CompositeDefaults {
            corner_radius: 40,
            ..CompositeDefaults::default()
        };
        assert!(cli.verbose);
        assert_eq!(cli.batch_config(&defaults).corner_radius, 40);
    }
}
