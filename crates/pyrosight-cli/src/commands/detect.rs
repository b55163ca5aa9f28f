use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pyrosight_core::aim::{GimbalAngles, GimbalCommand};
use pyrosight_core::field::TemperatureField;
use pyrosight_core::io::load_thermal_image;
use pyrosight_core::pipeline::{process_frame, FrameReport};
use tracing::warn;

use super::load_config;
use crate::overlay::{render_overlay, save_overlay};
use crate::summary::{format_frame_report, print_config_summary};

#[derive(Args)]
pub struct DetectArgs {
    /// Thermal images, processed in order
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Session config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the hot-pixel threshold in degrees Celsius
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Override the minimum hotspot area in pixels
    #[arg(long)]
    pub min_area: Option<usize>,

    /// Initial gimbal azimuth in degrees
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub azimuth: f64,

    /// Initial gimbal pitch in degrees
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub pitch: f64,

    /// Feed each commanded attitude back as the next frame's current attitude
    #[arg(long)]
    pub simulate_gimbal: bool,

    /// Write an annotated PNG per frame into this directory
    #[arg(long)]
    pub overlay_dir: Option<PathBuf>,

    /// Emit one JSON report per line instead of the text summary
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(threshold) = args.threshold {
        config.detection.temperature_threshold = threshold;
    }
    if let Some(min_area) = args.min_area {
        config.detection.min_area_pixels = min_area;
    }
    config.validate().context("Invalid configuration")?;

    if let Some(ref dir) = args.overlay_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create overlay directory {}", dir.display()))?;
    }

    if !args.json {
        print_config_summary(&config, args.images.len());
    }

    let pb = if args.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(args.images.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Detecting");

    let mut attitude = GimbalAngles::new(args.azimuth, args.pitch);
    let mut processed = 0usize;

    for (index, path) in args.images.iter().enumerate() {
        pb.inc(1);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let field = match load_thermal_image(path, &config.thermal_image) {
            Ok(field) => field,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                continue;
            }
        };

        let report = match process_frame(index, &field, &config, attitude) {
            Ok(report) => report,
            Err(e) => {
                warn!("Frame {index} ({name}) failed: {e}");
                continue;
            }
        };
        processed += 1;

        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            pb.println(format_frame_report(&report, &name));
        }

        if let Some(ref dir) = args.overlay_dir {
            let threshold = config.detection.temperature_threshold;
            write_frame_overlay(dir, path, index, &field, &report, threshold);
        }

        if args.simulate_gimbal {
            if let Some(GimbalCommand::Actuate(angles)) = report.command {
                attitude = angles;
            }
        }
    }

    pb.finish_with_message(format!("Detected ({processed}/{})", args.images.len()));

    if processed == 0 {
        bail!("No frames could be processed");
    }
    Ok(())
}

/// Write `<stem>_overlay.png` into `dir`. A failed write is logged and the
/// frame loop carries on; returns whether the overlay was written.
fn write_frame_overlay(
    dir: &Path,
    image_path: &Path,
    index: usize,
    field: &TemperatureField,
    report: &FrameReport,
    threshold: f32,
) -> bool {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("frame_{index:04}"));
    let out = dir.join(format!("{stem}_overlay.png"));
    match save_overlay(&render_overlay(field, report, threshold), &out) {
        Ok(()) => true,
        Err(e) => {
            warn!("Frame {index}: {e:#}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_report(field: &TemperatureField) -> FrameReport {
        FrameReport {
            frame_index: 0,
            width: field.width(),
            height: field.height(),
            hotspots: Vec::new(),
            targets: Vec::new(),
            command: None,
        }
    }

    #[test]
    fn test_overlay_written_next_to_stem() {
        let dir = tempfile::tempdir().unwrap();
        let field = TemperatureField::filled(8, 6, 20.0);
        let report = empty_report(&field);

        assert!(write_frame_overlay(
            dir.path(),
            Path::new("frames/burn_007.png"),
            7,
            &field,
            &report,
            250.0
        ));
        let written = image::open(dir.path().join("burn_007_overlay.png")).unwrap();
        assert_eq!((written.width(), written.height()), (8, 6));
    }

    #[test]
    fn test_overlay_write_failure_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not_created");
        let field = TemperatureField::filled(4, 4, 20.0);
        let report = empty_report(&field);

        assert!(!write_frame_overlay(
            &missing,
            Path::new("a.png"),
            0,
            &field,
            &report,
            250.0
        ));
        // The next frame still gets its overlay.
        assert!(write_frame_overlay(
            dir.path(),
            Path::new("b.png"),
            1,
            &field,
            &report,
            250.0
        ));
    }
}
