use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pyrosight_core::aim::{resolve_or_hold, GimbalAngles, GimbalCommand};
use pyrosight_core::projection::Point2;

use super::load_config;

#[derive(Args)]
pub struct AimArgs {
    /// Target column in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,

    /// Target row in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub y: f64,

    /// Session config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Image width (defaults to the configured sensor width)
    #[arg(long)]
    pub width: Option<usize>,

    /// Image height (defaults to the configured sensor height)
    #[arg(long)]
    pub height: Option<usize>,

    /// Current gimbal azimuth in degrees
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub azimuth: f64,

    /// Current gimbal pitch in degrees
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub pitch: f64,
}

pub fn run(args: &AimArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let width = args
        .width
        .unwrap_or(config.thermal_image.width as usize);
    let height = args
        .height
        .unwrap_or(config.thermal_image.height as usize);

    let geometry = config.aim_geometry(width, height);
    let target = Point2::new(args.x, args.y);
    let current = GimbalAngles::new(args.azimuth, args.pitch);

    println!("Aim ({:.2}, {:.2}) in {}x{}", target.x, target.y, width, height);

    match resolve_or_hold(target, &geometry, current, config.gimbal.nozzle_offset) {
        GimbalCommand::Actuate(angles) => {
            let (horizontal, vertical) = geometry.angular_offset(target);
            println!("  Offset:   h {horizontal:+.3}\u{b0}, v {vertical:+.3}\u{b0}");
            println!("  Command:  {angles}");
        }
        GimbalCommand::Hold(angles) => {
            println!("  Invalid aim geometry, holding {angles}");
        }
    }

    Ok(())
}
