mod commands;
mod overlay;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pyrosight", about = "Thermal fire detection and nozzle aiming")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect fires in thermal frames and compute gimbal commands
    Detect(commands::detect::DetectArgs),
    /// Resolve gimbal angles for a single pixel
    Aim(commands::aim::AimArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Detect(args) => commands::detect::run(args),
        Commands::Aim(args) => commands::aim::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
