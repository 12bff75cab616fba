mod commands;
mod error;
mod preflight;
mod runner;

use clap::{Parser, Subcommand};
use commands::{Action, check_config, configure_interactive, generate_artifacts, handle_lifecycle};
use std::path::PathBuf;
use tailpod_config::{CONFIG_FILE, DeploymentKind};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tailpod")]
#[command(about = "Run an application in Docker behind a Tailscale sidecar")]
struct Cli {
    /// Path of the configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config_file: PathBuf,

    /// Skip checking that docker, tailscale and jq are installed
    #[arg(long, global = true)]
    skip_preflight: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the configuration interactively
    Config {
        /// Deployment kind: go, dockerimage or dockerfile
        #[arg(long)]
        kind: Option<DeploymentKind>,
    },
    /// Report whether the configuration is complete
    Check,
    /// Write the deployment files
    Generate {
        /// Destination directory
        #[arg(long, short, default_value = ".")]
        out: PathBuf,
    },
    /// Build and start the application
    Start,
    /// Stop the application
    Stop,
    /// Stop, then start the application
    Restart,
    /// Pull the base images, then restart the application
    Update,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();

    if !cli.skip_preflight {
        preflight::check(preflight::REQUIRED_TOOLS)?;
    }

    let path = cli.config_file;
    match cli.command {
        Commands::Config { kind } => configure_interactive(&path, kind)?,
        Commands::Check => check_config(&path)?,
        Commands::Generate { out } => generate_artifacts(&path, &out)?,
        Commands::Start => handle_lifecycle(&path, Action::Start)?,
        Commands::Stop => handle_lifecycle(&path, Action::Stop)?,
        Commands::Restart => handle_lifecycle(&path, Action::Restart)?,
        Commands::Update => handle_lifecycle(&path, Action::Update)?,
    }

    Ok(())
}
