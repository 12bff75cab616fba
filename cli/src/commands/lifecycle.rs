use crate::error::CliError;
use crate::runner::run_checked;
use std::fs;
use std::path::{Path, PathBuf};
use tailpod_config::{CONFIG_FILE, Config, HostEnvironment, image_base_name, load_complete};
use tailpod_generate::{BASE_IMAGE, RUN_SCRIPT, TAILSCALE_IMAGE};
use tempfile::TempDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Restart,
    Update,
}

pub fn handle_lifecycle(path: &Path, action: Action) -> Result<(), CliError> {
    let env = HostEnvironment::current()?;
    let config = load_complete(path, &env)?;

    let staging_root = TempDir::new()?;
    let staging = stage(&config, path, staging_root.path())?;
    let hostname = config.hostname.as_deref().unwrap_or_default();

    match action {
        Action::Start => start(&staging, hostname)?,
        Action::Stop => stop(&staging, hostname)?,
        Action::Restart => {
            stop(&staging, hostname)?;
            start(&staging, hostname)?;
        }
        Action::Update => {
            for image in [BASE_IMAGE, TAILSCALE_IMAGE] {
                eprintln!("Pulling {}...", image);
                run_checked("docker", &["pull", image])?;
            }
            stop(&staging, hostname)?;
            start(&staging, hostname)?;
        }
    }

    Ok(())
}

/// Generates the artifacts into a directory of `root` named after the
/// hostname, next to a copy of the config file.
pub(crate) fn stage(
    config: &Config,
    config_path: &Path,
    root: &Path,
) -> Result<PathBuf, CliError> {
    let staging = root.join(staging_name(config.hostname.as_deref().unwrap_or_default()));

    tailpod_generate::generate(config, &staging)?;
    fs::copy(config_path, staging.join(CONFIG_FILE))?;

    tracing::debug!("Staged in {}", staging.display());
    Ok(staging)
}

/// A single path component derived from `hostname`, never `..` or absolute.
fn staging_name(hostname: &str) -> String {
    let name = image_base_name(hostname);
    if name.is_empty() {
        return "app".to_string();
    }
    name
}

fn start(staging: &Path, hostname: &str) -> Result<(), CliError> {
    eprintln!("Starting {}...", hostname);
    let captured = run_checked(staging.join(RUN_SCRIPT), &[] as &[&str])?;
    tracing::debug!(stdout = %captured.stdout, "Run script output");
    eprintln!("{} is running", hostname);
    Ok(())
}

fn stop(staging: &Path, hostname: &str) -> Result<(), CliError> {
    eprintln!("Stopping {}...", hostname);
    run_checked(staging.join(RUN_SCRIPT), &["-stop"])?;
    eprintln!("{} stopped", hostname);
    Ok(())
}
