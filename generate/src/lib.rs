//! Deployment artifacts for a complete tailpod configuration.

mod compose;
mod dockerfile;
mod error;
mod script;
mod serve;
mod target;

pub use compose::TAILSCALE_IMAGE;
pub use error::GenerateError;
pub use script::AUTHKEY_MISSING_STATUS;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tailpod_config::{Config, DeploymentKind};
use target::Target;

pub const DOCKERFILE: &str = "Dockerfile";
pub const COMPOSE_FILE: &str = "docker-compose.yaml";
pub const SERVE_CONFIG: &str = "serve.config";
pub const RUN_SCRIPT: &str = "tailpod-run";

/// Base image of the generated Dockerfile.
pub const BASE_IMAGE: &str = "ubuntu:latest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: &'static str,
    pub content: String,
    pub executable: bool,
}

impl Artifact {
    fn file(name: &'static str, content: String) -> Self {
        Self {
            name,
            content,
            executable: false,
        }
    }
}

/// Renders every artifact the configuration's deployment kind needs.
///
/// Only the go kind gets a generated Dockerfile: a dockerfile project brings
/// its own and an image is run as is.
pub fn render(config: &Config) -> Result<Vec<Artifact>, GenerateError> {
    let target = Target::from_config(config)?;
    let mut artifacts = Vec::new();

    if target.kind == DeploymentKind::Go
        && let Some(exec_name) = target.exec_name
    {
        artifacts.push(Artifact::file(DOCKERFILE, dockerfile::render(&target, exec_name)?));
    }
    artifacts.push(Artifact::file(COMPOSE_FILE, compose::render(&target)?));
    artifacts.push(Artifact::file(SERVE_CONFIG, serve::render(&target)?));
    artifacts.push(Artifact {
        name: RUN_SCRIPT,
        content: script::render(&target),
        executable: true,
    });

    Ok(artifacts)
}

/// Writes the artifacts into `dst`, creating it if needed.
pub fn write_artifacts(artifacts: &[Artifact], dst: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    fs::create_dir_all(dst)?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dst.join(artifact.name);
        fs::write(&path, &artifact.content)?;

        if artifact.executable {
            // rwxr-xr-x
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms)?;
        }

        tracing::debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Renders and writes the artifacts for `config` into `dst`.
pub fn generate(config: &Config, dst: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let artifacts = render(config)?;
    let written = write_artifacts(&artifacts, dst)?;
    tracing::info!("Generated {} files in {}", written.len(), dst.display());
    Ok(written)
}
