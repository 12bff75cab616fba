use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the application is wrapped before it is started next to the Tailscale sidecar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentKind {
    /// A Go executable compiled on the host and copied into an ubuntu image.
    #[default]
    Go,
    /// A pre-built image pulled from a registry.
    DockerImage,
    /// A Dockerfile living in the project.
    DockerFile,
}

impl DeploymentKind {
    pub const ALL: &'static [DeploymentKind] = &[
        DeploymentKind::Go,
        DeploymentKind::DockerImage,
        DeploymentKind::DockerFile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentKind::Go => "go",
            DeploymentKind::DockerImage => "dockerimage",
            DeploymentKind::DockerFile => "dockerfile",
        }
    }
}

impl std::fmt::Display for DeploymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeploymentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        DeploymentKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or(ConfigError::UnknownKind(s))
    }
}
