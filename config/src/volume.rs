use serde::{Deserialize, Serialize};

/// A bind mount from the host into the application container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub docker_dir: String,
    pub host_dir: String,
}

impl Volume {
    pub fn new(docker_dir: &str, host_dir: &str) -> Self {
        Self {
            docker_dir: docker_dir.to_string(),
            host_dir: host_dir.to_string(),
        }
    }

    /// `HOST:CONTAINER`, the form docker expects for bind mounts.
    pub fn bind(&self) -> String {
        format!("{}:{}", self.host_dir, self.docker_dir)
    }
}

/// Flattens volumes into `[docker0, host0, docker1, host1, ...]`.
pub fn flatten_volumes(volumes: &[Volume]) -> Vec<String> {
    volumes
        .iter()
        .flat_map(|v| [v.docker_dir.clone(), v.host_dir.clone()])
        .collect()
}

/// Inverse of [`flatten_volumes`]. A trailing unpaired entry is dropped.
pub fn unflatten_volumes(dirs: Vec<String>) -> Vec<Volume> {
    dirs.chunks_exact(2)
        .map(|pair| Volume {
            docker_dir: pair[0].clone(),
            host_dir: pair[1].clone(),
        })
        .collect()
}
