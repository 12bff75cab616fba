use crate::error::ConfigError;
use crate::kind::DeploymentKind;
use crate::volume::Volume;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub const CONFIG_FILE: &str = ".tailpod";

/// The persisted configuration. Every field is optional: `None` means the
/// resolution pass still has to fill it in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DeploymentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funnel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<Volume>>,
    /// Replaced by `build_path`. Only read so that `migrate` can convert old files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile_command: Option<Vec<String>>,
}

/// Outcome of one resolution pass. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionState {
    pub mutated: bool,
    pub dry_run: bool,
}

impl Config {
    /// The active deployment kind, falling back to the default when unset.
    pub fn deployment_kind(&self) -> DeploymentKind {
        self.kind.unwrap_or_default()
    }

    /// Reads the config file. A missing or unreadable file is a first run and
    /// yields an empty config.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {:?}, starting empty", path);
                return Self::default();
            }
            Err(e) => {
                tracing::warn!("Unable to read {:?}: {}", path, e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring unparsable config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Writes the config when the pass changed something. Returns whether the
    /// file was written.
    ///
    /// The new content goes to a temporary file next to `path` which is then
    /// renamed over it, so the old file survives a failed write.
    pub fn save(
        &self,
        path: impl AsRef<Path>,
        state: &ResolutionState,
    ) -> Result<bool, ConfigError> {
        if state.dry_run || !state.mutated {
            return Ok(false);
        }

        let path = path.as_ref();
        let json = self.to_json()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        tracing::info!("Config saved to {:?}", path);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn complete_config() -> Config {
        Config {
            kind: Some(DeploymentKind::Go),
            work_dir: Some("/home/me/myapp".to_string()),
            exec_name: Some("myapp".to_string()),
            image_name: Some("myapp".to_string()),
            hostname: Some("myapp".to_string()),
            build_path: Some("./cmd/myapp".to_string()),
            exec_args: Some(vec!["-v".to_string(), "--listen=:8080".to_string()]),
            port: Some(8080),
            funnel: Some(true),
            volumes: Some(vec![
                Volume::new("/data", "/srv/data"),
                Volume::new("/etc/app", "/etc/myapp"),
            ]),
            compile_command: None,
        }
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let config = Config {
            port: Some(80),
            exec_args: Some(vec![]),
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"port\": 80"));
        assert!(json.contains("\"exec_args\": []"));
        assert!(!json.contains("exec_name"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_encoding_is_stable() {
        let first = complete_config().to_json().unwrap();
        let decoded: Config = serde_json::from_str(&first).unwrap();
        let second = decoded.to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path().join(CONFIG_FILE));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_garbage_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = complete_config();

        let state = ResolutionState { mutated: true, dry_run: false };
        assert!(config.save(&path, &state).unwrap());
        assert_eq!(Config::load(&path), config);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), config.to_json().unwrap());
    }

    #[test]
    fn test_save_skipped_without_changes_or_in_dry_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = complete_config();

        let unchanged = ResolutionState { mutated: false, dry_run: false };
        assert!(!config.save(&path, &unchanged).unwrap());
        let dry = ResolutionState { mutated: true, dry_run: true };
        assert!(!config.save(&path, &dry).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "old").unwrap();

        let state = ResolutionState { mutated: true, dry_run: false };
        complete_config().save(&path, &state).unwrap();
        assert_eq!(Config::load(&path), complete_config());
    }
}
