use crate::kind::DeploymentKind;
use crate::model::Config;

impl Config {
    /// Upgrades a config written by an older release to the current shape.
    ///
    /// Every rule only fills fields that are still unset, so migrating an
    /// up-to-date config changes nothing. Returns whether anything changed.
    pub fn migrate(&mut self) -> bool {
        let before = self.clone();

        // `go build ./cmd/foo` became `build_path = ./cmd/foo`
        if let Some(command) = self.compile_command.take()
            && self.build_path.is_none()
        {
            self.build_path = command.last().cloned();
        }

        if self.kind.is_none() {
            self.kind = Some(DeploymentKind::Go);
        }

        if self.kind == Some(DeploymentKind::Go)
            && let Some(exec_name) = self.exec_name.clone()
        {
            self.image_name.get_or_insert_with(|| exec_name.clone());
            self.hostname.get_or_insert(exec_name);
        }

        let changed = *self != before;
        if changed {
            tracing::info!("Migrated configuration to the current format");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_command_becomes_build_path() {
        let mut config: Config =
            serde_json::from_str(r#"{"compile_command": ["go", "build", "./cmd/myapp"]}"#).unwrap();

        assert!(config.migrate());

        assert_eq!(config.build_path, Some("./cmd/myapp".to_string()));
        assert_eq!(config.compile_command, None);
        assert!(!config.to_json().unwrap().contains("compile_command"));
    }

    #[test]
    fn test_compile_command_does_not_override_build_path() {
        let mut config = Config {
            build_path: Some("./cmd/new".to_string()),
            compile_command: Some(vec![
                "go".to_string(),
                "build".to_string(),
                "./cmd/old".to_string(),
            ]),
            ..Default::default()
        };

        config.migrate();

        assert_eq!(config.build_path, Some("./cmd/new".to_string()));
        assert_eq!(config.compile_command, None);
    }

    #[test]
    fn test_kind_defaults_to_go_and_backfills_names() {
        let mut config = Config {
            exec_name: Some("myapp".to_string()),
            hostname: Some("custom".to_string()),
            ..Default::default()
        };

        config.migrate();

        assert_eq!(config.kind, Some(DeploymentKind::Go));
        assert_eq!(config.image_name, Some("myapp".to_string()));
        assert_eq!(config.hostname, Some("custom".to_string()));
    }

    #[test]
    fn test_names_not_backfilled_for_other_kinds() {
        let mut config = Config {
            kind: Some(DeploymentKind::DockerImage),
            exec_name: Some("myapp".to_string()),
            ..Default::default()
        };

        assert!(!config.migrate());
        assert_eq!(config.image_name, None);
        assert_eq!(config.hostname, None);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let mut config: Config = serde_json::from_str(
            r#"{"exec_name": "myapp", "compile_command": ["go", "build", "./cmd/myapp"]}"#,
        )
        .unwrap();

        assert!(config.migrate());
        let once = config.clone();
        assert!(!config.migrate());
        assert_eq!(config, once);
    }
}
