//! The field resolution sequence.
//!
//! One call sequence serves every case: a first run walks every field, a
//! re-run after an edit skips straight past the fields already set, and a
//! dry run only records what is missing.

use crate::builder::Builder;
use crate::environment::Environment;
use crate::error::ConfigError;
use crate::field::{
    BUILD_PATH, EXEC_ARGS, EXEC_NAME, FUNNEL, HOSTNAME, IMAGE_NAME, PORT, VOLUMES, WORK_DIR,
    missing_fields,
};
use crate::kind::DeploymentKind;
use crate::model::Config;
use crate::prompt::Prompter;

pub const DEFAULT_PORT: u16 = 80;
const DEFAULT_HOSTNAME: &str = "app";
const GO_BUILD_PROMPT: &str =
    "Enter the path to the directory that contains the main.go (e.g. ./cmd/foo): ";

impl Config {
    /// Fills in every missing field that applies to the builder's kind.
    pub fn resolve(
        &mut self,
        builder: &mut Builder,
        env: &dyn Environment,
    ) -> Result<(), ConfigError> {
        let kind = builder.kind();

        builder.compute(self, &WORK_DIR, |_| env.work_dir());

        builder.compute(self, &EXEC_NAME, |_| env.command_name());
        builder.request_required(self, &EXEC_NAME, "Enter the name of the executable: ")?;

        builder.compute(self, &IMAGE_NAME, |config| derive_image_name(config, kind));
        builder.request_required(
            self,
            &IMAGE_NAME,
            "Enter the Docker image to run (e.g. nginx:latest): ",
        )?;

        builder.compute(self, &HOSTNAME, |config| derive_hostname(config, kind));
        builder.request(
            self,
            &HOSTNAME,
            DEFAULT_HOSTNAME.to_string(),
            "Enter the Tailscale hostname: ",
        )?;

        builder.compute(self, &BUILD_PATH, |config| match kind {
            DeploymentKind::Go => {
                env.go_build_path(config.exec_name.as_deref().unwrap_or_default())
            }
            _ => env.dockerfile_context(),
        });
        match (kind, self.exec_name.clone()) {
            (DeploymentKind::Go, Some(exec_name)) => builder.request(
                self,
                &BUILD_PATH,
                format!("./cmd/{}", exec_name),
                GO_BUILD_PROMPT,
            )?,
            (DeploymentKind::Go, None) => {
                builder.request_required(self, &BUILD_PATH, GO_BUILD_PROMPT)?
            }
            _ => builder.request(
                self,
                &BUILD_PATH,
                ".".to_string(),
                "Enter the directory that contains the Dockerfile (default .): ",
            )?,
        };

        let target = self
            .exec_name
            .clone()
            .or_else(|| self.image_name.clone())
            .unwrap_or_default();
        builder.request_group(
            self,
            &EXEC_ARGS,
            Vec::new(),
            &format!(
                "Enter the command line arguments to pass to \"{}\". \
                 Hit enter after each argument.",
                target
            ),
            &["Arg {}: "],
        )?;

        builder.request(
            self,
            &PORT,
            DEFAULT_PORT,
            "What TCP port is used by the application (default 80): ",
        )?;

        builder.request(
            self,
            &FUNNEL,
            false,
            "Should a Tailscale funnel be started? (y/n): ",
        )?;

        builder.request_group(
            self,
            &VOLUMES,
            Vec::new(),
            "Enter the volumes to mount in the Docker container. Hit enter when done.",
            &["Docker dir (absolute path) {}: ", "Host dir (absolute path) {}: "],
        )?;

        Ok(())
    }

    /// True when a live resolution pass would not need to fill anything.
    ///
    /// Runs the resolution sequence as a dry run on a copy, so neither the
    /// config nor any input is touched. A field that is unset but could be
    /// derived still counts as missing.
    pub fn validate_complete(&self, env: &dyn Environment) -> Result<bool, ConfigError> {
        let mut probe = self.clone();
        let mut builder = Builder::new(Prompter::silent(), self.deployment_kind()).dry_run();
        probe.resolve(&mut builder, env)?;
        Ok(!builder.needs_config())
    }

    /// Names of the applicable fields that are still unset.
    pub fn missing_fields(&self) -> Vec<String> {
        missing_fields(self, self.deployment_kind())
    }
}

fn derive_image_name(config: &Config, kind: DeploymentKind) -> Result<String, ConfigError> {
    match kind {
        DeploymentKind::Go => config
            .exec_name
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ConfigError::Underivable("executable name not set".to_string())),
        DeploymentKind::DockerFile => {
            let work_dir = config
                .work_dir
                .as_deref()
                .ok_or_else(|| ConfigError::Underivable("working directory not set".to_string()))?;
            std::path::Path::new(work_dir)
                .file_name()
                .map(|name| sanitize_name(&name.to_string_lossy()))
                .filter(|name| !name.is_empty())
                .ok_or_else(|| {
                    ConfigError::Underivable(format!("no directory name in {:?}", work_dir))
                })
        }
        DeploymentKind::DockerImage => Err(ConfigError::Underivable(
            "the image to run has to be chosen".to_string(),
        )),
    }
}

fn derive_hostname(config: &Config, kind: DeploymentKind) -> Result<String, ConfigError> {
    let source = match kind {
        DeploymentKind::Go => config.exec_name.as_deref(),
        _ => config.image_name.as_deref(),
    };
    source
        .map(image_base_name)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ConfigError::Underivable("nothing to name the host after".to_string()))
}

/// `ghcr.io/owner/repo:tag` and `repo@sha256:...` both become `repo`.
pub fn image_base_name(image: &str) -> String {
    let without_digest = image.split('@').next().unwrap_or(image);
    let last = without_digest.rsplit('/').next().unwrap_or(without_digest);
    let without_tag = last.split(':').next().unwrap_or(last);
    sanitize_name(without_tag)
}

/// Lowercases and replaces everything but ASCII alphanumerics with `-`.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::HostEnvironment;
    use crate::prompt::tests::{Counting, scripted};
    use crate::volume::Volume;
    use std::io;
    use tempfile::TempDir;

    fn complete_go_config(dir: &TempDir) -> Config {
        Config {
            kind: Some(DeploymentKind::Go),
            work_dir: Some(dir.path().to_string_lossy().to_string()),
            exec_name: Some("myapp".to_string()),
            image_name: Some("myapp".to_string()),
            hostname: Some("myapp".to_string()),
            build_path: Some("./cmd/myapp".to_string()),
            exec_args: Some(vec![]),
            port: Some(8080),
            funnel: Some(false),
            volumes: Some(vec![Volume::new("/data", "/srv/data")]),
            compile_command: None,
        }
    }

    #[test]
    fn test_first_run_go() {
        let dir = TempDir::new().unwrap();
        let env = HostEnvironment::new(dir.path());
        let mut builder = Builder::new(scripted("myapp\n"), DeploymentKind::Go);
        let mut config = Config::default();

        config.resolve(&mut builder, &env).unwrap();

        assert_eq!(config.exec_name, Some("myapp".to_string()));
        assert_eq!(config.image_name, Some("myapp".to_string()));
        assert_eq!(config.hostname, Some("myapp".to_string()));
        assert_eq!(config.build_path, Some("./cmd/myapp".to_string()));
        assert_eq!(config.port, Some(80));
        assert_eq!(config.funnel, Some(false));
        assert_eq!(config.exec_args, Some(vec![]));
        assert_eq!(config.volumes, Some(vec![]));
        assert!(config.work_dir.is_some());
        assert!(builder.needs_config());
        assert!(builder.state().mutated);
        assert!(config.validate_complete(&env).unwrap());
    }

    #[test]
    fn test_first_run_go_without_answers_stays_incomplete() {
        let dir = TempDir::new().unwrap();
        let env = HostEnvironment::new(dir.path());
        let mut builder = Builder::new(scripted(""), DeploymentKind::Go);
        let mut config = Config::default();

        config.resolve(&mut builder, &env).unwrap();

        assert_eq!(config.exec_name, None);
        assert_eq!(config.image_name, None);
        assert_eq!(config.build_path, None);
        assert_eq!(config.hostname, Some("app".to_string()));
        assert!(!config.validate_complete(&env).unwrap());
        assert_eq!(config.missing_fields(), vec!["exec_name", "image_name", "build_path"]);
    }

    #[test]
    fn test_first_run_docker_image_without_image_stays_incomplete() {
        let dir = TempDir::new().unwrap();
        let env = HostEnvironment::new(dir.path());
        let mut builder = Builder::new(scripted("\n"), DeploymentKind::DockerImage);
        let mut config = Config {
            kind: Some(DeploymentKind::DockerImage),
            ..Default::default()
        };

        config.resolve(&mut builder, &env).unwrap();

        assert_eq!(config.image_name, None);
        assert!(!config.validate_complete(&env).unwrap());
    }

    #[test]
    fn test_first_run_go_discovers_command() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("cmd/server")).unwrap();
        let env = HostEnvironment::new(dir.path());
        let script = "--verbose\n\n8443\ny\n/data\n/srv/data\n\n";
        let mut builder = Builder::new(scripted(script), DeploymentKind::Go);
        let mut config = Config::default();

        config.resolve(&mut builder, &env).unwrap();

        assert_eq!(config.exec_name, Some("server".to_string()));
        assert_eq!(config.build_path, Some("./cmd/server".to_string()));
        assert_eq!(config.hostname, Some("server".to_string()));
        assert_eq!(config.exec_args, Some(vec!["--verbose".to_string()]));
        assert_eq!(config.port, Some(8443));
        assert_eq!(config.funnel, Some(true));
        assert_eq!(config.volumes, Some(vec![Volume::new("/data", "/srv/data")]));
    }

    #[test]
    fn test_first_run_docker_image() {
        let dir = TempDir::new().unwrap();
        let env = HostEnvironment::new(dir.path());
        let script = "ghcr.io/acme/web-app:1.2\n\n3000\nn\n\n";
        let mut builder = Builder::new(scripted(script), DeploymentKind::DockerImage);
        let mut config = Config {
            kind: Some(DeploymentKind::DockerImage),
            ..Default::default()
        };

        config.resolve(&mut builder, &env).unwrap();

        assert_eq!(config.exec_name, None);
        assert_eq!(config.build_path, None);
        assert_eq!(config.image_name, Some("ghcr.io/acme/web-app:1.2".to_string()));
        assert_eq!(config.hostname, Some("web-app".to_string()));
        assert_eq!(config.port, Some(3000));
        assert_eq!(config.funnel, Some(false));
        assert!(config.validate_complete(&env).unwrap());
    }

    #[test]
    fn test_first_run_dockerfile() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("My_Service");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join("Dockerfile"), "FROM alpine\n").unwrap();
        let env = HostEnvironment::new(&project);
        let mut builder = Builder::new(scripted(""), DeploymentKind::DockerFile);
        let mut config = Config {
            kind: Some(DeploymentKind::DockerFile),
            ..Default::default()
        };

        config.resolve(&mut builder, &env).unwrap();

        assert_eq!(config.image_name, Some("my-service".to_string()));
        assert_eq!(config.hostname, Some("my-service".to_string()));
        assert_eq!(config.build_path, Some(".".to_string()));
        assert_eq!(config.exec_args, None);
        assert!(config.validate_complete(&env).unwrap());
    }

    #[test]
    fn test_complete_config_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let env = HostEnvironment::new(dir.path());
        let mut config = complete_go_config(&dir);
        let original = config.clone();

        for _ in 0..2 {
            let input = Counting::new("unexpected\n");
            let reads = input.reads.clone();
            let prompter = Prompter::new(Box::new(input), Box::new(io::sink()));
            let mut builder = Builder::new(prompter, DeploymentKind::Go);

            config.resolve(&mut builder, &env).unwrap();

            assert!(!builder.needs_config());
            assert_eq!(*reads.borrow(), 0);
            assert_eq!(config, original);
            assert!(config.validate_complete(&env).unwrap());
        }
    }

    #[test]
    fn test_dry_run_is_pure() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("cmd/myapp")).unwrap();
        let env = HostEnvironment::new(dir.path());
        let input = Counting::new("myapp\n80\n");
        let reads = input.reads.clone();
        let prompter = Prompter::new(Box::new(input), Box::new(io::sink()));
        let mut builder = Builder::new(prompter, DeploymentKind::Go).dry_run();
        let mut config = Config::default();

        config.resolve(&mut builder, &env).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(*reads.borrow(), 0);
        assert!(builder.needs_config());
    }

    #[test]
    fn test_fields_for_other_kinds_do_not_count() {
        let dir = TempDir::new().unwrap();
        let env = HostEnvironment::new(dir.path());
        let mut config = complete_go_config(&dir);
        config.kind = Some(DeploymentKind::DockerImage);
        config.exec_name = None;
        config.build_path = None;

        assert!(config.validate_complete(&env).unwrap());
        assert!(config.missing_fields().is_empty());

        config.kind = Some(DeploymentKind::Go);
        assert!(!config.validate_complete(&env).unwrap());
        assert_eq!(config.missing_fields(), vec!["exec_name", "build_path"]);
    }

    #[test]
    fn test_image_base_name() {
        assert_eq!(image_base_name("nginx"), "nginx");
        assert_eq!(image_base_name("nginx:alpine"), "nginx");
        assert_eq!(image_base_name("ghcr.io/owner/repo:latest"), "repo");
        assert_eq!(image_base_name("localhost:5000/My_App@sha256:abc"), "my-app");
    }
}
