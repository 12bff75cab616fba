use crate::error::GenerateError;
use tailpod_config::{Config, DeploymentKind, Volume};

/// A complete config, with the fields every template needs unwrapped.
pub(crate) struct Target<'a> {
    pub kind: DeploymentKind,
    pub work_dir: &'a str,
    pub exec_name: Option<&'a str>,
    pub image_name: &'a str,
    pub hostname: &'a str,
    pub build_path: Option<&'a str>,
    pub args: &'a [String],
    pub port: u16,
    pub funnel: bool,
    pub volumes: &'a [Volume],
}

impl<'a> Target<'a> {
    pub fn from_config(config: &'a Config) -> Result<Self, GenerateError> {
        let missing = config.missing_fields();
        if !missing.is_empty() {
            return Err(GenerateError::Incomplete { missing });
        }

        let kind = config.deployment_kind();
        let exec_name = match kind {
            DeploymentKind::Go => Some(required(&config.exec_name, "exec_name")?.as_str()),
            _ => None,
        };

        Ok(Self {
            kind,
            work_dir: required(&config.work_dir, "work_dir")?,
            exec_name,
            image_name: required(&config.image_name, "image_name")?,
            hostname: required(&config.hostname, "hostname")?,
            build_path: config.build_path.as_deref(),
            args: config.exec_args.as_deref().unwrap_or_default(),
            port: *required(&config.port, "port")?,
            funnel: *required(&config.funnel, "funnel")?,
            volumes: required(&config.volumes, "volumes")?,
        })
    }
}

fn required<'a, T>(value: &'a Option<T>, name: &str) -> Result<&'a T, GenerateError> {
    value.as_ref().ok_or_else(|| GenerateError::Incomplete {
        missing: vec![name.to_string()],
    })
}
