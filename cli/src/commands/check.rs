use crate::error::CliError;
use std::path::Path;
use tailpod_config::{ConfigError, HostEnvironment, load_complete};

/// Reports whether the config at `path` is ready to deploy.
pub fn check_config(path: &Path) -> Result<(), CliError> {
    let env = HostEnvironment::current()?;

    match load_complete(path, &env) {
        Ok(config) => {
            println!(
                "{} is complete ({})",
                path.display(),
                config.deployment_kind()
            );
            Ok(())
        }
        Err(ConfigError::Incomplete { missing }) => {
            println!("{} is missing:", path.display());
            for field in &missing {
                println!("  {}", field);
            }
            Err(ConfigError::Incomplete { missing }.into())
        }
        Err(e) => Err(e.into()),
    }
}
