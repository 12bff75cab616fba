use crate::builder::Builder;
use crate::confirm::{confirm, diff};
use crate::environment::Environment;
use crate::error::ConfigError;
use crate::kind::DeploymentKind;
use crate::model::{Config, ResolutionState};
use crate::prompt::Prompter;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Saved,
    Unchanged,
}

/// Interactive configuration: load, migrate, fill in what is missing, let
/// the operator confirm the changes and persist them.
///
/// `kind` switches the deployment kind before resolving. When the operator
/// rejects the changes nothing is written.
pub fn configure(
    path: &Path,
    kind: Option<DeploymentKind>,
    prompter: Prompter,
    env: &dyn Environment,
) -> Result<Outcome, ConfigError> {
    let mut config = Config::load(path);
    let before = config.clone();

    if let Some(kind) = kind {
        config.kind = Some(kind);
    }
    let migrated = config.migrate();

    let mut builder = Builder::new(prompter, config.deployment_kind());
    config.resolve(&mut builder, env)?;

    let state = ResolutionState {
        mutated: builder.needs_config() || config != before,
        dry_run: false,
    };

    // dropping deprecated fields shows up in no diff but still has to be written
    let changes = diff(&before, &config);
    if !confirm(&changes, builder.prompter())? && !migrated {
        tracing::info!("Configuration unchanged");
        return Ok(Outcome::Unchanged);
    }

    if config.save(path, &state)? {
        return Ok(Outcome::Saved);
    }
    Ok(Outcome::Unchanged)
}

/// Loads and migrates the config, failing unless it is complete.
pub fn load_complete(path: &Path, env: &dyn Environment) -> Result<Config, ConfigError> {
    let mut config = Config::load(path);
    config.migrate();

    if !config.validate_complete(env)? {
        return Err(ConfigError::Incomplete {
            missing: config.missing_fields(),
        });
    }
    Ok(config)
}
