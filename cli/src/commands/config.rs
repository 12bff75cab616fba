use crate::error::CliError;
use std::path::Path;
use tailpod_config::{DeploymentKind, HostEnvironment, Outcome, Prompter, configure};

pub fn configure_interactive(path: &Path, kind: Option<DeploymentKind>) -> Result<(), CliError> {
    let env = HostEnvironment::current()?;

    match configure(path, kind, Prompter::stdio(), &env)? {
        Outcome::Saved => eprintln!("Configuration saved to {}", path.display()),
        Outcome::Unchanged => eprintln!("Configuration unchanged"),
    }
    Ok(())
}
