use crate::error::CliError;

/// Tools the generated run script calls into.
pub const REQUIRED_TOOLS: &[&str] = &["docker", "tailscale", "jq"];

/// Fails with every tool from `tools` that is not on `PATH`.
pub fn check(tools: &[&str]) -> Result<(), CliError> {
    let mut missing = Vec::new();
    for tool in tools {
        match which::which(tool) {
            Ok(path) => tracing::debug!("Found {} at {}", tool, path.display()),
            Err(_) => missing.push(tool.to_string()),
        }
    }

    if missing.is_empty() {
        return Ok(());
    }
    tracing::warn!(?missing, "Pre-flight check failed");
    Err(CliError::MissingTools(missing))
}
