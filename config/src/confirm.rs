use crate::error::ConfigError;
use crate::field::FIELDS;
use crate::model::Config;
use crate::prompt::Prompter;

/// One field whose value differs between two configs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub field: &'static str,
    pub label: &'static str,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl std::fmt::Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let after = self.after.as_deref().unwrap_or("(unset)");
        match &self.before {
            Some(before) => write!(f, "{}: {} -> {}", self.label, before, after),
            None => write!(f, "{}: {}", self.label, after),
        }
    }
}

/// Field-by-field differences from `before` to `after`.
pub fn diff(before: &Config, after: &Config) -> Vec<Change> {
    let mut changes = Vec::new();

    if before.kind != after.kind {
        changes.push(Change {
            field: "kind",
            label: "Deployment kind",
            before: before.kind.map(|k| k.to_string()),
            after: after.kind.map(|k| k.to_string()),
        });
    }

    for field in FIELDS {
        if field.differs(before, after) {
            changes.push(Change {
                field: field.name(),
                label: field.label(),
                before: field.render(before),
                after: field.render(after),
            });
        }
    }

    changes
}

/// Shows `changes` and asks the operator to accept them.
///
/// Returns `Ok(false)` without asking when there is nothing to accept.
/// Anything but a yes is [`ConfigError::Rejected`].
pub fn confirm(changes: &[Change], prompter: &mut Prompter) -> Result<bool, ConfigError> {
    if changes.is_empty() {
        return Ok(false);
    }

    let mut summary = String::from("\n\n**********************************\n\n");
    for change in changes {
        summary.push_str(&format!("{}\n", change));
    }
    summary.push('\n');
    prompter.say(&summary)?;

    match prompter.read_scalar::<bool>("Are these correct? (y/n): ")? {
        Some(true) => Ok(true),
        _ => Err(ConfigError::Rejected),
    }
}
