use crate::error::ConfigError;
use crate::field::Field;
use crate::kind::DeploymentKind;
use crate::model::{Config, ResolutionState};
use crate::prompt::{GroupItem, PromptValue, Prompter};

/// Fills in missing `Config` fields for one deployment kind.
///
/// Every operation keeps a value that is already set. An unset field that
/// applies to the active kind marks the configuration as needing
/// configuration and, unless this is a dry run, is derived from the
/// environment or asked for. Fields that do not apply are left alone and do
/// not count as missing.
pub struct Builder {
    kind: DeploymentKind,
    needs_config: bool,
    dry_run: bool,
    prompter: Prompter,
}

impl Builder {
    pub fn new(prompter: Prompter, kind: DeploymentKind) -> Self {
        Self {
            kind,
            needs_config: false,
            dry_run: false,
            prompter,
        }
    }

    /// Only records whether fields are missing; never prompts and never
    /// stores anything.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    pub fn kind(&self) -> DeploymentKind {
        self.kind
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn needs_config(&self) -> bool {
        self.needs_config
    }

    pub fn state(&self) -> ResolutionState {
        ResolutionState {
            mutated: self.needs_config,
            dry_run: self.dry_run,
        }
    }

    pub fn prompter(&mut self) -> &mut Prompter {
        &mut self.prompter
    }

    fn should_fill<T>(&mut self, config: &Config, field: &Field<T>) -> bool {
        if field.value_of(config).is_some() || !field.applies_to(self.kind) {
            return false;
        }
        self.needs_config = true;
        !self.dry_run
    }

    /// Derives a missing value from the environment. A failed derivation
    /// leaves the field unset.
    pub fn compute<T, F>(&mut self, config: &mut Config, field: &Field<T>, derive: F) -> Option<T>
    where
        T: Clone,
        F: FnOnce(&Config) -> Result<T, ConfigError>,
    {
        if let Some(value) = field.value_of(config) {
            return Some(value.clone());
        }
        if !self.should_fill(config, field) {
            return None;
        }

        match derive(&*config) {
            Ok(value) => {
                tracing::debug!(field = field.name, "Derived value from environment");
                field.store(config, value.clone());
                Some(value)
            }
            Err(e) => {
                tracing::debug!(field = field.name, "Unable to derive value: {}", e);
                None
            }
        }
    }

    /// Asks the operator for a missing value, using `default` when nothing
    /// is entered.
    pub fn request<T: PromptValue>(
        &mut self,
        config: &mut Config,
        field: &Field<T>,
        default: T,
        prompt: &str,
    ) -> Result<Option<T>, ConfigError> {
        if let Some(value) = field.value_of(config) {
            return Ok(Some(value.clone()));
        }
        if !self.should_fill(config, field) {
            return Ok(None);
        }

        let value = self.prompter.read_scalar(prompt)?.unwrap_or(default);
        field.store(config, value.clone());
        Ok(Some(value))
    }

    /// Asks the operator for a missing value that has no sensible default.
    /// When nothing is entered the field stays unset and the configuration
    /// remains incomplete.
    pub fn request_required<T: PromptValue>(
        &mut self,
        config: &mut Config,
        field: &Field<T>,
        prompt: &str,
    ) -> Result<Option<T>, ConfigError> {
        if let Some(value) = field.value_of(config) {
            return Ok(Some(value.clone()));
        }
        if !self.should_fill(config, field) {
            return Ok(None);
        }

        let Some(value) = self.prompter.read_scalar::<T>(prompt)? else {
            tracing::debug!(field = field.name, "No answer, leaving field unset");
            return Ok(None);
        };
        field.store(config, value.clone());
        Ok(Some(value))
    }

    /// Asks the operator for a missing list, one group of `sub_prompts`
    /// answers per element. Entering nothing keeps `defaults`.
    pub fn request_group<T: GroupItem>(
        &mut self,
        config: &mut Config,
        field: &Field<Vec<T>>,
        defaults: Vec<T>,
        prompt: &str,
        sub_prompts: &[&str],
    ) -> Result<Option<Vec<T>>, ConfigError> {
        if let Some(values) = field.value_of(config) {
            return Ok(Some(values.clone()));
        }
        if !self.should_fill(config, field) {
            return Ok(None);
        }

        let scalars = self
            .prompter
            .read_group(prompt, sub_prompts, T::flatten(&defaults))?;
        let values = T::unflatten(scalars);
        field.store(config, values.clone());
        Ok(Some(values))
    }
}
