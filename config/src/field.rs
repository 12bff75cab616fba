//! Typed descriptors for every configuration field.
//!
//! Each descriptor pairs accessors for one `Config` field with the set of
//! deployment kinds the field is meaningful for. The table is fixed at compile
//! time, so asking for a field that does not exist or reading it as the wrong
//! type cannot be written down.

use crate::kind::DeploymentKind;
use crate::model::Config;
use crate::volume::Volume;

pub struct Field<T: 'static> {
    pub name: &'static str,
    pub label: &'static str,
    tags: &'static [DeploymentKind],
    get: fn(&Config) -> &Option<T>,
    slot: fn(&mut Config) -> &mut Option<T>,
}

impl<T> Field<T> {
    pub fn value_of<'a>(&self, config: &'a Config) -> Option<&'a T> {
        (self.get)(config).as_ref()
    }

    pub fn tags_of(&self) -> &'static [DeploymentKind] {
        self.tags
    }

    pub fn applies_to(&self, kind: DeploymentKind) -> bool {
        self.tags.contains(&kind)
    }

    pub(crate) fn store(&self, config: &mut Config, value: T) {
        *(self.slot)(config) = Some(value);
    }
}

/// Human readable form of a field value, used in summaries and diffs.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for String {
    fn render(&self) -> String {
        self.clone()
    }
}

impl Render for u16 {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for bool {
    fn render(&self) -> String {
        let text = if *self { "yes" } else { "no" };
        text.to_string()
    }
}

impl Render for Vec<String> {
    fn render(&self) -> String {
        if self.is_empty() {
            return "(none)".to_string();
        }
        self.join(" ")
    }
}

impl Render for Vec<Volume> {
    fn render(&self) -> String {
        if self.is_empty() {
            return "(none)".to_string();
        }
        self.iter().map(Volume::bind).collect::<Vec<_>>().join(", ")
    }
}

/// Type-erased view of a [`Field`], for walking the whole table.
pub trait Descriptor {
    fn name(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn applies_to(&self, kind: DeploymentKind) -> bool;
    fn is_set(&self, config: &Config) -> bool;
    fn render(&self, config: &Config) -> Option<String>;
    fn differs(&self, a: &Config, b: &Config) -> bool;
}

impl<T: Render + PartialEq> Descriptor for Field<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn label(&self) -> &'static str {
        self.label
    }

    fn applies_to(&self, kind: DeploymentKind) -> bool {
        Field::applies_to(self, kind)
    }

    fn is_set(&self, config: &Config) -> bool {
        self.value_of(config).is_some()
    }

    fn render(&self, config: &Config) -> Option<String> {
        self.value_of(config).map(Render::render)
    }

    fn differs(&self, a: &Config, b: &Config) -> bool {
        self.value_of(a) != self.value_of(b)
    }
}

macro_rules! field {
    ($konst:ident: $ty:ty = $member:ident, $label:expr, [$($kind:ident),*]) => {
        pub const $konst: Field<$ty> = Field {
            name: stringify!($member),
            label: $label,
            tags: &[$(DeploymentKind::$kind),*],
            get: {
                fn get(config: &Config) -> &Option<$ty> {
                    &config.$member
                }
                get
            },
            slot: {
                fn slot(config: &mut Config) -> &mut Option<$ty> {
                    &mut config.$member
                }
                slot
            },
        };
    };
}

field!(WORK_DIR: String = work_dir, "Working directory", [Go, DockerImage, DockerFile]);
field!(EXEC_NAME: String = exec_name, "Executable", [Go]);
field!(IMAGE_NAME: String = image_name, "Docker image", [Go, DockerImage, DockerFile]);
field!(HOSTNAME: String = hostname, "Tailscale hostname", [Go, DockerImage, DockerFile]);
field!(BUILD_PATH: String = build_path, "Build path", [Go, DockerFile]);
field!(EXEC_ARGS: Vec<String> = exec_args, "Arguments", [Go, DockerImage]);
field!(PORT: u16 = port, "TCP port", [Go, DockerImage, DockerFile]);
field!(FUNNEL: bool = funnel, "Start a Tailscale funnel", [Go, DockerImage, DockerFile]);
field!(VOLUMES: Vec<Volume> = volumes, "Volumes", [Go, DockerImage, DockerFile]);

/// Every resolvable field, in resolution order.
pub const FIELDS: &[&dyn Descriptor] = &[
    &WORK_DIR,
    &EXEC_NAME,
    &IMAGE_NAME,
    &HOSTNAME,
    &BUILD_PATH,
    &EXEC_ARGS,
    &PORT,
    &FUNNEL,
    &VOLUMES,
];

/// Names of the fields that apply to `kind` but are not set yet.
pub fn missing_fields(config: &Config, kind: DeploymentKind) -> Vec<String> {
    FIELDS
        .iter()
        .filter(|f| f.applies_to(kind) && !f.is_set(config))
        .map(|f| f.name().to_string())
        .collect()
}

/// Multi-line summary of every set field.
pub fn summary(config: &Config) -> String {
    let mut out = format!("Deployment kind: {}\n", config.deployment_kind());
    for field in FIELDS {
        if let Some(value) = field.render(config) {
            out.push_str(&format!("{}: {}\n", field.label(), value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_of() {
        let config = Config {
            exec_name: Some("myapp".to_string()),
            port: Some(8080),
            ..Default::default()
        };

        assert_eq!(EXEC_NAME.value_of(&config), Some(&"myapp".to_string()));
        assert_eq!(PORT.value_of(&config), Some(&8080));
        assert_eq!(FUNNEL.value_of(&config), None);
    }

    #[test]
    fn test_tags() {
        assert_eq!(EXEC_NAME.tags_of(), &[DeploymentKind::Go]);
        assert!(BUILD_PATH.applies_to(DeploymentKind::DockerFile));
        assert!(!BUILD_PATH.applies_to(DeploymentKind::DockerImage));
        assert_eq!(VOLUMES.tags_of().len(), 3);
    }

    #[test]
    fn test_store() {
        let mut config = Config::default();
        FUNNEL.store(&mut config, true);
        assert_eq!(config.funnel, Some(true));
    }

    #[test]
    fn test_missing_fields_respects_kind() {
        let config = Config {
            work_dir: Some("/src".to_string()),
            image_name: Some("nginx:latest".to_string()),
            ..Default::default()
        };

        let missing = missing_fields(&config, DeploymentKind::DockerImage);
        assert_eq!(missing, vec!["hostname", "exec_args", "port", "funnel", "volumes"]);

        let missing = missing_fields(&config, DeploymentKind::Go);
        assert!(missing.contains(&"exec_name".to_string()));
        assert!(missing.contains(&"build_path".to_string()));
    }

    #[test]
    fn test_summary() {
        let config = Config {
            exec_name: Some("myapp".to_string()),
            funnel: Some(false),
            volumes: Some(vec![Volume::new("/data", "/srv/data")]),
            ..Default::default()
        };

        let text = summary(&config);
        assert!(text.contains("Deployment kind: go\n"));
        assert!(text.contains("Executable: myapp\n"));
        assert!(text.contains("Start a Tailscale funnel: no\n"));
        assert!(text.contains("Volumes: /srv/data:/data\n"));
        assert!(!text.contains("TCP port"));
    }
}
