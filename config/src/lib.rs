//! Resolution of the tailpod configuration.
//!
//! Each field of [`Config`] is kept when already set, otherwise derived from
//! the project on disk or asked from the operator, depending on which
//! [`DeploymentKind`] the field applies to.

mod builder;
mod confirm;
mod environment;
mod error;
pub mod field;
mod kind;
mod migrate;
mod model;
mod prompt;
mod resolve;
mod session;
mod volume;

pub use builder::Builder;
pub use confirm::{Change, confirm, diff};
pub use environment::{Environment, HostEnvironment};
pub use error::ConfigError;
pub use kind::DeploymentKind;
pub use model::{CONFIG_FILE, Config, ResolutionState};
pub use prompt::{GroupItem, LineTokens, NoInput, PromptValue, Prompter, TokenSource};
pub use resolve::{DEFAULT_PORT, image_base_name};
pub use session::{Outcome, configure, load_complete};
pub use volume::{Volume, flatten_volumes, unflatten_volumes};
