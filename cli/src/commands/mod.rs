pub mod check;
pub mod config;
pub mod generate;
pub mod lifecycle;

pub use check::check_config;
pub use config::configure_interactive;
pub use generate::generate_artifacts;
pub use lifecycle::{Action, handle_lifecycle};
