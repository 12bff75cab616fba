use tailpod_config::ConfigError;
use tailpod_generate::GenerateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("required tools not found on PATH: {}", .0.join(", "))]
    MissingTools(Vec<String>),

    #[error("TS_AUTHKEY environment variable must be set")]
    AuthKeyMissing,

    #[error("{program} exited with status {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: i32,
        stderr: String,
    },

    #[error("{0} was terminated by a signal")]
    Killed(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
