use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot derive value: {0}")]
    Underivable(String),

    #[error("configuration is not complete, missing: {}", missing.join(", "))]
    Incomplete { missing: Vec<String> },

    #[error("configuration rejected by operator")]
    Rejected,

    #[error("unknown deployment kind: {0}")]
    UnknownKind(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
