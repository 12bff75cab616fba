use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("configuration is not complete, missing: {}", missing.join(", "))]
    Incomplete { missing: Vec<String> },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
