use institution_core::{ApiError, ConfigError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A failure the view operations swallowed and recorded.
    #[error("{0}")]
    Request(String),

    #[error("missing required fields: {0}")]
    MissingFields(String),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}
