//! Server error types

use pipedag_core::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid CORS {0}: {1:?}")]
    InvalidCors(&'static str, String),

    #[error("Failed to bind {0}: {1}")]
    BindError(String, String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
