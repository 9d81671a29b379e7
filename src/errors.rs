use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by the statistics engine and its request layer.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, StatsError>;

impl From<std::io::Error> for StatsError {
    fn from(err: std::io::Error) -> Self {
        StatsError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        StatsError::StorageError(err.to_string())
    }
}
