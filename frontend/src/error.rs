use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum PlayerError {
    #[error("Player library unavailable: {0}")]
    Unavailable(String),

    #[error("Player setup failed: {0}")]
    Setup(String),
}
