use thiserror::Error;

#[derive(Error, Debug)]
pub enum SproutError {
    /// Malformed word token or out-of-range request argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not allowed in the current state (e.g. a closed session)
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Story collaborator returned something we could not use
    #[error("Story error: {0}")]
    Story(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SproutError>;
