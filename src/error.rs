use thiserror::Error;

#[derive(Error, Debug)]
pub enum SidekiqPushError {
    #[error("{0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid job: {message}")]
    InvalidJob { message: String },

    /// Failure reported by a queue backend, carried with the backend's own text.
    #[error("{0}")]
    Backend(String),
}

impl From<toml::de::Error> for SidekiqPushError {
    fn from(err: toml::de::Error) -> Self {
        SidekiqPushError::Config(format!("TOML deserialization error: {}", err))
    }
}
