use thiserror::Error;

/// Error type for the Sentinel server binary, aggregating errors from the
/// workspace crates plus the server's own configuration and IO failures.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("gate error: {0}")]
    Gate(#[from] sentinel_gate::GateError),

    #[error("crypto error: {0}")]
    Core(#[from] sentinel_core::CoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ServerError {
    fn from(e: toml::de::Error) -> Self {
        ServerError::Config(format!("TOML parse error: {}", e))
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(e: serde_json::Error) -> Self {
        ServerError::Serialization(e.to_string())
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
