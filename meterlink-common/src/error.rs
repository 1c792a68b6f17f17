use thiserror::Error;

/// Common error type for meterlink components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid endpoint '{raw}': {reason}")]
    Endpoint { raw: String, reason: String },
}

/// Result type alias using meterlink's Error.
pub type Result<T> = std::result::Result<T, Error>;
