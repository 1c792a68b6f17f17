//! Meterlink Common Library
//!
//! This crate provides shared types and utilities for meterlink oneM2M
//! clients:
//!
//! - [`endpoint`] - CSE server endpoint and pass-through credentials
//! - [`address`] - Resource-tree address builders
//! - [`config`] - Logging configuration
//! - [`error`] - Error types

pub mod address;
pub mod config;
pub mod endpoint;
pub mod error;

// Re-export commonly used types at the crate root
pub use address::{AddressBuilder, DEFAULT_CSE_ROOT, ResourceAddress};
pub use config::{LogFormat, LoggingConfig};
pub use endpoint::{Credentials, DEFAULT_ENDPOINT, ServerEndpoint};
pub use error::{Error, Result};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
