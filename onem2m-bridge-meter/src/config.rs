//! Configuration for the meter bridge.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use meterlink_common::{
    Credentials, DEFAULT_CSE_ROOT, DEFAULT_ENDPOINT, LoggingConfig, ServerEndpoint,
};

/// Number of readings published when no runtime is requested
/// (about two minutes at the default 10-second interval).
pub const DEFAULT_ITERATIONS: u64 = 13;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete bridge configuration.
///
/// Every field has a default, so the config file is optional; CLI arguments
/// override individual fields on top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeterBridgeConfig {
    /// Remote CSE settings
    #[serde(default)]
    pub cse: CseConfig,

    /// Meter identity and publishing cadence
    #[serde(default)]
    pub meter: MeterConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote CSE settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CseConfig {
    /// CSE address as `IP:Port`, checked by the loose dotted-quad rule.
    #[serde(default = "default_address")]
    pub address: String,

    /// Originator login, passed through verbatim.
    #[serde(default = "default_login")]
    pub login: String,

    /// Originator secret, passed through verbatim.
    #[serde(default = "default_secret")]
    pub secret: String,

    /// SP-relative root the application entity is created under.
    #[serde(default = "default_root")]
    pub root: String,

    /// Opaque request identifier sent with every call.
    #[serde(default = "default_ticket")]
    pub request_ticket: String,

    /// Per-call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_address() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_login() -> String {
    "admin".to_string()
}

fn default_secret() -> String {
    "admin".to_string()
}

fn default_root() -> String {
    DEFAULT_CSE_ROOT.to_string()
}

fn default_ticket() -> String {
    "5555".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for CseConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            login: default_login(),
            secret: default_secret(),
            root: default_root(),
            request_ticket: default_ticket(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl CseConfig {
    /// Parse the configured address with the lexical separator-count rule.
    pub fn endpoint(&self) -> Result<ServerEndpoint, ConfigError> {
        self.address
            .parse()
            .map_err(|e| ConfigError::Validation(format!("{}", e)))
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.login, &self.secret)
    }
}

/// Meter identity and publishing cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterConfig {
    /// Resource name of the application entity.
    #[serde(default = "default_ae_name")]
    pub ae_name: String,

    /// Application identifier. Mandatory for AE creation.
    #[serde(default = "default_app_id")]
    pub app_id: String,

    /// Container holding the static device description.
    #[serde(default = "default_descriptor_container")]
    pub descriptor_container: String,

    /// Container holding the reading time series.
    #[serde(default = "default_data_container")]
    pub data_container: String,

    /// Free-form description published once into the descriptor container.
    #[serde(default = "default_descriptor")]
    pub descriptor: String,

    /// Seconds between published readings.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Requested run time in minutes. `None` falls back to the default
    /// iteration count.
    #[serde(default)]
    pub runtime_minutes: Option<u64>,
}

fn default_ae_name() -> String {
    "MY_METER".to_string()
}

fn default_app_id() -> String {
    "app1".to_string()
}

fn default_descriptor_container() -> String {
    "DESCRIPTOR".to_string()
}

fn default_data_container() -> String {
    "DATA".to_string()
}

fn default_descriptor() -> String {
    "type = Utility_Meter\nlocation = Home\nappId = MY_METER".to_string()
}

fn default_interval_secs() -> u64 {
    10
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            ae_name: default_ae_name(),
            app_id: default_app_id(),
            descriptor_container: default_descriptor_container(),
            data_container: default_data_container(),
            descriptor: default_descriptor(),
            interval_secs: default_interval_secs(),
            runtime_minutes: None,
        }
    }
}

impl MeterConfig {
    /// Number of readings the publisher loop will emit:
    /// `60 * minutes / interval + 1` (integer division), or the fixed
    /// default when no runtime was requested.
    pub fn iterations(&self) -> u64 {
        match self.runtime_minutes {
            Some(minutes) => 60 * minutes / self.interval_secs + 1,
            None => DEFAULT_ITERATIONS,
        }
    }
}

/// Parse a runtime-minutes argument with parse-or-zero semantics:
/// anything non-numeric counts as zero minutes.
pub fn parse_runtime_minutes(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

impl MeterBridgeConfig {
    /// Load configuration from a JSON5 file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: MeterBridgeConfig = json5::from_str(&content)?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Must pass before any network activity is attempted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cse.endpoint()?;

        if self.meter.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "interval_secs must be at least 1".to_string(),
            ));
        }

        for (field, value) in [
            ("ae_name", &self.meter.ae_name),
            ("app_id", &self.meter.app_id),
            ("descriptor_container", &self.meter.descriptor_container),
            ("data_container", &self.meter.data_container),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{} cannot be empty",
                    field
                )));
            }
        }

        Ok(())
    }
}
