//! # Configuration
//!
//! Layered the usual way, later sources winning:
//!
//! 1. Built-in defaults
//! 2. `coffee-admin.toml` in the working directory, if present
//! 3. `COFFEE_ADMIN__…` environment variables, with `__` between levels
//!    (`COFFEE_ADMIN__ORDERS__TRANSITION_POLICY=permissive`)
//!
//! A `.env` file is loaded into the environment first when one exists.
//!
//! ```toml
//! [gateway]
//! buffer_size = 32
//!
//! [orders]
//! number_prefix = "ORD"
//! transition_policy = "strict"
//! compensate_failed_lines = true
//!
//! [logging]
//! filter = "info"
//! ```

use crate::composer::DEFAULT_PREFIX;
use crate::order_lifecycle::TransitionPolicy;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "coffee-admin.toml";
pub const ENV_PREFIX: &str = "COFFEE_ADMIN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Read(#[from] config::ConfigError),

    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Request channel capacity of every table.
    pub buffer_size: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    pub number_prefix: String,
    pub transition_policy: TransitionPolicy,
    /// Delete an order header again when its lines could not be saved.
    pub compensate_failed_lines: bool,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            number_prefix: DEFAULT_PREFIX.to_string(),
            transition_policy: TransitionPolicy::Strict,
            compensate_failed_lines: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub gateway: GatewayConfig,
    pub orders: OrdersConfig,
    pub logging: LoggingConfig,
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl DashboardConfig {
    /// Loads `.env`, then defaults, `coffee-admin.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_env_file()?;

        let mut builder = Config::builder();
        if Path::new(CONFIG_FILE).exists() {
            builder = builder.add_source(File::with_name(CONFIG_FILE));
        }
        let config: Self = builder
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        config.validate()
    }

    /// Parses TOML text on top of the defaults, without touching the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()
    }

    fn load_env_file() -> Result<(), ConfigError> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
        }
        Ok(())
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.gateway.buffer_size == 0 {
            return Err(ConfigError::Invalid("gateway.buffer_size must be at least 1".into()));
        }
        if self.orders.number_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("orders.number_prefix must not be empty".into()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.gateway.buffer_size, 32);
        assert_eq!(config.orders.number_prefix, "ORD");
        assert_eq!(config.orders.transition_policy, TransitionPolicy::Strict);
        assert!(config.orders.compensate_failed_lines);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [orders]
            transition_policy = "permissive"
            compensate_failed_lines = false
            "#,
        )
        .unwrap();
        assert_eq!(config.orders.transition_policy, TransitionPolicy::Permissive);
        assert!(!config.orders.compensate_failed_lines);
        assert_eq!(config.orders.number_prefix, "ORD");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            DashboardConfig::from_toml_str("[gateway]\nbuffer_size = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml_str("[orders]\ntransition_policy = \"lenient\""),
            Err(ConfigError::Read(_))
        ));
    }
}
