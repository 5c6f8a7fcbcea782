//! Service configuration module.
//!
//! Supports configuration via environment variables:
//!
//! ```bash
//! # Currency used for seeded accounts and defaults
//! SHAMBA_DEFAULT_CURRENCY=GHS
//!
//! # Whether newly created workspaces get starter data
//! SHAMBA_SEED_STARTER_DATA=true
//! ```

use std::env;

use thiserror::Error;

/// Service configuration
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Currency code for seeded accounts and new-record defaults.
    pub default_currency: String,
    /// Seed a starter chart of accounts, plots, seasons and employees into
    /// newly created workspaces.
    pub seed_new_workspaces: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_currency: "GHS".to_string(),
            seed_new_workspaces: true,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid boolean for {0}: {1} (expected true/false/1/0)")]
    InvalidBool(&'static str, String),
}

fn env_bool(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(v) => match v.to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ConfigError::InvalidBool(key, v)),
        },
    }
}

impl CoreConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            default_currency: env::var("SHAMBA_DEFAULT_CURRENCY")
                .unwrap_or_else(|_| "GHS".to_string()),
            seed_new_workspaces: env_bool("SHAMBA_SEED_STARTER_DATA", true)?,
        })
    }
}
