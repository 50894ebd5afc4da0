//! # Catalog Configuration
//!
//! Behavior switches for the places where catalog revisions disagree.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CATALOG_COMBINE_MODE=family                                        │
//! │     CATALOG_SUMMARY_FORMAT=legacy                                      │
//! │                                                                         │
//! │  2. Default Values (lowest priority)                                   │
//! │     combine_mode = exact, summary_format = quantity                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reading the environment happens only in [`CatalogConfig::from_env`]. The
//! library never reads the config on its own: callers pass its fields to
//! [`BaseProduct::combine_value_with`](crate::product::BaseProduct::combine_value_with)
//! and [`Category::summary`](crate::category::Category::summary). The
//! defaults match what `combine_value` and `Display` use.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use tracing::debug;

use crate::category::SummaryFormat;
use crate::product::CombineMode;

/// Environment variable selecting [`CombineMode`].
pub const COMBINE_MODE_ENV: &str = "CATALOG_COMBINE_MODE";

/// Environment variable selecting [`SummaryFormat`].
pub const SUMMARY_FORMAT_ENV: &str = "CATALOG_SUMMARY_FORMAT";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}. Valid options: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Catalog behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Strictness to pass to `BaseProduct::combine_value_with`.
    #[serde(default)]
    pub combine_mode: CombineMode,

    /// Format to pass to `Category::summary`. `Display` for a category
    /// always uses [`SummaryFormat::Quantity`].
    #[serde(default)]
    pub summary_format: SummaryFormat,
}

impl CatalogConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CatalogConfig::default();

        if let Some(raw) = lookup(COMBINE_MODE_ENV) {
            config.combine_mode = raw
                .parse::<CombineMode>()
                .map_err(|err| rename_key(err, COMBINE_MODE_ENV))?;
        }

        if let Some(raw) = lookup(SUMMARY_FORMAT_ENV) {
            config.summary_format = raw
                .parse::<SummaryFormat>()
                .map_err(|err| rename_key(err, SUMMARY_FORMAT_ENV))?;
        }

        debug!(
            combine_mode = %config.combine_mode,
            summary_format = %config.summary_format,
            "Catalog configuration loaded"
        );
        Ok(config)
    }
}

/// Points a parse error at the variable it came from.
fn rename_key(err: ConfigError, key: &str) -> ConfigError {
    match err {
        ConfigError::InvalidValue { value, expected, .. } => ConfigError::InvalidValue {
            key: key.to_string(),
            value,
            expected,
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
