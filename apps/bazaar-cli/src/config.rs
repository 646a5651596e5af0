//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use bazaar_core::PriceMode;
use serde::{Deserialize, Serialize};
use std::env;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// tracing filter directive (`BAZAAR_LOG`, default: "info")
    pub log_filter: String,

    /// Price mode for `prices` when none is given (`BAZAAR_PRICE_MODE`, default: Each)
    pub default_price_mode: PriceMode,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = lookup("BAZAAR_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        let default_price_mode = match lookup("BAZAAR_PRICE_MODE") {
            Some(raw) if !raw.trim().is_empty() => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BAZAAR_PRICE_MODE".to_string()))?,
            _ => PriceMode::Each,
        };

        Ok(CliConfig {
            log_filter,
            default_price_mode,
        })
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_filter: "info".to_string(),
            default_price_mode: PriceMode::Each,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::from_lookup(lookup(&[
            ("BAZAAR_LOG", "bazaar_core=debug"),
            ("BAZAAR_PRICE_MODE", "total"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "bazaar_core=debug");
        assert_eq!(config.default_price_mode, PriceMode::Total);
    }

    #[test]
    fn test_invalid_price_mode() {
        let err = CliConfig::from_lookup(lookup(&[("BAZAAR_PRICE_MODE", "bulk")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for BAZAAR_PRICE_MODE");
    }
}
