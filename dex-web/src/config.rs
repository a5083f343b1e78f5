//! Build-time configuration.
//!
//! The bundle has no process environment at runtime, so values are baked in
//! with `option_env!` when the wasm is compiled (for example
//! `DEX_DEFAULT_CHAIN=arbitrum trunk build`). Anything missing falls back to
//! [`AppConfig::default`].

use std::sync::OnceLock;

use lib_evm::client::{DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL_MS};
use shared::chains::ChainKey;

use crate::error::{AppError, Result};

pub const DEFAULT_TOAST_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Chain used when nothing is stored yet
    pub default_chain: ChainKey,
    pub log_level: log::Level,
    pub receipt_poll_ms: u32,
    pub receipt_max_polls: u32,
    pub toast_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_chain: ChainKey::Base,
            log_level: log::Level::Info,
            receipt_poll_ms: DEFAULT_POLL_INTERVAL_MS,
            receipt_max_polls: DEFAULT_MAX_POLLS,
            toast_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl AppConfig {
    /// Read the values captured at compile time.
    pub fn from_build_env() -> std::result::Result<Self, String> {
        Self::from_lookup(build_env)
    }

    /// Build a config from an arbitrary key lookup. Unset keys keep their
    /// defaults; set but unparsable keys are an error.
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("DEX_DEFAULT_CHAIN") {
            config.default_chain = raw.parse()?;
        }
        if let Some(raw) = lookup("DEX_LOG_LEVEL") {
            config.log_level = raw
                .parse()
                .map_err(|_| format!("DEX_LOG_LEVEL must be a log level, got '{}'", raw))?;
        }
        if let Some(raw) = lookup("DEX_RECEIPT_POLL_MS") {
            config.receipt_poll_ms = parse_number("DEX_RECEIPT_POLL_MS", &raw)?;
        }
        if let Some(raw) = lookup("DEX_RECEIPT_MAX_POLLS") {
            config.receipt_max_polls = parse_number("DEX_RECEIPT_MAX_POLLS", &raw)?;
        }
        if let Some(raw) = lookup("DEX_TOAST_MS") {
            config.toast_ms = parse_number("DEX_TOAST_MS", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.receipt_poll_ms == 0 {
            return Err("DEX_RECEIPT_POLL_MS must be greater than zero".to_string());
        }
        if self.receipt_max_polls == 0 {
            return Err("DEX_RECEIPT_MAX_POLLS must be greater than zero".to_string());
        }
        if self.toast_ms < 1_000 {
            return Err("DEX_TOAST_MS must be at least 1000".to_string());
        }
        Ok(())
    }
}

fn parse_number(key: &str, raw: &str) -> std::result::Result<u32, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("{} must be a positive integer, got '{}'", key, raw))
}

fn build_env(key: &str) -> Option<String> {
    let value = match key {
        "DEX_DEFAULT_CHAIN" => option_env!("DEX_DEFAULT_CHAIN"),
        "DEX_LOG_LEVEL" => option_env!("DEX_LOG_LEVEL"),
        "DEX_RECEIPT_POLL_MS" => option_env!("DEX_RECEIPT_POLL_MS"),
        "DEX_RECEIPT_MAX_POLLS" => option_env!("DEX_RECEIPT_MAX_POLLS"),
        "DEX_TOAST_MS" => option_env!("DEX_TOAST_MS"),
        _ => None,
    };
    value.map(str::to_string)
}

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Load the build configuration once. On error the defaults stay in effect.
pub fn init_config() -> Result<()> {
    let config = AppConfig::from_build_env().map_err(AppError::Config)?;
    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("configuration already initialized".to_string()))
}

pub fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
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
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_chain, ChainKey::Base);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DEX_DEFAULT_CHAIN", "arbitrum"),
            ("DEX_LOG_LEVEL", "debug"),
            ("DEX_RECEIPT_POLL_MS", "250"),
            ("DEX_TOAST_MS", "3000"),
        ]))
        .unwrap();
        assert_eq!(config.default_chain, ChainKey::Arbitrum);
        assert_eq!(config.log_level, log::Level::Debug);
        assert_eq!(config.receipt_poll_ms, 250);
        assert_eq!(config.receipt_max_polls, DEFAULT_MAX_POLLS);
        assert_eq!(config.toast_ms, 3000);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(AppConfig::from_lookup(lookup(&[("DEX_DEFAULT_CHAIN", "polygon")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("DEX_RECEIPT_POLL_MS", "soon")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("DEX_RECEIPT_MAX_POLLS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("DEX_TOAST_MS", "10")])).is_err());
    }
}
