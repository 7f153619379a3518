//! Store configuration.
//!
//! # Responsibility
//! - Collect latency mode, seed source and log level in one value.
//! - Read overrides from `TRIPBOARD_*` environment variables.
//!
//! # Invariants
//! - Unset variables fall back to defaults; set-but-invalid values are errors.

use crate::latency::Latency;
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_LATENCY: &str = "TRIPBOARD_LATENCY";
pub const ENV_SEED_DIR: &str = "TRIPBOARD_SEED_DIR";
pub const ENV_LOG_LEVEL: &str = "TRIPBOARD_LOG_LEVEL";

/// Where the store takes its initial records from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// Dataset compiled into the crate.
    Bundled,
    /// Directory holding one `<entity>.json` file per collection.
    Dir(PathBuf),
    /// Start with empty collections.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub latency: Latency,
    pub seed: SeedSource,
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency: Latency::simulated(),
            seed: SeedSource::Bundled,
            log_level: default_log_level().to_string(),
        }
    }
}

impl StoreConfig {
    /// Zero-latency, empty-store configuration for tests.
    pub fn for_tests() -> Self {
        Self {
            latency: Latency::none(),
            seed: SeedSource::Empty,
            ..Self::default()
        }
    }

    /// Builds a config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_LATENCY) {
            config.latency = parse_latency_mode(&value)?;
        }

        if let Some(value) = lookup(ENV_SEED_DIR) {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Invalid {
                    key: ENV_SEED_DIR,
                    value,
                });
            }
            config.seed = SeedSource::Dir(PathBuf::from(trimmed));
        }

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            config.log_level = value.trim().to_ascii_lowercase();
        }

        Ok(config)
    }
}

/// Parses `simulated|none` (also `off`, `0`) into a latency profile.
pub fn parse_latency_mode(value: &str) -> Result<Latency, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "simulated" | "default" => Ok(Latency::simulated()),
        "none" | "off" | "0" => Ok(Latency::none()),
        _ => Err(ConfigError::Invalid {
            key: ENV_LATENCY,
            value: value.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { key, value } => write!(f, "invalid value `{value}` for {key}"),
        }
    }
}

impl Error for ConfigError {}
