//! Configuration system for GiftForge.
//!
//! Load engine configuration from TOML or YAML files to control the
//! reciprocal-pair rule, tier compatibility and search budgets without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use giftforge_config::{EngineConfig, TierMode};
//! use std::time::Duration;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     allow_reciprocal = false
//!     tier_mode = "min_floor"
//!     random_seed = 7
//!
//!     [termination]
//!     max_attempts = 5000
//!     timeout_ms = 250
//! "#).unwrap();
//!
//! assert_eq!(config.tier_mode, TierMode::MinFloor);
//! assert_eq!(config.max_attempts(), 5000);
//! assert_eq!(config.time_limit(), Duration::from_millis(250));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use giftforge_config::EngineConfig;
//!
//! let config = EngineConfig::load("giftforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Attempt budget used when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 100_000;

/// Wall-clock budget used when none is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Whether two participants may draw each other.
    #[serde(default)]
    pub allow_reciprocal: bool,

    /// Tier compatibility mode.
    #[serde(default)]
    pub tier_mode: TierMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Search budget.
    #[serde(default)]
    pub termination: TerminationConfig,
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses and validates configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects budgets that would stop every search before it starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.termination.max_attempts == Some(0) {
            return Err(ConfigError::Invalid(
                "termination.max_attempts must be greater than zero".to_string(),
            ));
        }
        if self.termination.timeout_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "termination.timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_allow_reciprocal(mut self, allow: bool) -> Self {
        self.allow_reciprocal = allow;
        self
    }

    pub fn with_tier_mode(mut self, mode: TierMode) -> Self {
        self.tier_mode = mode;
        self
    }

    /// Sets the attempt budget.
    pub fn with_max_attempts(mut self, attempts: u64) -> Self {
        self.termination.max_attempts = Some(attempts);
        self
    }

    /// Sets the wall-clock budget in milliseconds.
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.termination.timeout_ms = Some(ms);
        self
    }

    /// Returns the attempt budget, falling back to [`DEFAULT_MAX_ATTEMPTS`].
    pub fn max_attempts(&self) -> u64 {
        self.termination
            .max_attempts
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    /// Returns the wall-clock budget.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Duration {
        self.termination.time_limit()
    }
}

/// Tier compatibility mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierMode {
    /// Tiers never restrict an assignment.
    #[default]
    Off,

    /// Receivers' tier minimum must reach the giver's contribution floor.
    MinFloor,
}

/// Search budget configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum candidate placements tried before giving up.
    pub max_attempts: Option<u64>,

    /// Maximum milliseconds to spend searching.
    pub timeout_ms: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration.
    ///
    /// Falls back to [`DEFAULT_TIMEOUT_MS`] so a search always terminates.
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }
}

#[cfg(test)]
mod tests;
