//! Configuration module for the PremiumFlow engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the reporting driver.
//!
//! # Usage
//!
//! ```rust,ignore
//! use premiumflow::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("period type: {}", config.reporting.period_type);
//! ```

mod observability;
mod reporting;
mod source;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LOG_FORMATS, LOG_LEVELS, LoggingConfig, ObservabilityConfig};
pub use reporting::ReportingConfig;
pub use source::SourceConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "PREMIUMFLOW_CONFIG";

/// Environment variable overriding `source.transactions_path`.
pub const TRANSACTIONS_PATH_ENV: &str = "PREMIUMFLOW_TRANSACTIONS";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Report defaults.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Transaction source.
    #[serde(default)]
    pub source: SourceConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Replace the transactions path when `path` is set and non-empty.
    #[must_use]
    pub fn with_transactions_path(mut self, path: Option<String>) -> Self {
        if let Some(path) = path.filter(|p| !p.trim().is_empty()) {
            self.source.transactions_path = path;
        }
        self
    }

    /// Apply `PREMIUMFLOW_TRANSACTIONS` if it is set.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_transactions_path(std::env::var(TRANSACTIONS_PATH_ENV).ok())
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if let (Some(since), Some(until)) = (config.reporting.since, config.reporting.until) {
        if since > until {
            return Err(ConfigError::ValidationError(format!(
                "reporting.since ({since}) must not be after reporting.until ({until})"
            )));
        }
    }

    if config.source.transactions_path.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "source.transactions_path must not be empty".to_string(),
        ));
    }

    let logging = &config.observability.logging;
    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }
    if !LOG_LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.level must be one of: {LOG_LEVELS:?}"
        )));
    }

    Ok(())
}
