//! Configuration management for the DroughtWatch service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::DroughtWatchError;
use crate::models::Severity;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "DROUGHTWATCH_CONFIG";

/// Root configuration structure for the DroughtWatch service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DroughtWatchConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Fixture values served by the forecast endpoint
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Region boundary catalog source
    #[serde(default)]
    pub regions: RegionsConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Forecast values handed to the static forecast provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_next_month")]
    pub next_month: Severity,
    #[serde(default = "default_two_months")]
    pub two_months: Severity,
    #[serde(default = "default_three_months")]
    pub three_months: Severity,
    /// Reported model accuracy in [0, 1]
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
}

/// Region catalog source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionsConfig {
    /// GeoJSON `FeatureCollection` to load instead of the built-in fixture
    pub geojson_path: Option<PathBuf>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_request_timeout() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_next_month() -> Severity {
    Severity::Severe
}

fn default_two_months() -> Severity {
    Severity::Moderate
}

fn default_three_months() -> Severity {
    Severity::Normal
}

fn default_accuracy() -> f64 {
    0.89
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            next_month: default_next_month(),
            two_months: default_two_months(),
            three_months: default_three_months(),
            accuracy: default_accuracy(),
        }
    }
}

impl ServerConfig {
    /// Socket address string in `host:port` form
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DroughtWatchConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(explicit)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        match config_path {
            // An explicitly named file must exist
            Some(path) => {
                if !path.exists() {
                    return Err(DroughtWatchError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                builder = builder.add_source(
                    File::from(path)
                        .required(true)
                        .format(config::FileFormat::Toml),
                );
            }
            None => {
                let default_file = Self::get_config_path()
                    .filter(|path| path.exists())
                    .unwrap_or_else(|| PathBuf::from("config.toml"));
                builder = builder.add_source(
                    File::from(default_file)
                        .required(false)
                        .format(config::FileFormat::Toml),
                );
            }
        }

        // DROUGHTWATCH_SERVER__PORT=9000 overrides server.port
        builder = builder.add_source(
            Environment::with_prefix("DROUGHTWATCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: DroughtWatchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("droughtwatch").join("config.toml"))
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(DroughtWatchError::config("Server port cannot be 0").into());
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(
                DroughtWatchError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        if !(0.0..=1.0).contains(&self.forecast.accuracy) {
            return Err(DroughtWatchError::config(format!(
                "Forecast accuracy must be between 0 and 1, got {}",
                self.forecast.accuracy
            ))
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DroughtWatchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DroughtWatchError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.server.host.trim().is_empty() {
            return Err(DroughtWatchError::config("Server host cannot be empty").into());
        }

        Ok(())
    }
}
