//! Configuration management
//!
//! Settings are layered, lowest priority first:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables
//!
//! # Usage
//!
//! ```no_run
//! use applink_explorer::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Probe timeout: {}ms", config.probe.timeout_ms);
//! ```
//!
//! # Environment Variables
//!
//! Any key can be overridden with `APPLINKS__<section>__<key>`:
//! - `APPLINKS__SERVER__BIND_ADDR=127.0.0.1:9000`
//! - `APPLINKS__PROBE__TIMEOUT_MS=5000`
//! - `APPLINKS__APP_STORE__DEFAULT_COUNTRY=nl`
//!
//! # Configuration File
//!
//! Read from `config/applinks.toml` unless `APPLINKS_CONFIG` points elsewhere.
//! A missing file is not an error.

mod models;
mod sources;
mod validation;

pub use models::{AppStoreSettings, Config, ProbeSettings, ServerConfig};
pub use validation::{ValidationError, is_country_code};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - A value fails validation (zero timeouts, bad header values, etc.)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
