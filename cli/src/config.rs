//! Configuration for the roast-loss CLI
//!
//! Hierarchical loading:
//! 1. Default values in code
//! 2. Optional `roast_loss.toml` in the working directory
//! 3. Environment variable overrides with RLC_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Persistence configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the JSON key-value store file
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// Tracing filter used when RUST_LOG is not set
    pub filter: String,
}

impl Config {
    /// Load configuration from defaults, file, and environment
    pub fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .set_default("storage.path", "roast_loss_store.json")?
            .set_default("log.filter", "roast_loss=info")?
            .add_source(File::with_name("roast_loss").required(false))
            .add_source(Environment::with_prefix("RLC").separator("_"))
            .build()?;

        config.try_deserialize()
    }
}
