//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `PLACE_KEEPER` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use place_keeper::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Photos stored under {}", config.storage.photo_dir.display());
//! ```

mod database;
mod error;
mod logging;
mod maps;
mod storage;
mod telegram;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use maps::{MapsConfig, MAX_CONCURRENCY};
pub use storage::StorageConfig;
pub use telegram::TelegramConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Bot API access (token, polling)
    pub telegram: TelegramConfig,

    /// PostgreSQL connection
    pub database: DatabaseConfig,

    /// Distance provider (Google Maps)
    pub maps: MapsConfig,

    /// Photo files on local disk
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PLACE_KEEPER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PLACE_KEEPER__TELEGRAM__BOT_TOKEN=...` -> `telegram.bot_token = ...`
    /// - `PLACE_KEEPER__MAPS__CONCURRENCY=4` -> `maps.concurrency = 4`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PLACE_KEEPER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, section by section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.telegram.validate()?;
        self.database.validate()?;
        self.maps.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
