//! Application settings loaded from config.toml
//!
//! Every field has a default, so an empty or partial file is valid. `DATABASE_URL`
//! and `FOOD_API_BASE_URL` from the environment (or `.env`) take precedence over
//! the file when using [`AppConfig::from_env`].

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Public food database endpoint products are looked up against.
pub const DEFAULT_FOOD_API_BASE_URL: &str = "https://world.openfoodfacts.org/api/v0/product";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Durable store settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Barcode lookup settings
    #[serde(default)]
    pub barcode: BarcodeConfig,
}

/// `[storage]` section
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// sea-orm connection string for the key-value store
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

/// `[barcode]` section
#[derive(Debug, Clone, Deserialize)]
pub struct BarcodeConfig {
    /// Base URL; requests go to `{base_url}/{barcode}.json`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-Agent header sent with every lookup
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_database_url() -> String {
    super::database::DEFAULT_DATABASE_URL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_FOOD_API_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("meal-streak/", env!("CARGO_PKG_VERSION")).to_string()
}

impl AppConfig {
    /// Defaults overridden by `DATABASE_URL` and `FOOD_API_BASE_URL`.
    ///
    /// Loads `.env` first if present; a missing file is not an error.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::default().with_env_overrides()
    }

    /// Applies environment overrides on top of already loaded settings.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.storage.database_url = url;
        }
        if let Ok(url) = std::env::var("FOOD_API_BASE_URL") {
            self.barcode.base_url = url;
        }
        self
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads settings from the default location (./config.toml)
pub fn load_default_config() -> Result<AppConfig> {
    load_config("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [storage]
            database_url = "sqlite::memory:"

            [barcode]
            base_url = "http://localhost:9000/api/v0/product"
            timeout_secs = 3
            user_agent = "tests"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.database_url, "sqlite::memory:");
        assert_eq!(config.barcode.base_url, "http://localhost:9000/api/v0/product");
        assert_eq!(config.barcode.timeout_secs, 3);
        assert_eq!(config.barcode.user_agent, "tests");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.barcode.base_url, DEFAULT_FOOD_API_BASE_URL);
        assert_eq!(config.barcode.timeout_secs, 10);
        assert!(config.barcode.user_agent.starts_with("meal-streak/"));
        assert_eq!(
            config.storage.database_url,
            crate::config::database::DEFAULT_DATABASE_URL
        );
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str("[barcode]\ntimeout_secs = 2\n").unwrap();
        assert_eq!(config.barcode.timeout_secs, 2);
        assert_eq!(config.barcode.base_url, DEFAULT_FOOD_API_BASE_URL);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("definitely/not/here/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let path = std::env::temp_dir().join("meal_streak_invalid_config.toml");
        std::fs::write(&path, "[barcode\nbase_url = ").unwrap();
        let result = load_config(&path);
        assert!(matches!(result, Err(Error::Config { .. })));
        std::fs::remove_file(&path).ok();
    }
}
