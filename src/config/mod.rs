/// Database connection and table creation for the durable store
pub mod database;

/// Application settings loaded from config.toml and the environment
pub mod settings;

pub use settings::{AppConfig, BarcodeConfig, StorageConfig, load_config, load_default_config};
