//! Raw key-value storage port.
//!
//! Values are opaque strings; encoding lives in [`crate::core::persistence`]. There is no
//! locking across keys or calls, so two sessions writing the same key race and the last
//! full-value write wins.

use crate::errors::Result;
use std::future::Future;

/// In-memory adapter
pub mod memory;
/// sea-orm adapter over the `kv_entries` table
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Storage key for the meal collection.
pub const MEALS_KEY: &str = "meals";
/// Storage key for the water log collection.
pub const WATER_LOGS_KEY: &str = "waterLogs";
/// Storage key for the streak record.
pub const STREAK_KEY: &str = "streak";
/// Storage key for quick-meal templates.
pub const QUICK_MEALS_KEY: &str = "quickMeals";

/// String-keyed store holding one encoded value per key.
pub trait KeyValueStore {
    /// Returns the raw value for `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Replaces the value for `key`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}
