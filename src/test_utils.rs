//! Shared test utilities.
//!
//! This module provides common helpers for setting up test stores and building
//! meals and lookup records with sensible defaults.

use crate::{
    core::barcode::{LookupOutcome, ProductLookup},
    errors::{Error, Result},
    models::{Meal, MealCandidate, NutritionRecord},
    store::{KeyValueStore, MemoryStore},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with the key-value table initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for a calendar date.
///
/// # Panics
/// Panics on an invalid date; test inputs are literals.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Builds a meal with only the required fields set.
pub fn meal(id: i64, name: &str, calories: f64, date: NaiveDate) -> Meal {
    MealCandidate::new(name, calories).into_meal(id, date)
}

/// Lookup record with fixed macros and the given barcode and calories.
pub fn record(barcode: &str, calories: f64) -> NutritionRecord {
    NutritionRecord {
        name: format!("Product {barcode}"),
        calories,
        protein: 1.25,
        carbs: 10.0,
        fat: 0.5,
        barcode: barcode.to_string(),
    }
}

/// Lookup that always returns the same outcome.
#[derive(Debug, Clone)]
pub struct StubLookup {
    outcome: LookupOutcome,
}

impl StubLookup {
    /// Always finds `record`.
    pub const fn with_product(record: NutritionRecord) -> Self {
        Self {
            outcome: LookupOutcome::Found(record),
        }
    }

    /// Never finds anything.
    pub const fn not_found() -> Self {
        Self {
            outcome: LookupOutcome::NotFound,
        }
    }
}

impl ProductLookup for StubLookup {
    async fn lookup(&self, _barcode: &str) -> LookupOutcome {
        self.outcome.clone()
    }
}

/// Memory-backed store whose writes can be switched to fail.
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyStore {
    /// Wraps `inner`; writes succeed until [`Self::fail_writes`] is turned on.
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_writes: Arc::default(),
        }
    }

    /// Makes every later `set` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Storage {
                message: format!("write to {key} rejected"),
            });
        }
        self.inner.set(key, value).await
    }
}
