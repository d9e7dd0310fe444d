//! Typed persistence over the key-value store.
//!
//! Each entity kind lives under one fixed key as a JSON array (or object, for the streak).
//! Reads are fail-soft: an absent key and an undecodable value both read as empty, and the
//! decode failure is only logged. Meal and water writes are replace-by-date: the whole
//! collection is read, entries sharing a date with the incoming set are dropped, the
//! incoming set is appended, and the full collection is written back.

use crate::{
    errors::Result,
    models::{DailyStreak, Meal, QuickMeal, WaterLog},
    store::{KeyValueStore, MEALS_KEY, QUICK_MEALS_KEY, STREAK_KEY, WATER_LOGS_KEY},
};
use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashSet;
use tracing::{debug, error, instrument};

/// Decodes the value under `key`, logging and returning `None` when it cannot be parsed.
async fn read_value<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            error!(key, error = %e, "Error parsing stored value; treating it as empty");
            Ok(None)
        }
    }
}

async fn write_value<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value)?;
    store.set(key, &encoded).await
}

/// Returns every stored meal across all dates.
#[instrument(skip(store))]
pub async fn get_meals<S: KeyValueStore>(store: &S) -> Result<Vec<Meal>> {
    Ok(read_value(store, MEALS_KEY).await?.unwrap_or_default())
}

/// Replace-by-date write of meals.
///
/// Stored meals whose date appears anywhere in `meals` are removed before `meals` is
/// appended. Meals on other dates are untouched. An empty slice names no dates and so
/// removes nothing; use [`save_meals_for_date`] to clear a day.
#[instrument(skip(store, meals), fields(count = meals.len()))]
pub async fn save_meals<S: KeyValueStore>(store: &S, meals: &[Meal]) -> Result<()> {
    let dates: HashSet<NaiveDate> = meals.iter().map(|m| m.date).collect();
    replace_meals(store, &dates, meals).await
}

/// Replace-by-date write scoped to `date`, so an empty `meals` clears that day.
///
/// Dates carried by `meals` themselves are replaced as well.
#[instrument(skip(store, meals), fields(count = meals.len()))]
pub async fn save_meals_for_date<S: KeyValueStore>(
    store: &S,
    date: NaiveDate,
    meals: &[Meal],
) -> Result<()> {
    let mut dates: HashSet<NaiveDate> = meals.iter().map(|m| m.date).collect();
    dates.insert(date);
    replace_meals(store, &dates, meals).await
}

async fn replace_meals<S: KeyValueStore>(
    store: &S,
    dates: &HashSet<NaiveDate>,
    meals: &[Meal],
) -> Result<()> {
    let mut all = get_meals(store).await?;
    let before = all.len();
    all.retain(|m| !dates.contains(&m.date));
    debug!(
        replaced = before - all.len(),
        appended = meals.len(),
        "Replacing stored meals by date"
    );
    all.extend_from_slice(meals);
    write_value(store, MEALS_KEY, &all).await
}

/// Returns every stored water log.
#[instrument(skip(store))]
pub async fn get_water_logs<S: KeyValueStore>(store: &S) -> Result<Vec<WaterLog>> {
    Ok(read_value(store, WATER_LOGS_KEY).await?.unwrap_or_default())
}

/// Stores `log`, replacing any existing log for the same date.
#[instrument(skip(store))]
pub async fn save_water_log<S: KeyValueStore>(store: &S, log: &WaterLog) -> Result<()> {
    let mut logs = get_water_logs(store).await?;
    logs.retain(|l| l.date != log.date);
    logs.push(*log);
    write_value(store, WATER_LOGS_KEY, &logs).await
}

/// Returns the stored streak record, or `None` if absent or undecodable.
#[instrument(skip(store))]
pub async fn get_stored_streak<S: KeyValueStore>(store: &S) -> Result<Option<DailyStreak>> {
    read_value(store, STREAK_KEY).await
}

/// Overwrites the streak record.
#[instrument(skip(store))]
pub async fn save_streak<S: KeyValueStore>(store: &S, streak: &DailyStreak) -> Result<()> {
    write_value(store, STREAK_KEY, streak).await
}

/// Returns every stored quick-meal template.
#[instrument(skip(store))]
pub async fn get_quick_meals<S: KeyValueStore>(store: &S) -> Result<Vec<QuickMeal>> {
    Ok(read_value(store, QUICK_MEALS_KEY).await?.unwrap_or_default())
}

/// Appends a template. Duplicates are kept.
#[instrument(skip(store, meal), fields(name = %meal.name))]
pub async fn save_quick_meal<S: KeyValueStore>(store: &S, meal: &QuickMeal) -> Result<()> {
    let mut meals = get_quick_meals(store).await?;
    meals.push(meal.clone());
    write_value(store, QUICK_MEALS_KEY, &meals).await
}
