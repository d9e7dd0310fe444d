//! Consecutive-day logging streak.
//!
//! The streak advances when a meal is logged exactly one day after the stored last-log
//! date and resets to 1 after a longer gap. Logging again on the same day changes nothing.
//!
//! The day difference is absolute, so a backdated log one day *before* the last-log date
//! also advances the streak (and moves the last-log date backwards).

use crate::{
    core::persistence::{get_stored_streak, save_streak},
    errors::Result,
    models::DailyStreak,
    store::KeyValueStore,
};
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole-day distance between two dates: `ceil(|Δms| / 86_400_000)`.
#[must_use]
pub fn day_difference(a: NaiveDate, b: NaiveDate) -> i64 {
    let delta_ms = a.signed_duration_since(b).num_milliseconds().abs();
    (delta_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Returns the stored streak, or `{0, today}` when nothing usable is stored.
#[instrument(skip(store))]
pub async fn get_streak<S: KeyValueStore>(store: &S, today: NaiveDate) -> Result<DailyStreak> {
    Ok(get_stored_streak(store).await?.unwrap_or(DailyStreak {
        current_streak: 0,
        last_log_date: today,
    }))
}

/// Computes the record that follows `current` when a meal is logged on `logged_date`.
///
/// Returns `None` when nothing should be written (same-day log). With no stored record
/// the first log starts a streak of 1.
#[must_use]
pub fn next_streak(current: Option<DailyStreak>, logged_date: NaiveDate) -> Option<DailyStreak> {
    let Some(current) = current else {
        return Some(DailyStreak {
            current_streak: 1,
            last_log_date: logged_date,
        });
    };

    match day_difference(logged_date, current.last_log_date) {
        1 => Some(DailyStreak {
            current_streak: current.current_streak.saturating_add(1),
            last_log_date: logged_date,
        }),
        diff if diff > 1 => Some(DailyStreak {
            current_streak: 1,
            last_log_date: logged_date,
        }),
        _ => None,
    }
}

/// Updates the stored streak for a meal logged on `logged_date` and returns the record
/// now in effect.
#[instrument(skip(store))]
pub async fn update_streak<S: KeyValueStore>(
    store: &S,
    logged_date: NaiveDate,
    today: NaiveDate,
) -> Result<DailyStreak> {
    let stored = get_stored_streak(store).await?;

    match next_streak(stored, logged_date) {
        Some(updated) => {
            save_streak(store, &updated).await?;
            info!(
                streak = updated.current_streak,
                last_log_date = %updated.last_log_date,
                "Streak updated"
            );
            Ok(updated)
        }
        None => {
            debug!("Same-day log; streak unchanged");
            get_streak(store, today).await
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::store::{MemoryStore, STREAK_KEY};
    use crate::test_utils::*;

    async fn store_with(streak: u32, last: NaiveDate) -> Result<MemoryStore> {
        let store = MemoryStore::new();
        save_streak(
            &store,
            &DailyStreak {
                current_streak: streak,
                last_log_date: last,
            },
        )
        .await?;
        Ok(store)
    }

    #[test]
    fn test_day_difference() {
        let d = date(2024, 2, 28);
        assert_eq!(day_difference(d, d), 0);
        assert_eq!(day_difference(date(2024, 2, 29), d), 1);
        assert_eq!(day_difference(date(2024, 3, 1), d), 2);
        assert_eq!(day_difference(d, date(2024, 3, 1)), 2);
        assert_eq!(day_difference(date(2025, 1, 1), date(2024, 12, 31)), 1);
    }

    #[tokio::test]
    async fn test_get_streak_default_when_absent() -> Result<()> {
        let store = MemoryStore::new();
        let today = date(2024, 6, 1);

        let streak = get_streak(&store, today).await?;
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.last_log_date, today);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_streak_default_when_corrupt() -> Result<()> {
        init_test_tracing();
        let store = MemoryStore::new();
        store.set(STREAK_KEY, "{\"currentStreak\":").await?;
        let today = date(2024, 6, 1);

        let streak = get_streak(&store, today).await?;
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.last_log_date, today);
        Ok(())
    }

    #[tokio::test]
    async fn test_next_day_increments() -> Result<()> {
        let d = date(2024, 6, 1);
        let store = store_with(5, d).await?;

        let updated = update_streak(&store, date(2024, 6, 2), date(2024, 6, 2)).await?;
        assert_eq!(updated.current_streak, 6);
        assert_eq!(updated.last_log_date, date(2024, 6, 2));
        assert_eq!(get_stored_streak(&store).await?, Some(updated));
        Ok(())
    }

    #[tokio::test]
    async fn test_gap_resets_to_one() -> Result<()> {
        let store = store_with(5, date(2024, 6, 1)).await?;

        let updated = update_streak(&store, date(2024, 6, 3), date(2024, 6, 3)).await?;
        assert_eq!(updated.current_streak, 1);
        assert_eq!(updated.last_log_date, date(2024, 6, 3));

        let updated = update_streak(&store, date(2024, 7, 20), date(2024, 7, 20)).await?;
        assert_eq!(updated.current_streak, 1);
        assert_eq!(updated.last_log_date, date(2024, 7, 20));
        Ok(())
    }

    #[tokio::test]
    async fn test_same_day_is_noop() -> Result<()> {
        let d = date(2024, 6, 1);
        let store = store_with(5, d).await?;
        let raw_before = store.get(STREAK_KEY).await?;

        let current = update_streak(&store, d, d).await?;
        assert_eq!(current.current_streak, 5);
        assert_eq!(current.last_log_date, d);
        assert_eq!(store.get(STREAK_KEY).await?, raw_before);
        Ok(())
    }

    #[tokio::test]
    async fn test_first_log_starts_streak() -> Result<()> {
        let store = MemoryStore::new();
        let d = date(2024, 6, 1);

        let updated = update_streak(&store, d, d).await?;
        assert_eq!(updated.current_streak, 1);
        assert_eq!(updated.last_log_date, d);
        Ok(())
    }

    // Known quirk: the difference is absolute, so a log dated the day before the
    // last-log date counts as consecutive and rewinds last_log_date.
    #[tokio::test]
    async fn test_backdated_log_advances_streak() -> Result<()> {
        let store = store_with(3, date(2024, 6, 10)).await?;

        let updated = update_streak(&store, date(2024, 6, 9), date(2024, 6, 10)).await?;
        assert_eq!(updated.current_streak, 4);
        assert_eq!(updated.last_log_date, date(2024, 6, 9));
        Ok(())
    }

    #[test]
    fn test_next_streak_saturates() {
        let current = DailyStreak {
            current_streak: u32::MAX,
            last_log_date: date(2024, 1, 1),
        };
        let next = next_streak(Some(current), date(2024, 1, 2)).unwrap();
        assert_eq!(next.current_streak, u32::MAX);
    }
}
