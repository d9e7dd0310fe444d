//! Application state coordinator for one logging session.
//!
//! The session date is read from the clock once at load and never re-evaluated, so a
//! session left open past midnight keeps logging to the day it started on. Every meal
//! mutation writes the full day's list back with a replace-by-date write, recomputes the
//! totals, and (when the day has at least one meal) updates the streak.

use crate::{
    clock::Clock,
    core::{
        persistence::{
            get_meals, get_quick_meals, get_water_logs, save_meals_for_date, save_quick_meal,
            save_water_log,
        },
        streak::{get_streak, update_streak},
    },
    errors::{Error, Result},
    models::{
        DailyStreak, MAX_GLASSES, Meal, MealCandidate, Mood, NutritionRecord, NutritionTotals,
        QuickMeal, WaterLog,
    },
    store::KeyValueStore,
};
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

/// In-memory view of today's meals and water, backed by a key-value store.
#[derive(Debug)]
pub struct DailyTracker<S, C> {
    store: S,
    clock: C,
    today: NaiveDate,
    meals: Vec<Meal>,
    water_glasses: u8,
    streak: DailyStreak,
    totals: NutritionTotals,
    last_id: i64,
}

impl<S: KeyValueStore, C: Clock> DailyTracker<S, C> {
    /// Starts a session: fixes today's date and loads today's meals, water and streak.
    #[instrument(skip(store, clock))]
    pub async fn load(store: S, clock: C) -> Result<Self> {
        let today = clock.today();

        let meals: Vec<Meal> = get_meals(&store)
            .await?
            .into_iter()
            .filter(|m| m.date == today)
            .collect();

        let water_glasses = get_water_logs(&store)
            .await?
            .into_iter()
            .find(|log| log.date == today)
            .map_or(0, |log| log.glasses.min(MAX_GLASSES));

        let streak = get_streak(&store, today).await?;
        let last_id = get_quick_meals(&store)
            .await?
            .iter()
            .map(|q| q.id)
            .chain(meals.iter().map(|m| m.id))
            .max()
            .unwrap_or(0);

        let mut tracker = Self {
            store,
            clock,
            today,
            meals,
            water_glasses,
            streak,
            totals: NutritionTotals::default(),
            last_id,
        };
        tracker.refresh_derived().await?;

        info!(
            %today,
            meals = tracker.meals.len(),
            water = tracker.water_glasses,
            streak = tracker.streak.current_streak,
            "Session loaded"
        );
        Ok(tracker)
    }

    /// Session date.
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Meals logged for the session date, in insertion order.
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    /// Glasses of water logged for the session date.
    pub const fn water_glasses(&self) -> u8 {
        self.water_glasses
    }

    /// Streak as last read from the store.
    pub const fn streak(&self) -> DailyStreak {
        self.streak
    }

    /// Totals over today's meals.
    pub const fn totals(&self) -> NutritionTotals {
        self.totals
    }

    /// Backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Logs a meal for the session date and returns it with its assigned id.
    #[instrument(skip(self, candidate), fields(name = %candidate.name))]
    pub async fn add_meal(&mut self, candidate: MealCandidate) -> Result<Meal> {
        validate_candidate(&candidate)?;

        let meal = candidate.into_meal(self.next_id(), self.today);
        let mut meals = self.meals.clone();
        meals.push(meal.clone());
        self.commit_meals(meals).await?;

        info!(id = meal.id, calories = meal.calories, "Meal added");
        Ok(meal)
    }

    /// Logs a confirmed barcode scan as a snack.
    pub async fn add_scanned_product(&mut self, record: &NutritionRecord) -> Result<Meal> {
        self.add_meal(record.to_candidate()).await
    }

    /// Removes the meal with `id`. An unknown id leaves the list unchanged but it is still
    /// written back; removing the last meal clears the day in storage.
    #[instrument(skip(self))]
    pub async fn remove_meal(&mut self, id: i64) -> Result<()> {
        let meals: Vec<Meal> = self.meals.iter().filter(|m| m.id != id).cloned().collect();
        if meals.len() == self.meals.len() {
            debug!("No meal with this id today");
        }

        self.commit_meals(meals).await
    }

    /// Sets (or clears) the post-meal mood.
    #[instrument(skip(self))]
    pub async fn update_meal_mood(&mut self, id: i64, mood: Option<Mood>) -> Result<()> {
        let mut meals = self.meals.clone();
        let meal = meals
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(Error::MealNotFound { id })?;
        meal.mood = mood;

        self.commit_meals(meals).await
    }

    /// Stores today's glass count. Counts above [`MAX_GLASSES`] are rejected.
    #[instrument(skip(self))]
    pub async fn update_water(&mut self, glasses: u8) -> Result<()> {
        if glasses > MAX_GLASSES {
            return Err(Error::InvalidWaterCount { glasses });
        }

        save_water_log(
            &self.store,
            &WaterLog {
                date: self.today,
                glasses,
            },
        )
        .await?;
        self.water_glasses = glasses;
        Ok(())
    }

    /// One more glass, capped at [`MAX_GLASSES`].
    pub async fn add_glass(&mut self) -> Result<u8> {
        let glasses = self.water_glasses.saturating_add(1).min(MAX_GLASSES);
        self.update_water(glasses).await?;
        Ok(glasses)
    }

    /// One glass fewer, floored at zero.
    pub async fn remove_glass(&mut self) -> Result<u8> {
        let glasses = self.water_glasses.saturating_sub(1);
        self.update_water(glasses).await?;
        Ok(glasses)
    }

    /// Saves a reusable template. Templates are never deduplicated.
    #[instrument(skip(self, candidate), fields(name = %candidate.name))]
    pub async fn save_quick_meal(&mut self, candidate: MealCandidate) -> Result<QuickMeal> {
        validate_candidate(&candidate)?;

        let quick_meal = QuickMeal::from_candidate(self.next_id(), candidate);
        save_quick_meal(&self.store, &quick_meal).await?;
        self.last_id = self.last_id.max(quick_meal.id);
        Ok(quick_meal)
    }

    /// All saved templates.
    pub async fn quick_meals(&self) -> Result<Vec<QuickMeal>> {
        get_quick_meals(&self.store).await
    }

    /// Logs the template with `id` as a meal for the session date.
    #[instrument(skip(self))]
    pub async fn log_quick_meal(&mut self, id: i64) -> Result<Meal> {
        let template = get_quick_meals(&self.store)
            .await?
            .into_iter()
            .find(|q| q.id == id)
            .ok_or(Error::QuickMealNotFound { id })?;

        self.add_meal(template.to_candidate()).await
    }

    /// Next free id. Only reserved once the owning write succeeds.
    fn next_id(&self) -> i64 {
        self.clock
            .now_millis()
            .max(self.last_id.saturating_add(1))
    }

    /// Persists `meals` as today's list, then adopts it. A failed write leaves the
    /// session untouched.
    async fn commit_meals(&mut self, meals: Vec<Meal>) -> Result<()> {
        save_meals_for_date(&self.store, self.today, &meals).await?;
        let highest = meals.iter().map(|m| m.id).max().unwrap_or(self.last_id);
        self.last_id = self.last_id.max(highest);
        self.meals = meals;
        self.refresh_derived().await
    }

    async fn refresh_derived(&mut self) -> Result<()> {
        self.totals = NutritionTotals::from_meals(&self.meals);
        if !self.meals.is_empty() {
            self.streak = update_streak(&self.store, self.today, self.today).await?;
        }
        Ok(())
    }
}

fn validate_candidate(candidate: &MealCandidate) -> Result<()> {
    if candidate.name.trim().is_empty() {
        return Err(Error::InvalidMeal {
            message: "Meal name cannot be empty".to_string(),
        });
    }

    if !candidate.calories.is_finite() || candidate.calories < 0.0 {
        return Err(Error::InvalidMeal {
            message: format!("Calories must be a non-negative number, got {}", candidate.calories),
        });
    }

    let macros = [candidate.protein, candidate.carbs, candidate.fat];
    if macros
        .iter()
        .flatten()
        .any(|grams| !grams.is_finite() || *grams < 0.0)
    {
        return Err(Error::InvalidMeal {
            message: "Macro grams must be non-negative numbers".to_string(),
        });
    }

    Ok(())
}
