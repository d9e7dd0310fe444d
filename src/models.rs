//! Domain types for meals, water logs, streaks and quick-meal templates.
//!
//! The serde layout matches the JSON stored under the fixed storage keys, so field names
//! are camelCase and absent optional fields are omitted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily water goal and upper bound for a [`WaterLog`].
pub const MAX_GLASSES: u8 = 8;

/// Meal-time category shown next to a logged meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealTime {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Anything in between
    Snack,
}

/// How the user felt after a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Felt great
    Great,
    /// Felt good
    Good,
    /// Felt okay
    Okay,
    /// Felt bad
    Bad,
}

/// A logged meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Unique, monotonically increasing identity assigned at creation
    pub id: i64,
    /// Display name
    pub name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Carbohydrates in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Fat in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    /// Calendar day the meal was logged on (`YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Meal-time category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_time: Option<MealTime>,
    /// Source barcode when the meal came from a scan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Post-meal mood, set after creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

/// Meal payload before an id and date are assigned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MealCandidate {
    /// Display name
    pub name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: Option<f64>,
    /// Carbohydrates in grams
    pub carbs: Option<f64>,
    /// Fat in grams
    pub fat: Option<f64>,
    /// Meal-time category
    pub meal_time: Option<MealTime>,
    /// Source barcode
    pub barcode: Option<String>,
}

impl MealCandidate {
    /// Creates a candidate with just a name and calories.
    #[must_use]
    pub fn new(name: impl Into<String>, calories: f64) -> Self {
        Self {
            name: name.into(),
            calories,
            ..Self::default()
        }
    }

    /// Stamps the candidate with an identity and a logging date.
    #[must_use]
    pub fn into_meal(self, id: i64, date: NaiveDate) -> Meal {
        Meal {
            id,
            name: self.name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            date,
            meal_time: self.meal_time,
            barcode: self.barcode,
            mood: None,
        }
    }
}

/// Glass count for one calendar day. The date is the natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterLog {
    /// Day this count belongs to
    pub date: NaiveDate,
    /// Glasses drunk, within `0..=MAX_GLASSES`
    pub glasses: u8,
}

/// Single global streak record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStreak {
    /// Consecutive logged days
    pub current_streak: u32,
    /// Last day a meal was logged
    pub last_log_date: NaiveDate,
}

/// Reusable meal template without a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickMeal {
    /// Template identity
    pub id: i64,
    /// Display name
    pub name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Carbohydrates in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Fat in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    /// Meal-time category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_time: Option<MealTime>,
}

impl QuickMeal {
    /// Builds a template from a candidate; the barcode is not kept.
    #[must_use]
    pub fn from_candidate(id: i64, candidate: MealCandidate) -> Self {
        Self {
            id,
            name: candidate.name,
            calories: candidate.calories,
            protein: candidate.protein,
            carbs: candidate.carbs,
            fat: candidate.fat,
            meal_time: candidate.meal_time,
        }
    }

    /// Turns the template back into a meal payload.
    #[must_use]
    pub fn to_candidate(&self) -> MealCandidate {
        MealCandidate {
            name: self.name.clone(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            meal_time: self.meal_time,
            barcode: None,
        }
    }
}

/// Normalized product data returned by a barcode lookup.
///
/// Values are unrounded; rounding happens in [`NutritionRecord::to_candidate`].
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionRecord {
    /// Product display name
    pub name: String,
    /// kcal, per 100g when the database provides it
    pub calories: f64,
    /// Protein grams
    pub protein: f64,
    /// Carbohydrate grams
    pub carbs: f64,
    /// Fat grams
    pub fat: f64,
    /// The barcode that was looked up
    pub barcode: String,
}

impl NutritionRecord {
    /// Converts a confirmed scan into a meal payload.
    ///
    /// Calories round to the nearest integer and macros to the nearest 0.1 gram.
    /// Scanned products are always logged as snacks.
    #[must_use]
    pub fn to_candidate(&self) -> MealCandidate {
        MealCandidate {
            name: self.name.clone(),
            calories: self.calories.round(),
            protein: Some(round_tenth(self.protein)),
            carbs: Some(round_tenth(self.carbs)),
            fat: Some(round_tenth(self.fat)),
            meal_time: Some(MealTime::Snack),
            barcode: Some(self.barcode.clone()),
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sums over the meals logged for one day.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutritionTotals {
    /// Total kcal
    pub calories: f64,
    /// Total protein grams
    pub protein: f64,
    /// Total carbohydrate grams
    pub carbs: f64,
    /// Total fat grams
    pub fat: f64,
}

impl NutritionTotals {
    /// Sums the given meals, treating missing macros as zero.
    #[must_use]
    pub fn from_meals(meals: &[Meal]) -> Self {
        meals.iter().fold(Self::default(), |acc, meal| Self {
            calories: acc.calories + meal.calories,
            protein: acc.protein + meal.protein.unwrap_or(0.0),
            carbs: acc.carbs + meal.carbs.unwrap_or(0.0),
            fat: acc.fat + meal.fat.unwrap_or(0.0),
        })
    }
}
