//! Unified error type for the meal logging core.
//!
//! Decode failures on stored collections and barcode lookup failures never surface here;
//! both degrade to empty/absent values at the point where they happen.

use thiserror::Error;

/// Errors returned by store, persistence and tracker operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// The sea-orm backed store failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The in-memory store could not be accessed
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable description of the problem
        message: String,
    },

    /// A collection could not be encoded for writing
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No meal with this id is logged for the session date
    #[error("Meal not found: {id}")]
    MealNotFound {
        /// The requested meal id
        id: i64,
    },

    /// No quick meal template with this id exists
    #[error("Quick meal not found: {id}")]
    QuickMealNotFound {
        /// The requested template id
        id: i64,
    },

    /// Water count outside `0..=MAX_GLASSES`
    #[error("Invalid water count: {glasses} glasses")]
    InvalidWaterCount {
        /// The rejected glass count
        glasses: u8,
    },

    /// Meal payload failed validation
    #[error("Invalid meal: {message}")]
    InvalidMeal {
        /// Human-readable description of the problem
        message: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
