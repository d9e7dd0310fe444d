/// Barcode lookup client and response normalization
pub mod barcode;
/// Typed, fail-soft persistence of meals, water logs, streak and quick meals
pub mod persistence;
/// Scanning view state machine
pub mod scanner;
/// Consecutive-day streak calculation
pub mod streak;
/// Session coordinator for today's meals and water
pub mod tracker;

pub use barcode::{LookupOutcome, OpenFoodFactsClient, ProductLookup};
pub use scanner::{ScanSession, ScanState, scan_barcode};
pub use tracker::DailyTracker;
