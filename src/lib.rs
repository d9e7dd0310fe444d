//! `meal-streak` - the logic core of a meal and hydration logger
//!
//! This crate records meals (typed in or resolved from a product barcode), tracks daily
//! water intake, and keeps a running daily nutrition summary with a consecutive-day
//! logging streak. All state lives in a string-keyed store as JSON collections, behind
//! an injected [`store::KeyValueStore`] port and an injected [`clock::Clock`].

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Style consistency
    clippy::enum_glob_use,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
)]

/// Injected current-date source
pub mod clock;
/// Configuration management for storage and barcode lookup settings
pub mod config;
/// Core logic - persistence, streak, barcode lookup, scanning and the session tracker
pub mod core;
/// SeaORM entity definitions for the durable store
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Meals, water logs, streaks and quick-meal templates
pub mod models;
/// Key-value storage port and its adapters
pub mod store;
/// Tracing subscriber setup
pub mod telemetry;

pub use crate::core::{DailyTracker, LookupOutcome, OpenFoodFactsClient, ProductLookup};
pub use errors::{Error, Result};

#[cfg(test)]
pub mod test_utils;
