//! Entity module - Contains the SeaORM entity definitions for the durable store.

pub mod kv_entry;

pub use kv_entry::{Column as KvEntryColumn, Entity as KvEntry, Model as KvEntryModel};
