//! Key-value entity - one row per storage key.
//! Each row holds the full JSON-encoded collection for that key, so every
//! write replaces the whole value.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kv_entries")]
pub struct Model {
    /// Storage key (e.g., `"meals"`, `"streak"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Raw encoded value
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTime,
}

/// `KvEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
