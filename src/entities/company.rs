//! Company entity - Represents a utility provider.
//!
//! Each company serves one utility type and publishes a ladder of discount
//! tiers, stored as a JSON array in `discount_tiers`. Contracted companies
//! get automated historical backfill and a point bonus multiplier.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Company database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    /// Unique identifier for the company
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Company name (e.g., "İSKİ", "Enerjisa")
    pub name: String,
    /// Short company code used on bills
    pub code: String,
    /// Utility this company provides: `"water"` or `"electricity"`
    pub utility_type: String,
    /// JSON array of discount tiers; malformed content degrades to defaults
    pub discount_tiers: String,
    /// Whether the company has a data-sharing contract with the platform
    pub is_contracted: bool,
}

/// Defines relationships between Company and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One company serves many subscriptions
    #[sea_orm(has_many = "super::subscription::Entity")]
    Subscriptions,
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
