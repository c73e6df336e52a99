//! User entity - Represents one resident account.
//!
//! Each user lives in one apartment of a building, holds running point
//! accumulators (`monthly_points` recomputed per dashboard refresh,
//! `total_points` a lifetime sum), and a per-month counter of applied tips.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the resident
    pub name: String,
    /// Apartment number inside the building (e.g., "4B")
    pub apartment_number: String,
    /// Building this user's apartment belongs to
    pub building_id: i64,
    /// Number of people in the household
    pub family_size: i32,
    /// Period-scoped point score, overwritten on each dashboard evaluation
    pub monthly_points: i64,
    /// Lifetime point accumulator (reading awards, tip rewards)
    pub total_points: i64,
    /// Tips applied by this user in the current month
    pub monthly_tips_used: i32,
    /// When the tip counter was last reset; a new calendar month zeroes it
    pub tips_reset_at: DateTimeUtc,
    /// Last time the point accumulators were written
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user holds many utility subscriptions
    #[sea_orm(has_many = "super::subscription::Entity")]
    Subscriptions,
    /// One user creates many consumption records
    #[sea_orm(has_many = "super::consumption::Entity")]
    Consumptions,
    /// One user applies many tips
    #[sea_orm(has_many = "super::applied_tip::Entity")]
    AppliedTips,
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl Related<super::consumption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consumptions.def()
    }
}

impl Related<super::applied_tip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppliedTips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
