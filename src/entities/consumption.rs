//! Consumption entity - One cumulative meter reading event.
//!
//! `counter_value` is an absolute counter reading, not a delta; period
//! consumption is derived by the engine from consecutive readings. Records
//! are append-only: the engine never mutates or deletes them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Consumption record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "consumptions")]
pub struct Model {
    /// Unique identifier for the reading
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Subscription the reading was taken against
    pub subscription_id: i64,
    /// User who entered (or was backfilled) the reading
    pub user_id: i64,
    /// Cumulative counter value, monotonically non-decreasing per subscription
    pub counter_value: f64,
    /// When the reading was taken; determines the year-month period bucket
    pub recorded_at: DateTimeUtc,
    /// Fixed points granted when this record was inserted
    pub awarded_points: i64,
}

/// Defines relationships between Consumption and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each reading belongs to one subscription
    #[sea_orm(
        belongs_to = "super::subscription::Entity",
        from = "Column::SubscriptionId",
        to = "super::subscription::Column::Id"
    )]
    Subscription,
    /// Each reading belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscription.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
