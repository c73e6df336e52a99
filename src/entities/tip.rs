//! Tip entity - A savings suggestion users can apply for points.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tip database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tips")]
pub struct Model {
    /// Unique identifier for the tip
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Short headline
    pub title: String,
    /// Full suggestion text
    pub content: String,
    /// Free-form category label
    pub category: String,
    /// `"water"`, `"electricity"`, or `"general"`
    pub utility_type: String,
    /// Estimated savings percent if the tip is followed
    pub estimated_savings: f64,
    /// `"easy"`, `"medium"`, or `"hard"` - drives the default point reward
    pub difficulty: String,
    /// Explicit point reward; None falls back to the difficulty default
    pub points_reward: Option<i64>,
}

/// Defines relationships between Tip and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One tip can be applied by many users
    #[sea_orm(has_many = "super::applied_tip::Entity")]
    AppliedTips,
}

impl Related<super::applied_tip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppliedTips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
