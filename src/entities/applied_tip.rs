//! Applied-tip entity - Records that a user applied a tip and what it earned.
//!
//! At most one row per (user, tip) pair; duplicates are rejected at
//! application time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Applied tip database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applied_tips")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who applied the tip
    pub user_id: i64,
    /// The applied tip
    pub tip_id: i64,
    /// Points credited to the user when the tip was applied
    pub earned_points: i64,
    /// When the tip was applied
    pub applied_at: DateTimeUtc,
}

/// Defines relationships between `AppliedTip` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each application belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each application references one tip
    #[sea_orm(
        belongs_to = "super::tip::Entity",
        from = "Column::TipId",
        to = "super::tip::Column::Id"
    )]
    Tip,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::tip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tip.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
