//! Subscription entity - One utility contract between a user and a company.
//!
//! The utility type is fixed at creation time. Subscriptions may be
//! deactivated but are never deleted while consumption records reference
//! them, so historical comparisons stay intact.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subscription database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    /// Unique identifier for the subscription
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Providing company
    pub company_id: i64,
    /// Subscriber number printed on the bill
    pub subscriber_no: String,
    /// `"water"` or `"electricity"`, immutable once created
    pub utility_type: String,
    /// Inactive subscriptions are excluded from loading and entry
    pub is_active: bool,
    /// When the subscription was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Subscription and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each subscription belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each subscription belongs to exactly one company
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
    /// One subscription accumulates many consumption records
    #[sea_orm(has_many = "super::consumption::Entity")]
    Consumptions,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::consumption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consumptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
