//! Typed data-access boundary between the store and the pure engine.
//!
//! The database keeps subscriptions, companies, and readings in separate
//! tables with stringly-typed columns; the engine wants normalized values:
//! one company per subscription, a parsed utility type, and a tier ladder
//! decoded from JSON exactly once. Everything the calculators consume is
//! resolved here, so nothing downstream touches ORM rows or re-parses
//! configuration.

use crate::core::tiers::DiscountTier;
use crate::entities::{Subscription, consumption, subscription, user};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, sea_query::Expr,
};
use std::fmt;
use tracing::warn;

/// The two utilities the platform tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UtilityType {
    /// Water, metered in m³
    Water,
    /// Electricity, metered in kWh
    Electricity,
}

impl UtilityType {
    /// Parses the database representation.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "water" => Ok(Self::Water),
            "electricity" => Ok(Self::Electricity),
            other => Err(Error::UnknownUtilityType {
                value: other.to_string(),
            }),
        }
    }

    /// Database/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Electricity => "electricity",
        }
    }

    /// Measurement unit shown next to counter values.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Water => "m³",
            Self::Electricity => "kWh",
        }
    }
}

impl fmt::Display for UtilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A company as the engine sees it: tier ladder already decoded.
#[derive(Clone, Debug, PartialEq)]
pub struct CompanyProfile {
    /// Company primary key
    pub id: i64,
    /// Company display name
    pub name: String,
    /// Short company code
    pub code: String,
    /// Whether the company is contracted (point bonus multiplier applies)
    pub is_contracted: bool,
    /// Decoded discount ladder; empty means "use the default ladder"
    pub tiers: Vec<DiscountTier>,
}

/// A subscription with its single company resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct SubscriptionProfile {
    /// Subscription primary key
    pub id: i64,
    /// Utility this subscription meters
    pub utility_type: UtilityType,
    /// The providing company
    pub company: CompanyProfile,
}

/// One meter reading, detached from the ORM.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsumptionRecord {
    /// Subscription the reading belongs to
    pub subscription_id: i64,
    /// Cumulative counter value
    pub counter_value: f64,
    /// When the reading was taken
    pub recorded_at: DateTime<Utc>,
    /// Lifetime points granted at insertion time
    pub awarded_points: i64,
}

impl From<&consumption::Model> for ConsumptionRecord {
    fn from(model: &consumption::Model) -> Self {
        Self {
            subscription_id: model.subscription_id,
            counter_value: model.counter_value,
            recorded_at: model.recorded_at,
            awarded_points: model.awarded_points,
        }
    }
}

/// Loads a user by id.
pub async fn get_user(db: &DatabaseConnection, user_id: i64) -> Result<user::Model> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })
}

/// Loads all active subscriptions of a user with their companies resolved.
///
/// The subscription→company join is performed once, here. A malformed
/// discount-tier column is logged and degraded to an empty ladder (the tier
/// resolver substitutes the company's defaults); a missing company row is a
/// data integrity error and is reported as such.
pub async fn load_subscription_profiles(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<SubscriptionProfile>> {
    let rows = Subscription::find()
        .filter(subscription::Column::UserId.eq(user_id))
        .filter(subscription::Column::IsActive.eq(true))
        .find_also_related(crate::entities::Company)
        .order_by_desc(subscription::Column::CreatedAt)
        .all(db)
        .await?;

    let mut profiles = Vec::with_capacity(rows.len());
    for (sub, company) in rows {
        let company = company.ok_or(Error::CompanyNotFound {
            subscription_id: sub.id,
        })?;

        let tiers: Vec<DiscountTier> = serde_json::from_str(&company.discount_tiers)
            .unwrap_or_else(|e| {
                warn!(
                    company = %company.name,
                    "Malformed discount tiers, falling back to defaults: {e}"
                );
                Vec::new()
            });

        profiles.push(SubscriptionProfile {
            id: sub.id,
            utility_type: UtilityType::parse(&sub.utility_type)?,
            company: CompanyProfile {
                id: company.id,
                name: company.name,
                code: company.code,
                is_contracted: company.is_contracted,
                tiers,
            },
        });
    }

    Ok(profiles)
}

/// Loads every consumption record belonging to the given subscriptions,
/// newest first, already detached into engine records.
pub async fn load_consumption_records(
    db: &DatabaseConnection,
    subscriptions: &[SubscriptionProfile],
) -> Result<Vec<ConsumptionRecord>> {
    if subscriptions.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = subscriptions.iter().map(|s| s.id).collect();
    let rows = crate::entities::Consumption::find()
        .filter(consumption::Column::SubscriptionId.is_in(ids))
        .order_by_desc(consumption::Column::RecordedAt)
        .all(db)
        .await?;

    Ok(rows.iter().map(ConsumptionRecord::from).collect())
}

/// Persists the recomputed monthly score on the user row.
///
/// Only `monthly_points` is overwritten; it is derived fresh on every
/// evaluation. The lifetime `total_points` column is a running accumulator
/// maintained incrementally by reading entry and tip application and is
/// never recomputed here.
pub async fn sync_user_points(
    db: &DatabaseConnection,
    user_id: i64,
    monthly_points: i64,
) -> Result<()> {
    let result = user::Entity::update_many()
        .col_expr(user::Column::MonthlyPoints, Expr::value(monthly_points))
        .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(user::Column::Id.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::UserNotFound { id: user_id });
    }
    Ok(())
}

/// Atomically adds points to the user's lifetime total.
///
/// Uses a single SQL UPDATE (`total_points = total_points + delta`) so
/// concurrent awards cannot lose updates.
pub async fn add_user_points_atomic<C>(db: &C, user_id: i64, delta: i64) -> Result<()>
where
    C: sea_orm::ConnectionTrait,
{
    let result = user::Entity::update_many()
        .col_expr(
            user::Column::TotalPoints,
            Expr::col(user::Column::TotalPoints).add(delta),
        )
        .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(user::Column::Id.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::UserNotFound { id: user_id });
    }
    Ok(())
}
