//! Reading entry - validation and persistence of new counter values.
//!
//! This is the only place in the domain with a hard validation failure:
//! counters are cumulative, so a new reading below the latest recorded value
//! for the subscription is rejected with a descriptive error before anything
//! is written. Equal readings are accepted (a meter can stand still).
//! Successful manual entry awards a fixed number of lifetime points on the
//! record and on the user row.
//!
//! Timestamps are supplied by the caller rather than sampled here, which
//! keeps historical backfill for contracted companies possible and entry
//! behavior deterministic under test.

use crate::config::scoring::ScoringConfig;
use crate::core::profile::add_user_points_atomic;
use crate::entities::{Subscription, consumption};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use tracing::info;

/// Validates a submitted counter value against the latest recorded one.
///
/// Pure; shared by entry and by anything that wants to pre-validate user
/// input before hitting the database.
pub fn validate_counter_value(last: Option<f64>, submitted: f64) -> Result<()> {
    if !submitted.is_finite() || submitted < 0.0 {
        return Err(Error::InvalidReading { value: submitted });
    }

    if let Some(last) = last
        && submitted < last
    {
        return Err(Error::CounterRegression { last, submitted });
    }

    Ok(())
}

/// Returns the most recent reading for a subscription, if any.
pub async fn get_latest_reading(
    db: &DatabaseConnection,
    subscription_id: i64,
) -> Result<Option<consumption::Model>> {
    crate::entities::Consumption::find()
        .filter(consumption::Column::SubscriptionId.eq(subscription_id))
        .order_by_desc(consumption::Column::RecordedAt)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records a new counter reading for an active subscription.
///
/// Rejects readings for missing or inactive subscriptions and readings that
/// would make the counter go backward. On success the configured manual-entry
/// award is stored on the record and added atomically to the user's lifetime
/// total; both writes commit together or not at all.
pub async fn record_reading(
    db: &DatabaseConnection,
    user_id: i64,
    subscription_id: i64,
    counter_value: f64,
    recorded_at: DateTime<Utc>,
    scoring: &ScoringConfig,
) -> Result<consumption::Model> {
    let txn = db.begin().await?;

    let sub = Subscription::find_by_id(subscription_id)
        .one(&txn)
        .await?
        .filter(|s| s.is_active)
        .ok_or(Error::SubscriptionNotFound {
            id: subscription_id,
        })?;

    let latest = crate::entities::Consumption::find()
        .filter(consumption::Column::SubscriptionId.eq(subscription_id))
        .order_by_desc(consumption::Column::RecordedAt)
        .one(&txn)
        .await?;

    validate_counter_value(latest.as_ref().map(|r| r.counter_value), counter_value)?;

    let model = consumption::ActiveModel {
        subscription_id: Set(subscription_id),
        user_id: Set(user_id),
        counter_value: Set(counter_value),
        recorded_at: Set(recorded_at),
        awarded_points: Set(scoring.manual_reading_award),
        ..Default::default()
    };
    let record = model.insert(&txn).await?;

    add_user_points_atomic(&txn, user_id, scoring.manual_reading_award).await?;

    txn.commit().await?;

    info!(
        subscription = %sub.subscriber_no,
        value = counter_value,
        "Recorded new counter reading"
    );

    Ok(record)
}
