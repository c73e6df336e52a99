//! Savings tips - listing and application.
//!
//! Users can apply a limited number of tips per month; each application is
//! recorded once and credits a point reward. Rewards come from the tip row
//! when set, otherwise from the difficulty level, otherwise from the
//! configured default.

use crate::config::scoring::ScoringConfig;
use crate::core::period::PeriodKey;
use crate::entities::{AppliedTip, Tip, applied_tip, tip, user};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    Set, TransactionTrait, sea_query::Expr,
};
use tracing::info;

/// What applying a tip earned the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTipOutcome {
    /// Headline of the applied tip
    pub tip_title: String,
    /// Points credited to the lifetime total
    pub earned_points: i64,
    /// Applications left this month after this one
    pub remaining_this_month: u32,
}

/// The point reward a tip grants when applied.
///
/// An explicit `points_reward` wins; otherwise the difficulty level maps to
/// 8/12/15 points for easy/medium/hard, with the configured default for
/// anything unrecognized.
#[must_use]
pub fn tip_reward(tip: &tip::Model, scoring: &ScoringConfig) -> i64 {
    tip.points_reward.unwrap_or(match tip.difficulty.as_str() {
        "easy" => 8,
        "medium" => 12,
        "hard" => 15,
        _ => scoring.default_tip_reward,
    })
}

/// Lists tips the user has not applied yet, up to `limit`.
pub async fn list_unapplied_tips(
    db: &DatabaseConnection,
    user_id: i64,
    limit: u64,
) -> Result<Vec<tip::Model>> {
    let applied_ids: Vec<i64> = AppliedTip::find()
        .filter(applied_tip::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|a| a.tip_id)
        .collect();

    let mut query = Tip::find();
    if !applied_ids.is_empty() {
        query = query.filter(tip::Column::Id.is_not_in(applied_ids));
    }

    query.limit(limit).all(db).await.map_err(Into::into)
}

/// Applies a tip for a user.
///
/// Enforces the monthly application limit, rejects duplicates, records the
/// application, and credits the reward to the user's lifetime total. The
/// limit counter belongs to the calendar month of `tips_reset_at`; a
/// `reference_time` in a later month starts a fresh count. All writes happen
/// in one transaction.
pub async fn apply_tip(
    db: &DatabaseConnection,
    user_id: i64,
    tip_id: i64,
    scoring: &ScoringConfig,
    reference_time: DateTime<Utc>,
) -> Result<AppliedTipOutcome> {
    let txn = db.begin().await?;

    let user = user::Entity::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let same_period = PeriodKey::from_datetime(user.tips_reset_at)
        == PeriodKey::from_datetime(reference_time);
    let used = if same_period {
        u32::try_from(user.monthly_tips_used.max(0)).unwrap_or(u32::MAX)
    } else {
        0
    };
    if used >= scoring.monthly_tip_limit {
        return Err(Error::TipLimitReached {
            limit: scoring.monthly_tip_limit,
        });
    }

    let already_applied = AppliedTip::find()
        .filter(applied_tip::Column::UserId.eq(user_id))
        .filter(applied_tip::Column::TipId.eq(tip_id))
        .one(&txn)
        .await?
        .is_some();
    if already_applied {
        return Err(Error::TipAlreadyApplied { id: tip_id });
    }

    let tip = Tip::find_by_id(tip_id)
        .one(&txn)
        .await?
        .ok_or(Error::TipNotFound { id: tip_id })?;

    let earned = tip_reward(&tip, scoring);

    let application = applied_tip::ActiveModel {
        user_id: Set(user_id),
        tip_id: Set(tip_id),
        earned_points: Set(earned),
        applied_at: Set(reference_time),
        ..Default::default()
    };
    application.insert(&txn).await?;

    // used is below the (small) configured limit, so the cast cannot overflow
    #[allow(clippy::cast_possible_wrap)]
    let new_used = (used + 1) as i32;
    user::Entity::update_many()
        .col_expr(user::Column::MonthlyTipsUsed, Expr::value(new_used))
        .col_expr(user::Column::TipsResetAt, Expr::value(reference_time))
        .col_expr(
            user::Column::TotalPoints,
            Expr::col(user::Column::TotalPoints).add(earned),
        )
        .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(user::Column::Id.eq(user_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    info!(tip = %tip.title, points = earned, "Applied savings tip");

    Ok(AppliedTipOutcome {
        tip_title: tip.title,
        earned_points: earned,
        remaining_this_month: scoring.monthly_tip_limit - used - 1,
    })
}
