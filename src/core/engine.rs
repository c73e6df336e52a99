//! The engine's function-call boundary.
//!
//! One call turns a user's subscriptions and full reading history into
//! everything the dashboard renders: the month-over-month comparison, the
//! period point score, and the per-company discount standings. The
//! computation is pure and synchronous; calling it twice with identical
//! inputs produces identical output, and wall-clock time only enters through
//! the injected `reference_time`.

use crate::config::scoring::ScoringConfig;
use crate::core::comparison::{MonthlyComparison, calculate_monthly_comparison};
use crate::core::discounts::{CompanyDiscount, calculate_company_discounts};
use crate::core::points::calculate_monthly_points;
use crate::core::profile::{ConsumptionRecord, SubscriptionProfile};
use chrono::{DateTime, Utc};

/// Everything one dashboard evaluation produces.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSnapshot {
    /// Month-over-month consumption comparison across all subscriptions
    pub comparison: MonthlyComparison,
    /// Period-scoped gamification score
    pub monthly_points: i64,
    /// One standing per subscription with current-period data
    pub discounts: Vec<CompanyDiscount>,
}

/// Evaluates the full dashboard for one user's data.
#[must_use]
pub fn evaluate(
    subscriptions: &[SubscriptionProfile],
    records: &[ConsumptionRecord],
    scoring: &ScoringConfig,
    reference_time: DateTime<Utc>,
) -> DashboardSnapshot {
    let comparison = calculate_monthly_comparison(records, subscriptions, reference_time);
    let monthly_points = calculate_monthly_points(&comparison, records, scoring);
    let discounts = calculate_company_discounts(subscriptions, records, scoring, reference_time);

    DashboardSnapshot {
        comparison,
        monthly_points,
        discounts,
    }
}
