//! Monthly comparison calculator.
//!
//! Derives, per utility type, the consumption delta between the two most
//! recent calendar-month periods that have data. Counter values are
//! cumulative, so a period's consumption is the latest reading of that
//! period minus the latest reading of the period before it; a subscription
//! without a prior-period baseline contributes zero rather than failing.
//! Insufficient history is a defined edge case, never an error: the caller
//! always gets a renderable comparison.

use crate::core::period::PeriodKey;
use crate::core::profile::{ConsumptionRecord, SubscriptionProfile, UtilityType};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// Savings percent is clamped to this closed range to guard against division
/// artifacts from near-zero denominators.
const SAVINGS_PERCENT_MIN: f64 = -100.0;
const SAVINGS_PERCENT_MAX: f64 = 80.0;

/// Current-versus-previous figures for one utility type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UtilityComparison {
    /// Aggregate consumption in the current period
    pub current: f64,
    /// Aggregate consumption in the previous period
    pub previous: f64,
    /// Savings percent, rounded to one decimal and clamped to [-100, +80]
    pub savings_percent: f64,
    /// Absolute savings amount (previous minus current), rounded to two decimals
    pub saved_amount: f64,
}

/// The engine's month-over-month comparison output.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyComparison {
    /// Most recent period with data (or the reference period when none exists)
    pub current_period: PeriodKey,
    /// Second most recent period with data (or the calendar month before)
    pub previous_period: PeriodKey,
    /// Water figures
    pub water: UtilityComparison,
    /// Electricity figures
    pub electricity: UtilityComparison,
}

impl MonthlyComparison {
    fn zeroed(current_period: PeriodKey) -> Self {
        Self {
            current_period,
            previous_period: current_period.prev(),
            water: UtilityComparison::default(),
            electricity: UtilityComparison::default(),
        }
    }
}

/// Latest counter value per (period, subscription), last-value-wins.
type PeriodReadings = BTreeMap<PeriodKey, HashMap<i64, (DateTime<Utc>, f64)>>;

fn bucket_latest_readings(
    records: &[ConsumptionRecord],
    subscriptions: &[SubscriptionProfile],
) -> PeriodReadings {
    let mut buckets: PeriodReadings = BTreeMap::new();

    for record in records {
        // Readings for unknown subscriptions cannot be attributed a utility
        if !subscriptions.iter().any(|s| s.id == record.subscription_id) {
            continue;
        }

        let period = PeriodKey::from_datetime(record.recorded_at);
        let entry = buckets
            .entry(period)
            .or_default()
            .entry(record.subscription_id)
            .or_insert((record.recorded_at, record.counter_value));
        if record.recorded_at >= entry.0 {
            *entry = (record.recorded_at, record.counter_value);
        }
    }

    buckets
}

/// Sums one period's consumption for one utility type.
///
/// Each subscription contributes `reading(period) - reading(baseline)` only
/// when a baseline reading exists for it; no baseline means no delta.
fn period_consumption(
    subscriptions: &[SubscriptionProfile],
    utility: UtilityType,
    period: Option<&HashMap<i64, (DateTime<Utc>, f64)>>,
    baseline: Option<&HashMap<i64, (DateTime<Utc>, f64)>>,
) -> f64 {
    let (Some(period), Some(baseline)) = (period, baseline) else {
        return 0.0;
    };

    subscriptions
        .iter()
        .filter(|s| s.utility_type == utility)
        .filter_map(|s| {
            let (_, value) = period.get(&s.id)?;
            let (_, base) = baseline.get(&s.id)?;
            Some(value - base)
        })
        .sum()
}

fn compare_utility(current_total: f64, previous_total: f64) -> UtilityComparison {
    let (saved_amount, savings_percent) = if previous_total > 0.0 && current_total > 0.0 {
        let amount = previous_total - current_total;
        let percent = round_dp(amount / previous_total * 100.0, 10.0)
            .clamp(SAVINGS_PERCENT_MIN, SAVINGS_PERCENT_MAX);
        (amount, percent)
    } else {
        (0.0, 0.0)
    };

    UtilityComparison {
        current: round_dp(current_total, 100.0),
        previous: round_dp(previous_total, 100.0),
        savings_percent,
        saved_amount: round_dp(saved_amount, 100.0),
    }
}

fn round_dp(value: f64, factor: f64) -> f64 {
    (value * factor).round() / factor
}

/// Computes the month-over-month comparison for a user's full record set.
///
/// `reference_time` anchors the "current" period only when fewer than two
/// periods of data exist; with enough history the result depends solely on
/// the records, keeping the computation deterministic and testable.
#[must_use]
pub fn calculate_monthly_comparison(
    records: &[ConsumptionRecord],
    subscriptions: &[SubscriptionProfile],
    reference_time: DateTime<Utc>,
) -> MonthlyComparison {
    let buckets = bucket_latest_readings(records, subscriptions);
    let periods: Vec<PeriodKey> = buckets.keys().rev().copied().collect();

    if periods.len() < 2 {
        let anchor = periods
            .first()
            .copied()
            .unwrap_or_else(|| PeriodKey::from_datetime(reference_time));
        return MonthlyComparison::zeroed(anchor);
    }

    let current = buckets.get(&periods[0]);
    let previous = buckets.get(&periods[1]);
    let two_back = periods.get(2).and_then(|p| buckets.get(p));

    let mut utilities = [UtilityType::Water, UtilityType::Electricity]
        .map(|utility| {
            let current_total = period_consumption(subscriptions, utility, current, previous);
            let previous_total = period_consumption(subscriptions, utility, previous, two_back);
            compare_utility(current_total, previous_total)
        })
        .into_iter();

    // The array above is [water, electricity]
    let water = utilities.next().unwrap_or_default();
    let electricity = utilities.next().unwrap_or_default();

    MonthlyComparison {
        current_period: periods[0],
        previous_period: periods[1],
        water,
        electricity,
    }
}
