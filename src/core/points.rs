//! Gamification points calculator.
//!
//! Converts a monthly comparison plus the raw record set into an integer
//! point score for the current period. The formula is additive: savings are
//! rewarded, increased usage is (more lightly) penalized, entering readings
//! earns a small flat bonus, and regular consecutive readings earn a streak
//! bonus. The total never goes below zero: users can fail to gain points
//! but never lose banked ones through this formula.
//!
//! The score is period-scoped and recomputed fresh on every evaluation; the
//! lifetime `total_points` accumulator is maintained separately as records
//! and tips are inserted.

use crate::config::scoring::ScoringConfig;
use crate::core::comparison::MonthlyComparison;
use crate::core::period::PeriodKey;
use crate::core::profile::ConsumptionRecord;

/// Counts the streak of consecutive readings taken no more than the
/// configured window apart, newest first, inspecting at most
/// `streak_max_pairs` consecutive pairs.
fn reading_streak(records: &[ConsumptionRecord], scoring: &ScoringConfig) -> usize {
    let mut sorted: Vec<&ConsumptionRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

    let mut streak = 0;
    for pair in sorted.windows(2).take(scoring.streak_max_pairs) {
        let gap_days = (pair[0].recorded_at - pair[1].recorded_at).num_days();
        if gap_days <= scoring.streak_window_days {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Computes the period-scoped point score.
///
/// Each term is computed independently and summed; the rounded total is
/// floored at zero.
#[must_use]
pub fn calculate_monthly_points(
    comparison: &MonthlyComparison,
    records: &[ConsumptionRecord],
    scoring: &ScoringConfig,
) -> i64 {
    let mut points = 0.0;

    for utility in [&comparison.water, &comparison.electricity] {
        let percent = utility.savings_percent;
        if percent > 0.0 {
            points += percent * scoring.savings_reward_multiplier;
        }
        if percent < 0.0 {
            // percent is negative here, so this subtracts
            points += percent * scoring.overuse_penalty_multiplier;
        }
    }

    let current_period_records = records
        .iter()
        .filter(|r| PeriodKey::from_datetime(r.recorded_at) == comparison.current_period)
        .count();
    #[allow(clippy::cast_precision_loss)]
    {
        points += current_period_records as f64 * scoring.points_per_reading;
        points += reading_streak(records, scoring) as f64 * scoring.streak_bonus;
    }

    // Scores are small enough that the cast is exact
    #[allow(clippy::cast_possible_truncation)]
    let score = points.round().max(0.0) as i64;
    score
}
