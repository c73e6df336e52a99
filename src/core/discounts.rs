//! Per-company discount assignment.
//!
//! For every subscription with at least one reading in the current period,
//! computes a period-scoped point score from that subscription's own
//! current-period records, applies the contracted-company bonus, and maps
//! the score onto the company's discount ladder.

use crate::config::scoring::ScoringConfig;
use crate::core::comparison::calculate_monthly_comparison;
use crate::core::period::PeriodKey;
use crate::core::points::calculate_monthly_points;
use crate::core::profile::{ConsumptionRecord, SubscriptionProfile, UtilityType};
use crate::core::tiers::{DiscountTier, default_discount_tiers, resolve_tier};
use chrono::{DateTime, Utc};

/// Discount standing with one company, derived from one subscription.
#[derive(Clone, Debug, PartialEq)]
pub struct CompanyDiscount {
    /// Company primary key
    pub company_id: i64,
    /// Company display name
    pub company_name: String,
    /// Short company code
    pub company_code: String,
    /// Utility of the underlying subscription
    pub utility_type: UtilityType,
    /// Whether the contracted bonus was applied
    pub is_contracted: bool,
    /// Period-scoped points earned with this company this month
    pub monthly_points: i64,
    /// Lifetime points accumulated across all of this subscription's records
    pub total_points: i64,
    /// Name of the currently held tier
    pub current_tier_name: String,
    /// Discount percent of the currently held tier
    pub current_discount_percent: f64,
    /// Next tier up, if one exists
    pub next_tier_name: Option<String>,
    /// Discount percent of the next tier (0 at the top)
    pub next_tier_discount: f64,
    /// Points still needed to reach the next tier (0 at the top)
    pub next_tier_points_needed: i64,
    /// Progress within the current tier band, 0-100
    pub progress_percent: i64,
    /// The effective ladder the standing was resolved against
    pub tiers: Vec<DiscountTier>,
}

/// Computes discount standings for every subscription that has at least one
/// reading in the current period.
///
/// The monthly score for a company considers only that subscription's
/// current-period records, so with a single period of data the savings terms
/// are zero and the score comes from reading and streak bonuses. Contracted
/// companies get the configured bonus multiplier, rounded.
#[must_use]
pub fn calculate_company_discounts(
    subscriptions: &[SubscriptionProfile],
    records: &[ConsumptionRecord],
    scoring: &ScoringConfig,
    reference_time: DateTime<Utc>,
) -> Vec<CompanyDiscount> {
    let current_period = PeriodKey::from_datetime(reference_time);
    let mut discounts = Vec::new();

    for subscription in subscriptions {
        let monthly_records: Vec<ConsumptionRecord> = records
            .iter()
            .filter(|r| {
                r.subscription_id == subscription.id
                    && PeriodKey::from_datetime(r.recorded_at) == current_period
            })
            .cloned()
            .collect();

        if monthly_records.is_empty() {
            continue;
        }

        let comparison = calculate_monthly_comparison(
            &monthly_records,
            std::slice::from_ref(subscription),
            reference_time,
        );
        let mut monthly_points = calculate_monthly_points(&comparison, &monthly_records, scoring);

        let company = &subscription.company;
        if company.is_contracted {
            // Bonus totals stay far below 2^52, so the round trip is exact
            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            {
                monthly_points = (monthly_points as f64 * scoring.contracted_bonus).round() as i64;
            }
        }

        let total_points: i64 = records
            .iter()
            .filter(|r| r.subscription_id == subscription.id)
            .map(|r| r.awarded_points)
            .sum();

        let ladder = if company.tiers.is_empty() {
            default_discount_tiers(&company.name)
        } else {
            company.tiers.clone()
        };
        let status = resolve_tier(&company.name, &ladder, monthly_points);

        discounts.push(CompanyDiscount {
            company_id: company.id,
            company_name: company.name.clone(),
            company_code: company.code.clone(),
            utility_type: subscription.utility_type,
            is_contracted: company.is_contracted,
            monthly_points,
            total_points,
            current_tier_name: status.tier_name,
            current_discount_percent: status.discount_percent,
            next_tier_name: status.next_tier_name,
            next_tier_discount: status.next_tier_discount,
            next_tier_points_needed: status.next_tier_points_needed,
            progress_percent: status.progress_percent,
            tiers: ladder,
        });
    }

    discounts
}
