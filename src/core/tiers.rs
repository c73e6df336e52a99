//! Discount tier resolution.
//!
//! Each company publishes a ladder of point thresholds mapped to discount
//! percentages. The resolver picks the highest tier whose threshold the
//! user's monthly points meet and reports progress toward the next one.
//! Missing or malformed ladders are never an error: four companies have
//! bespoke default ladders and every other name gets a generic five-tier
//! ladder, so the computation always produces a usable answer.

use serde::{Deserialize, Serialize};

/// One rung of a company's discount ladder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    /// Point threshold; ladders are ordered ascending by this value
    pub min_points: i64,
    /// Discount granted once the threshold is met
    pub discount_percent: f64,
    /// Display name; None falls back to a positional label
    #[serde(default)]
    pub tier_name: Option<String>,
}

impl DiscountTier {
    fn new(min_points: i64, discount_percent: f64, tier_name: &str) -> Self {
        Self {
            min_points,
            discount_percent,
            tier_name: Some(tier_name.to_string()),
        }
    }
}

/// Resolved tier standing for one point total against one ladder.
#[derive(Clone, Debug, PartialEq)]
pub struct TierStatus {
    /// Name of the tier currently held
    pub tier_name: String,
    /// Discount percent of the current tier
    pub discount_percent: f64,
    /// Name of the next tier up, if any
    pub next_tier_name: Option<String>,
    /// Discount percent of the next tier up (0 when at the top)
    pub next_tier_discount: f64,
    /// Points still needed to reach the next tier (0 when at the top)
    pub next_tier_points_needed: i64,
    /// Progress within the current tier band, 0-100
    pub progress_percent: i64,
}

/// The default ladder for a company name.
///
/// İSKİ, Aydem, Enerjisa, and TESKİ carry bespoke ladders; any other name
/// gets the generic five-tier ladder (0/100/300/600/1000 points mapping to
/// 0/3/6/10/15% discounts).
#[must_use]
pub fn default_discount_tiers(company_name: &str) -> Vec<DiscountTier> {
    match company_name {
        "İSKİ" => vec![
            DiscountTier::new(0, 0.0, "Başlangıç"),
            DiscountTier::new(50, 2.0, "Tasarrufçu"),
            DiscountTier::new(120, 5.0, "Su Dostu"),
            DiscountTier::new(250, 8.0, "Eko Elçisi"),
            DiscountTier::new(500, 12.0, "Su Kahramanı"),
        ],
        "Aydem" => vec![
            DiscountTier::new(0, 0.0, "Başlangıç"),
            DiscountTier::new(40, 1.0, "Tasarrufçu"),
            DiscountTier::new(100, 3.0, "Enerji Dostu"),
            DiscountTier::new(200, 6.0, "Eko Champion"),
            DiscountTier::new(400, 10.0, "Enerji Lideri"),
        ],
        "Enerjisa" => vec![
            DiscountTier::new(0, 0.0, "Başlangıç"),
            DiscountTier::new(60, 2.0, "Tasarrufçu"),
            DiscountTier::new(150, 5.0, "Eko Gönüllü"),
            DiscountTier::new(300, 9.0, "Eko Lider"),
            DiscountTier::new(600, 14.0, "Eko Visioner"),
        ],
        "TESKİ" => vec![
            DiscountTier::new(0, 0.0, "Başlangıç"),
            DiscountTier::new(80, 3.0, "Tasarrufçu"),
            DiscountTier::new(200, 6.0, "Su Koruyucusu"),
            DiscountTier::new(400, 10.0, "Eko Champion"),
            DiscountTier::new(800, 15.0, "Su Elçisi"),
        ],
        _ => vec![
            DiscountTier::new(0, 0.0, "Başlangıç"),
            DiscountTier::new(100, 3.0, "Tasarrufçu"),
            DiscountTier::new(300, 6.0, "Çevre Dostu"),
            DiscountTier::new(600, 10.0, "Eko Gönüllü"),
            DiscountTier::new(1000, 15.0, "Eko Lider"),
        ],
    }
}

fn tier_label(tier: &DiscountTier, index: usize) -> String {
    tier.tier_name
        .clone()
        .unwrap_or_else(|| format!("Seviye {}", index + 1))
}

/// Resolves the current tier and progress-to-next for a point total.
///
/// `tiers` must be ordered ascending by `min_points`; an empty slice is
/// substituted with the company's default ladder. Scans from the highest
/// threshold down and takes the first tier the points satisfy. Points below
/// the lowest threshold (only possible when that threshold is above zero)
/// fall back to the lowest tier with a best-effort progress figure.
#[must_use]
pub fn resolve_tier(company_name: &str, tiers: &[DiscountTier], points: i64) -> TierStatus {
    let defaults;
    let tiers = if tiers.is_empty() {
        defaults = default_discount_tiers(company_name);
        &defaults
    } else {
        tiers
    };

    for (i, tier) in tiers.iter().enumerate().rev() {
        if points >= tier.min_points {
            return match tiers.get(i + 1) {
                Some(next) => TierStatus {
                    tier_name: tier_label(tier, i),
                    discount_percent: tier.discount_percent,
                    next_tier_name: Some(tier_label(next, i + 1)),
                    next_tier_discount: next.discount_percent,
                    next_tier_points_needed: (next.min_points - points).max(0),
                    progress_percent: band_progress(tier.min_points, next.min_points, points),
                },
                None => TierStatus {
                    tier_name: tier_label(tier, i),
                    discount_percent: tier.discount_percent,
                    next_tier_name: None,
                    next_tier_discount: 0.0,
                    next_tier_points_needed: 0,
                    progress_percent: 100,
                },
            };
        }
    }

    // Points sit below the lowest threshold. Report the lowest tier anyway so
    // the caller always has something to render.
    let lowest = &tiers[0];
    let next = tiers.get(1);
    TierStatus {
        tier_name: tier_label(lowest, 0),
        discount_percent: lowest.discount_percent,
        next_tier_name: next.map(|t| tier_label(t, 1)),
        next_tier_discount: next.map_or(0.0, |t| t.discount_percent),
        next_tier_points_needed: next.map_or(0, |t| (t.min_points - points).max(0)),
        progress_percent: next.map_or(0, |t| band_progress(0, t.min_points, points)),
    }
}

/// Rounded percent position of `points` inside the [low, high) band.
fn band_progress(low: i64, high: i64, points: i64) -> i64 {
    let range = high - low;
    if range <= 0 {
        return 100;
    }
    // Band widths and point totals are far below 2^52, so the casts are exact
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let percent = ((points - low) as f64 / range as f64 * 100.0).round() as i64;
    percent
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn bare_ladder() -> Vec<DiscountTier> {
        vec![
            DiscountTier {
                min_points: 0,
                discount_percent: 0.0,
                tier_name: None,
            },
            DiscountTier {
                min_points: 100,
                discount_percent: 3.0,
                tier_name: None,
            },
            DiscountTier {
                min_points: 300,
                discount_percent: 6.0,
                tier_name: None,
            },
        ]
    }

    #[test]
    fn test_tier_monotonicity_example() {
        let status = resolve_tier("Acme Su", &bare_ladder(), 250);
        assert_eq!(status.discount_percent, 3.0);
        assert_eq!(status.next_tier_points_needed, 50);
        assert_eq!(status.next_tier_discount, 6.0);
        // (250 - 100) / (300 - 100) = 75%
        assert_eq!(status.progress_percent, 75);
    }

    #[test]
    fn test_unnamed_tiers_get_positional_labels() {
        let status = resolve_tier("Acme Su", &bare_ladder(), 250);
        assert_eq!(status.tier_name, "Seviye 2");
        assert_eq!(status.next_tier_name.as_deref(), Some("Seviye 3"));
    }

    #[test]
    fn test_top_tier_pins_progress() {
        let status = resolve_tier("Acme Su", &bare_ladder(), 900);
        assert_eq!(status.discount_percent, 6.0);
        assert_eq!(status.progress_percent, 100);
        assert_eq!(status.next_tier_points_needed, 0);
        assert!(status.next_tier_name.is_none());
    }

    #[test]
    fn test_exact_threshold_qualifies() {
        let status = resolve_tier("Acme Su", &bare_ladder(), 100);
        assert_eq!(status.discount_percent, 3.0);
        assert_eq!(status.progress_percent, 0);
        assert_eq!(status.next_tier_points_needed, 200);
    }

    #[test]
    fn test_default_ladder_fallback_generic() {
        let status = resolve_tier("Karşıyaka Elektrik", &[], 0);
        assert_eq!(status.tier_name, "Başlangıç");
        assert_eq!(status.discount_percent, 0.0);
        assert_eq!(status.next_tier_points_needed, 100);

        let ladder = default_discount_tiers("Karşıyaka Elektrik");
        let thresholds: Vec<i64> = ladder.iter().map(|t| t.min_points).collect();
        let discounts: Vec<f64> = ladder.iter().map(|t| t.discount_percent).collect();
        assert_eq!(thresholds, vec![0, 100, 300, 600, 1000]);
        assert_eq!(discounts, vec![0.0, 3.0, 6.0, 10.0, 15.0]);
    }

    #[test]
    fn test_bespoke_ladders() {
        assert_eq!(default_discount_tiers("İSKİ")[4].min_points, 500);
        assert_eq!(default_discount_tiers("Aydem")[4].discount_percent, 10.0);
        assert_eq!(default_discount_tiers("Enerjisa")[2].min_points, 150);
        assert_eq!(default_discount_tiers("TESKİ")[4].discount_percent, 15.0);
    }

    #[test]
    fn test_below_lowest_threshold_falls_back() {
        let ladder = vec![
            DiscountTier::new(50, 2.0, "Giriş"),
            DiscountTier::new(200, 5.0, "Orta"),
        ];
        let status = resolve_tier("Acme Su", &ladder, 20);
        assert_eq!(status.tier_name, "Giriş");
        assert_eq!(status.discount_percent, 2.0);
        assert_eq!(status.next_tier_name.as_deref(), Some("Orta"));
        assert_eq!(status.next_tier_points_needed, 180);
        // Best effort: 20 / 200 = 10%
        assert_eq!(status.progress_percent, 10);
    }

    #[test]
    fn test_ladders_are_ascending() {
        for name in ["İSKİ", "Aydem", "Enerjisa", "TESKİ", "other"] {
            let ladder = default_discount_tiers(name);
            for pair in ladder.windows(2) {
                assert!(pair[0].min_points < pair[1].min_points, "ladder for {name}");
            }
        }
    }
}
