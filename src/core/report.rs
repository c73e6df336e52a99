//! Dashboard report formatting.
//!
//! Turns a [`DashboardSnapshot`] into text: period labels, per-utility
//! comparison lines, a savings verdict, and discount standings with progress
//! bars. All functions are pure and surface-agnostic; the binary prints the
//! result, but nothing here assumes a terminal.

use crate::core::engine::DashboardSnapshot;
use crate::core::period::PeriodKey;
use std::fmt::Write as _;

/// Human-readable label for a period, like "March 2026".
#[must_use]
pub fn format_period(period: PeriodKey) -> String {
    period
        .first_day()
        .map_or_else(|| period.to_string(), |day| day.format("%B %Y").to_string())
}

/// Generates a progress bar string like `[████████░░] 80%`.
#[must_use]
pub fn format_progress_bar(progress_percent: i64, bar_length: usize) -> String {
    let clamped = progress_percent.clamp(0, 100);

    // clamped ∈ [0, 100] and bar_length is small, so the arithmetic stays exact
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped as f64 / 100.0) * bar_length as f64).round() as usize;
    let empty = bar_length.saturating_sub(filled);

    format!("[{}{}] {progress_percent}%", "█".repeat(filled), "░".repeat(empty))
}

/// One-line verdict on the month, based on the average of both utilities'
/// savings percentages.
#[must_use]
pub fn savings_status(water_percent: f64, electricity_percent: f64, has_data: bool) -> &'static str {
    if !has_data {
        return "No comparison data yet. Record readings in two different months to see savings.";
    }

    let average = (water_percent + electricity_percent) / 2.0;
    if average > 15.0 {
        "Outstanding month! Your savings are well above average."
    } else if average > 8.0 {
        "Great progress, keep it up."
    } else if average > 3.0 {
        "Solid savings this month."
    } else if average > 0.0 {
        "A small step in the right direction."
    } else if average > -5.0 {
        "Consumption is close to last month."
    } else if average > -10.0 {
        "Consumption went up a bit. The tips section can help."
    } else {
        "Consumption rose noticeably this month. Time to act on the tips."
    }
}

/// Formats the full dashboard summary for one user.
#[must_use]
pub fn format_dashboard_summary(user_name: &str, snapshot: &DashboardSnapshot) -> String {
    let comparison = &snapshot.comparison;
    let mut out = String::new();

    let _ = writeln!(out, "Consumption summary for {user_name}");
    let _ = writeln!(
        out,
        "Period: {} (compared to {})",
        format_period(comparison.current_period),
        format_period(comparison.previous_period),
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Water:       {:.2} m³ now, {:.2} m³ before ({:+.1}%)",
        comparison.water.current, comparison.water.previous, comparison.water.savings_percent,
    );
    let _ = writeln!(
        out,
        "Electricity: {:.2} kWh now, {:.2} kWh before ({:+.1}%)",
        comparison.electricity.current,
        comparison.electricity.previous,
        comparison.electricity.savings_percent,
    );

    let has_data = comparison.water.current > 0.0 || comparison.electricity.current > 0.0;
    let _ = writeln!(
        out,
        "{}",
        savings_status(
            comparison.water.savings_percent,
            comparison.electricity.savings_percent,
            has_data,
        )
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Points this month: {}", snapshot.monthly_points);

    if snapshot.discounts.is_empty() {
        let _ = writeln!(out, "No discount standings yet this month.");
    } else {
        let _ = writeln!(out, "Discount standings:");
        for discount in &snapshot.discounts {
            let _ = writeln!(
                out,
                "  {} ({}): {} · {:.0}% discount · {}",
                discount.company_name,
                discount.company_code,
                discount.current_tier_name,
                discount.current_discount_percent,
                format_progress_bar(discount.progress_percent, 10),
            );
            if let Some(next) = &discount.next_tier_name {
                let _ = writeln!(
                    out,
                    "    {} more points to {} ({:.0}%)",
                    discount.next_tier_points_needed, next, discount.next_tier_discount,
                );
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::scoring::ScoringConfig;
    use crate::core::engine::evaluate;
    use crate::test_utils::{reading, water_profile};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_period() {
        assert_eq!(
            format_period(PeriodKey {
                year: 2026,
                month: 3
            }),
            "March 2026"
        );
    }

    #[test]
    fn test_format_progress_bar_bounds() {
        assert_eq!(format_progress_bar(100, 10), "[██████████] 100%");
        assert_eq!(format_progress_bar(0, 10), "[░░░░░░░░░░] 0%");
        assert_eq!(format_progress_bar(50, 10), "[█████░░░░░] 50%");
    }

    #[test]
    fn test_savings_status_thresholds() {
        assert!(savings_status(0.0, 0.0, false).starts_with("No comparison data"));
        assert!(savings_status(20.0, 20.0, true).starts_with("Outstanding"));
        assert!(savings_status(10.0, 10.0, true).starts_with("Great progress"));
        assert!(savings_status(4.0, 4.0, true).starts_with("Solid"));
        assert!(savings_status(1.0, 1.0, true).starts_with("A small step"));
        assert!(savings_status(-2.0, -2.0, true).starts_with("Consumption is close"));
        assert!(savings_status(-7.0, -7.0, true).contains("went up a bit"));
        assert!(savings_status(-50.0, -50.0, true).contains("rose noticeably"));
    }

    #[test]
    fn test_dashboard_summary_contains_key_figures() {
        let subs = vec![water_profile(1)];
        let records = vec![
            reading(1, 100.0, 2026, 1, 31),
            reading(1, 200.0, 2026, 2, 28),
            reading(1, 280.0, 2026, 3, 28),
        ];
        let reference = Utc.with_ymd_and_hms(2026, 3, 30, 12, 0, 0).unwrap();
        let snapshot = evaluate(&subs, &records, &ScoringConfig::default(), reference);

        let summary = format_dashboard_summary("Ayşe", &snapshot);
        assert!(summary.contains("Consumption summary for Ayşe"));
        assert!(summary.contains("March 2026"));
        assert!(summary.contains("February 2026"));
        assert!(summary.contains("80.00 m³"));
        assert!(summary.contains("+20.0%"));
        assert!(summary.contains("Discount standings:"));
        assert!(summary.contains("İSKİ"));
    }

    #[test]
    fn test_dashboard_summary_without_discounts() {
        let reference = Utc.with_ymd_and_hms(2026, 3, 30, 12, 0, 0).unwrap();
        let snapshot = evaluate(&[], &[], &ScoringConfig::default(), reference);

        let summary = format_dashboard_summary("Ayşe", &snapshot);
        assert!(summary.contains("No discount standings yet this month."));
        assert!(summary.contains("No comparison data yet."));
    }
}
