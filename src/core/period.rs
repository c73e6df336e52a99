//! Calendar year-month periods.
//!
//! All consumption grouping happens in year-month buckets. `PeriodKey` orders
//! chronologically (derive order relies on `year` preceding `month`) and
//! prints as `YYYY-MM`, matching the keys the rest of the system compares.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One calendar year-month bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
}

impl PeriodKey {
    /// Builds the period containing the given instant.
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    /// The calendar month immediately before this one.
    #[must_use]
    pub const fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// First day of the period, used for month-name formatting.
    #[must_use]
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_datetime() {
        let at = Utc.with_ymd_and_hms(2026, 3, 28, 14, 30, 0).unwrap();
        assert_eq!(PeriodKey::from_datetime(at), PeriodKey { year: 2026, month: 3 });
    }

    #[test]
    fn test_ordering_is_chronological() {
        let jan = PeriodKey { year: 2026, month: 1 };
        let dec = PeriodKey { year: 2025, month: 12 };
        let mar = PeriodKey { year: 2026, month: 3 };
        assert!(dec < jan);
        assert!(jan < mar);
    }

    #[test]
    fn test_prev_within_year() {
        let mar = PeriodKey { year: 2026, month: 3 };
        assert_eq!(mar.prev(), PeriodKey { year: 2026, month: 2 });
    }

    #[test]
    fn test_prev_crosses_year_boundary() {
        let jan = PeriodKey { year: 2026, month: 1 };
        assert_eq!(jan.prev(), PeriodKey { year: 2025, month: 12 });
    }

    #[test]
    fn test_display_zero_pads() {
        let p = PeriodKey { year: 2026, month: 4 };
        assert_eq!(p.to_string(), "2026-04");
    }
}
