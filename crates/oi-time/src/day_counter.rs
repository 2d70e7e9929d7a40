//! `DayCounter` trait and the day-count conventions used by overnight
//! indexes and their swaps.
//!
//! Overnight indexes accrue on Actual/360 (USD, EUR, CHF) or
//! Actual/365 (Fixed) (GBP, JPY); fixed legs sometimes use 30/360.

use crate::date::Date;
use oi_core::{Real, Time};

/// A convention for the fraction of a year between two dates.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Name of the convention, e.g. `"Actual/360"`.
    fn name(&self) -> &str;

    /// Days between `d1` and `d2` under this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64;

    /// Year fraction between `d1` and `d2`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;

    /// Year fraction with reference-period hints for irregular coupons.
    /// None of the conventions here depend on them.
    fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        _ref_start: Date,
        _ref_end: Date,
    ) -> Time {
        self.year_fraction(d1, d2)
    }
}

/// Actual/360: actual days over 360.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "Actual/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        d1.days_between(d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Actual/365 (Fixed): actual days over 365.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "Actual/365 (Fixed)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        d1.days_between(d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// 30/360 (Bond Basis).
///
/// `[360(Y2−Y1) + 30(M2−M1) + (D2−D1)] / 360` where a day 31 becomes 30,
/// and an end day 31 becomes 30 only if the start day is 30 or 31.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360;

impl DayCounter for Thirty360 {
    fn name(&self) -> &str {
        "30/360 (Bond Basis)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let (y1, m1) = (i64::from(d1.year()), i64::from(d1.month()));
        let (y2, m2) = (i64::from(d2.year()), i64::from(d2.month()));
        let mut dd1 = i64::from(d1.day_of_month());
        let mut dd2 = i64::from(d2.day_of_month());

        if dd1 == 31 {
            dd1 = 30;
        }
        if dd2 == 31 && dd1 == 30 {
            dd2 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn actual_conventions() {
        let (d1, d2) = (date(2024, 1, 15), date(2024, 7, 15));
        assert_eq!(Actual360.day_count(d1, d2), 182);
        assert_abs_diff_eq!(Actual360.year_fraction(d1, d2), 182.0 / 360.0, epsilon = 1e-15);
        assert_abs_diff_eq!(Actual365Fixed.year_fraction(d1, d2), 182.0 / 365.0, epsilon = 1e-15);
        assert_abs_diff_eq!(Actual360.year_fraction(d2, d1), -182.0 / 360.0, epsilon = 1e-15);
    }

    #[test]
    fn thirty_360_bond_basis() {
        assert_eq!(Thirty360.day_count(date(2024, 1, 31), date(2024, 3, 31)), 60);
        assert_eq!(Thirty360.day_count(date(2024, 1, 15), date(2024, 3, 31)), 76);
        assert_eq!(Thirty360.day_count(date(2024, 2, 29), date(2025, 2, 28)), 359);
        assert_abs_diff_eq!(
            Thirty360.year_fraction(date(2023, 6, 30), date(2024, 6, 30)),
            1.0,
            epsilon = 1e-15
        );
    }
}
