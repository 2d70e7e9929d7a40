//! `Calendar` trait and holiday-free calendars.
//!
//! A calendar decides which dates are business days and rolls dates
//! according to a [`BusinessDayConvention`].  Overnight fixings are
//! published once per business day, so the calendar drives the daily
//! sub-period layout of an overnight coupon.

use crate::business_day_convention::BusinessDayConvention;
use crate::date::Date;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use chrono::Weekday;
use oi_core::errors::Result;

/// A business-day calendar.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// `true` if `date` is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// `true` if `date` is not a business day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// `true` if `date` is the last business day of its month.
    fn is_end_of_month(&self, date: Date) -> Result<bool> {
        let next = self.adjust(date.add_days(1)?, BusinessDayConvention::Following)?;
        Ok(date.month() != next.month())
    }

    /// Last business day of the month containing `date`.
    fn end_of_month(&self, date: Date) -> Result<Date> {
        self.adjust(date.end_of_month(), BusinessDayConvention::Preceding)
    }

    /// Roll `date` to a business day according to `convention`.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date> {
        let roll = |mut d: Date, step: i64| -> Result<Date> {
            while self.is_holiday(d) {
                d = d.add_days(step)?;
            }
            Ok(d)
        };
        match convention {
            BusinessDayConvention::Unadjusted => Ok(date),
            BusinessDayConvention::Following => roll(date, 1),
            BusinessDayConvention::Preceding => roll(date, -1),
            BusinessDayConvention::ModifiedFollowing => {
                let d = roll(date, 1)?;
                if d.month() != date.month() {
                    roll(date, -1)
                } else {
                    Ok(d)
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let d = roll(date, -1)?;
                if d.month() != date.month() {
                    roll(date, 1)
                } else {
                    Ok(d)
                }
            }
        }
    }

    /// Move `date` by `n` business days.  With `n == 0` the date is rolled
    /// forward to a business day.
    fn advance_business_days(&self, date: Date, n: i32) -> Result<Date> {
        if n == 0 {
            return self.adjust(date, BusinessDayConvention::Following);
        }
        let step: i64 = if n > 0 { 1 } else { -1 };
        let mut remaining = n.unsigned_abs();
        let mut d = date;
        while remaining > 0 {
            d = d.add_days(step)?;
            if self.is_business_day(d) {
                remaining -= 1;
            }
        }
        Ok(d)
    }

    /// Move `date` by `period`.  Day periods count business days (a zero
    /// period just rolls with `convention`); longer periods move in
    /// calendar time, then roll with `convention`.  With
    /// `end_of_month` set, a start on the last business day of a month
    /// lands on the last business day of the target month.
    fn advance(
        &self,
        date: Date,
        period: Period,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> Result<Date> {
        match period.unit {
            TimeUnit::Days if period.length == 0 => self.adjust(date, convention),
            TimeUnit::Days => self.advance_business_days(date, period.length),
            TimeUnit::Weeks => self.adjust(date.advance(period.length, period.unit)?, convention),
            TimeUnit::Months | TimeUnit::Years => {
                let moved = date.advance(period.length, period.unit)?;
                if end_of_month && self.is_end_of_month(date)? {
                    self.end_of_month(moved)
                } else {
                    self.adjust(moved, convention)
                }
            }
        }
    }

    /// Business days in `(from, to]`, negative when `to < from`.
    fn business_days_between(&self, from: Date, to: Date) -> Result<i64> {
        let (lo, hi, sign) = if to >= from { (from, to, 1) } else { (to, from, -1) };
        let mut count = 0;
        let mut d = lo;
        while d < hi {
            d = d.add_days(1)?;
            if self.is_business_day(d) {
                count += 1;
            }
        }
        Ok(sign * count)
    }
}

/// Every day is a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// Saturdays and Sundays are holidays; nothing else is.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn weekend_rolls() {
        let cal = WeekendsOnly;
        // Saturday 2 March 2024
        let sat = date(2024, 3, 2);
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Following).unwrap(), date(2024, 3, 4));
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Preceding).unwrap(), date(2024, 3, 1));
        // Saturday 30 March 2024: following would cross into April
        assert_eq!(
            cal.adjust(date(2024, 3, 30), BusinessDayConvention::ModifiedFollowing).unwrap(),
            date(2024, 3, 29)
        );
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Unadjusted).unwrap(), sat);
    }

    #[test]
    fn business_day_advance() {
        let cal = WeekendsOnly;
        let fri = date(2024, 3, 1);
        assert_eq!(cal.advance_business_days(fri, 1).unwrap(), date(2024, 3, 4));
        assert_eq!(cal.advance_business_days(date(2024, 3, 4), -1).unwrap(), fri);
        assert_eq!(cal.advance_business_days(fri, 5).unwrap(), date(2024, 3, 8));
        assert_eq!(cal.business_days_between(fri, date(2024, 3, 8)).unwrap(), 5);
        assert_eq!(cal.business_days_between(date(2024, 3, 8), fri).unwrap(), -5);
    }

    #[test]
    fn end_of_month_advance() {
        let cal = WeekendsOnly;
        // 29 February 2024 is the last business day of February
        let d = date(2024, 2, 29);
        let moved = cal
            .advance(d, Period::months(1), BusinessDayConvention::Following, true)
            .unwrap();
        assert_eq!(moved, date(2024, 3, 29));
        let plain = cal
            .advance(d, Period::months(1), BusinessDayConvention::Following, false)
            .unwrap();
        assert_eq!(plain, date(2024, 3, 29));
        let null = NullCalendar;
        assert_eq!(
            null.advance(d, Period::days(2), BusinessDayConvention::Following, false).unwrap(),
            date(2024, 3, 2)
        );
    }
}
