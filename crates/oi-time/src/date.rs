//! `Date`: a calendar date without time of day.
//!
//! Wraps [`chrono::NaiveDate`] and restricts it to the years 1901–2199, the
//! range in which financial date arithmetic is meaningful here.  All
//! arithmetic that can leave the range returns [`Result`].

use crate::time_unit::TimeUnit;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use oi_core::errors::{Error, Result};

const MIN_YEAR: i32 = 1901;
const MAX_YEAR: i32 = 2199;

/// A calendar date.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        let naive = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
            .ok_or_else(|| Error::Date(format!("invalid date {year}-{month:02}-{day:02}")))?;
        Self::from_naive(naive)
    }

    /// Wrap a [`NaiveDate`], checking the supported year range.
    pub fn from_naive(naive: NaiveDate) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&naive.year()) {
            return Err(Error::Date(format!(
                "{naive} outside supported range [{MIN_YEAR}, {MAX_YEAR}]"
            )));
        }
        Ok(Date(naive))
    }

    /// Earliest supported date, 1 January 1901.
    pub fn min_date() -> Self {
        Date(NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN))
    }

    /// Latest supported date, 31 December 2199.
    pub fn max_date() -> Self {
        Date(NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap_or(NaiveDate::MAX))
    }

    /// The underlying [`NaiveDate`].
    pub fn naive(self) -> NaiveDate {
        self.0
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Year.
    pub fn year(&self) -> u16 {
        // in range by construction
        self.0.year() as u16
    }

    /// Month (1–12).
    pub fn month(&self) -> u8 {
        self.0.month() as u8
    }

    /// Day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.0.day() as u8
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Move by `n` calendar days (negative moves backwards).
    pub fn add_days(self, n: i64) -> Result<Self> {
        let moved = if n >= 0 {
            self.0.checked_add_days(Days::new(n.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(n.unsigned_abs()))
        };
        moved
            .ok_or_else(|| Error::Date(format!("{self} + {n} days overflows")))
            .and_then(Self::from_naive)
    }

    /// Move by `n` units.  Month and year moves clamp the day to the end of
    /// the target month (31 January + 1M = 28/29 February).
    pub fn advance(self, n: i32, unit: TimeUnit) -> Result<Self> {
        match unit {
            TimeUnit::Days => self.add_days(i64::from(n)),
            TimeUnit::Weeks => self.add_days(7 * i64::from(n)),
            TimeUnit::Months => {
                let months = Months::new(n.unsigned_abs());
                let moved = if n >= 0 {
                    self.0.checked_add_months(months)
                } else {
                    self.0.checked_sub_months(months)
                };
                moved
                    .ok_or_else(|| Error::Date(format!("{self} + {n}M overflows")))
                    .and_then(Self::from_naive)
            }
            TimeUnit::Years => self.advance(12 * n, TimeUnit::Months),
        }
    }

    /// Calendar days from `self` to `other` (positive if `other` is later).
    pub fn days_between(self, other: Date) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Last calendar day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let first = self.0.with_day(1).unwrap_or(self.0);
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(self.0);
        Date(last)
    }

    /// `true` if this is the last calendar day of its month.
    pub fn is_end_of_month(self) -> bool {
        self == self.end_of_month()
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i64> for Date {
    type Output = Self;
    fn add(self, rhs: i64) -> Self {
        self.add_days(rhs).expect("date addition overflow")
    }
}

impl std::ops::Sub<i64> for Date {
    type Output = Self;
    fn sub(self, rhs: i64) -> Self {
        self.add_days(-rhs).expect("date subtraction underflow")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i64;
    fn sub(self, rhs: Date) -> i64 {
        rhs.days_between(self)
    }
}

impl std::ops::AddAssign<i64> for Date {
    fn add_assign(&mut self, rhs: i64) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign<i64> for Date {
    fn sub_assign(&mut self, rhs: i64) {
        *self = *self - rhs;
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%-d %B %Y"))
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({})", self.0.format("%Y-%m-%d"))
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = Error;

    fn try_from(naive: NaiveDate) -> Result<Self> {
        Self::from_naive(naive)
    }
}
