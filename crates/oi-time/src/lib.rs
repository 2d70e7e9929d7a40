//! # oi-time
//!
//! Dates and the date arithmetic needed to lay out overnight accrual
//! periods: calendars, business-day conventions, day counters, and
//! schedules.
//!
//! Only holiday-free calendars are provided ([`NullCalendar`] and
//! [`WeekendsOnly`]); anything richer plugs in through the [`Calendar`]
//! trait.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Calendar trait and holiday-free implementations.
pub mod calendar;

/// `Date` type.
pub mod date;

/// `DayCounter` trait and the day-count conventions used by overnight indexes.
pub mod day_counter;

/// Payment / event frequency.
pub mod frequency;

/// `Period`: a time span in a `TimeUnit`.
pub mod period;

/// `Schedule`: an ordered sequence of dates.
pub mod schedule;

/// `TimeUnit`: days, weeks, months, years.
pub mod time_unit;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, NullCalendar, WeekendsOnly};
pub use chrono::Weekday;
pub use date::Date;
pub use day_counter::{Actual360, Actual365Fixed, DayCounter, Thirty360};
pub use frequency::Frequency;
pub use period::Period;
pub use schedule::{DateGeneration, Schedule, ScheduleBuilder};
pub use time_unit::TimeUnit;
