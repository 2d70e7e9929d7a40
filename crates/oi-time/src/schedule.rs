//! `Schedule`: the accrual dates of a swap leg.
//!
//! Dates are rolled out from the effective date (forward) or back from the
//! termination date (backward) in steps of the tenor; a stub period absorbs
//! whatever does not divide evenly and is flagged as irregular.

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::Date;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use oi_core::errors::{Error, Result};
use std::sync::Arc;

/// Date generation rule for schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateGeneration {
    /// Roll back from the termination date; any stub is at the front.
    #[default]
    Backward,
    /// Roll forward from the effective date; any stub is at the back.
    Forward,
    /// A single period from effective to termination date.
    Zero,
}

/// An ordered sequence of accrual dates.
#[derive(Debug, Clone)]
pub struct Schedule {
    dates: Vec<Date>,
    is_regular: Vec<bool>,
    tenor: Option<Period>,
    calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
}

impl Schedule {
    /// Build a schedule from explicit dates.  Every period counts as
    /// regular and no tenor is recorded.
    pub fn from_dates(
        dates: Vec<Date>,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
    ) -> Result<Self> {
        if dates.len() < 2 {
            return Err(Error::InvalidArgument(
                "a schedule needs at least two dates".into(),
            ));
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidArgument(
                "schedule dates must be strictly increasing".into(),
            ));
        }
        Ok(Self {
            is_regular: vec![true; dates.len() - 1],
            dates,
            tenor: None,
            calendar,
            convention,
        })
    }

    /// All dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of dates (one more than the number of periods).
    pub fn size(&self) -> usize {
        self.dates.len()
    }

    /// `true` if the schedule holds no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The `i`-th date.
    pub fn date(&self, i: usize) -> Option<Date> {
        self.dates.get(i).copied()
    }

    /// Effective date.
    pub fn start_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Termination date.
    pub fn end_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// `true` if period `i` (between dates `i` and `i + 1`) is a full tenor.
    pub fn is_regular(&self, i: usize) -> bool {
        self.is_regular.get(i).copied().unwrap_or(true)
    }

    /// Tenor the schedule was rolled with, if any.
    pub fn tenor(&self) -> Option<Period> {
        self.tenor
    }

    /// Calendar used to adjust the dates.
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// Convention used to adjust intermediate dates.
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }
}

/// Builder for [`Schedule`].
#[derive(Debug)]
pub struct ScheduleBuilder {
    effective_date: Date,
    termination_date: Date,
    tenor: Period,
    calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
    termination_convention: BusinessDayConvention,
    rule: DateGeneration,
    end_of_month: bool,
}

impl ScheduleBuilder {
    /// Begin building a schedule.
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        tenor: Period,
        calendar: Arc<dyn Calendar>,
    ) -> Self {
        Self {
            effective_date,
            termination_date,
            tenor,
            calendar,
            convention: BusinessDayConvention::ModifiedFollowing,
            termination_convention: BusinessDayConvention::ModifiedFollowing,
            rule: DateGeneration::Backward,
            end_of_month: false,
        }
    }

    /// Convention for the effective and intermediate dates.
    pub fn with_convention(mut self, c: BusinessDayConvention) -> Self {
        self.convention = c;
        self
    }

    /// Convention for the termination date.
    pub fn with_termination_convention(mut self, c: BusinessDayConvention) -> Self {
        self.termination_convention = c;
        self
    }

    /// Date-generation rule.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = rule;
        self
    }

    /// Keep dates on month ends when the seed date is a month end.
    pub fn end_of_month(mut self, flag: bool) -> Self {
        self.end_of_month = flag;
        self
    }

    /// Build the `Schedule`.
    pub fn build(self) -> Result<Schedule> {
        let start = self.effective_date;
        let end = self.termination_date;
        if start >= end {
            return Err(Error::InvalidArgument(format!(
                "effective date ({start}) must be before termination date ({end})"
            )));
        }
        if self.tenor.length < 0 {
            return Err(Error::InvalidArgument(format!(
                "negative tenor ({}) not allowed",
                self.tenor
            )));
        }

        let rule = if self.tenor.length == 0 {
            DateGeneration::Zero
        } else {
            self.rule
        };

        // Unadjusted dates and regularity flags, in ascending order.
        let (raw, mut is_regular) = match rule {
            DateGeneration::Zero => (vec![start, end], vec![false]),
            DateGeneration::Forward => self.roll(start, end, 1)?,
            DateGeneration::Backward => {
                let (mut raw, mut regular) = self.roll(end, start, -1)?;
                raw.reverse();
                regular.reverse();
                (raw, regular)
            }
        };

        let eom_seed = match rule {
            DateGeneration::Forward => start,
            _ => end,
        };
        let snap_to_month_end = self.end_of_month
            && matches!(self.tenor.unit, TimeUnit::Months | TimeUnit::Years)
            && self.calendar.is_end_of_month(eom_seed)?;

        let last = raw.len() - 1;
        let mut dates = Vec::with_capacity(raw.len());
        for (i, d) in raw.into_iter().enumerate() {
            let adjusted = if i == last {
                self.calendar.adjust(d, self.termination_convention)?
            } else if i > 0 && snap_to_month_end {
                self.calendar.end_of_month(d)?
            } else {
                self.calendar.adjust(d, self.convention)?
            };
            if dates.last() == Some(&adjusted) {
                // collapsed stub; the merged period is irregular
                let idx = dates.len() - 1;
                if idx < is_regular.len() {
                    is_regular.remove(idx);
                }
                if let Some(flag) = is_regular.get_mut(idx) {
                    *flag = false;
                }
                continue;
            }
            dates.push(adjusted);
        }
        if dates.len() < 2 {
            return Err(Error::InvalidArgument(format!(
                "schedule from {start} to {end} collapses to a single date"
            )));
        }
        is_regular.truncate(dates.len() - 1);

        Ok(Schedule {
            dates,
            is_regular,
            tenor: Some(self.tenor),
            calendar: self.calendar,
            convention: self.convention,
        })
    }

    /// Roll from `seed` towards `stop` in steps of the tenor (`dir` = ±1),
    /// returning the dates in rolling order and one regularity flag per
    /// period.
    fn roll(&self, seed: Date, stop: Date, dir: i32) -> Result<(Vec<Date>, Vec<bool>)> {
        let mut dates = vec![seed];
        let mut regular = Vec::new();
        let mut k = 1;
        loop {
            let next = seed.advance(dir * k * self.tenor.length, self.tenor.unit)?;
            let past_stop = if dir > 0 { next >= stop } else { next <= stop };
            if past_stop {
                regular.push(next == stop);
                dates.push(stop);
                break;
            }
            dates.push(next);
            regular.push(true);
            k += 1;
        }
        Ok((dates, regular))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{NullCalendar, WeekendsOnly};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn zero_coupon_schedule() {
        let sched = ScheduleBuilder::new(
            date(2023, 1, 2),
            date(2025, 1, 2),
            Period::years(0),
            Arc::new(WeekendsOnly),
        )
        .build()
        .unwrap();
        assert_eq!(sched.size(), 2);
        assert!(!sched.is_regular(0));
    }

    #[test]
    fn annual_backward_schedule() {
        let sched = ScheduleBuilder::new(
            date(2020, 1, 1),
            date(2023, 1, 1),
            Period::years(1),
            Arc::new(NullCalendar),
        )
        .build()
        .unwrap();
        assert_eq!(
            sched.dates(),
            &[date(2020, 1, 1), date(2021, 1, 1), date(2022, 1, 1), date(2023, 1, 1)]
        );
        assert!((0..3).all(|i| sched.is_regular(i)));
    }

    #[test]
    fn backward_short_front_stub() {
        let sched = ScheduleBuilder::new(
            date(2024, 2, 15),
            date(2025, 1, 15),
            Period::months(6),
            Arc::new(NullCalendar),
        )
        .build()
        .unwrap();
        assert_eq!(
            sched.dates(),
            &[date(2024, 2, 15), date(2024, 7, 15), date(2025, 1, 15)]
        );
        assert!(!sched.is_regular(0));
        assert!(sched.is_regular(1));
    }

    #[test]
    fn forward_short_back_stub_with_adjustment() {
        let sched = ScheduleBuilder::new(
            date(2024, 1, 5),
            date(2024, 4, 20),
            Period::months(1),
            Arc::new(WeekendsOnly),
        )
        .with_rule(DateGeneration::Forward)
        .with_convention(BusinessDayConvention::Following)
        .with_termination_convention(BusinessDayConvention::Following)
        .build()
        .unwrap();
        // 5 Feb, 5 Mar, 5 Apr 2024 are all weekdays; 20 Apr is a Saturday
        assert_eq!(
            sched.dates(),
            &[
                date(2024, 1, 5),
                date(2024, 2, 5),
                date(2024, 3, 5),
                date(2024, 4, 5),
                date(2024, 4, 22)
            ]
        );
        assert!(sched.is_regular(2));
        assert!(!sched.is_regular(3));
    }

    #[test]
    fn rejects_inverted_dates() {
        let err = ScheduleBuilder::new(
            date(2024, 1, 5),
            date(2024, 1, 5),
            Period::months(1),
            Arc::new(NullCalendar),
        )
        .build();
        assert!(err.is_err());
    }
}
