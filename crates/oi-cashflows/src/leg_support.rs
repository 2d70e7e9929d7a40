//! Helpers shared by the leg builders.

use oi_core::errors::Result;
use oi_time::{BusinessDayConvention, Calendar, Date, Period, Schedule};

/// Element `i` of `v`, the last element past the end, or `default` when
/// `v` is empty.
pub(crate) fn nth_or_last<T: Copy>(v: &[T], i: usize, default: T) -> T {
    match v.last() {
        None => default,
        Some(&last) => v.get(i).copied().unwrap_or(last),
    }
}

/// Reference period of period `i` of `schedule`.
///
/// An irregular first (last) period is measured against a full tenor
/// ending (starting) on its accrual end (start).
pub(crate) fn reference_period(
    schedule: &Schedule,
    i: usize,
    adjustment: BusinessDayConvention,
) -> Result<(Date, Date)> {
    let periods = schedule.size() - 1;
    let start = schedule.dates()[i];
    let end = schedule.dates()[i + 1];
    let (mut ref_start, mut ref_end) = (start, end);
    if let Some(tenor) = schedule.tenor().filter(|t| t.length > 0) {
        let calendar = schedule.calendar();
        if i == 0 && !schedule.is_regular(i) {
            ref_start = calendar.adjust(end.advance(-tenor.length, tenor.unit)?, adjustment)?;
        }
        if i == periods - 1 && !schedule.is_regular(i) {
            ref_end = calendar.adjust(start.advance(tenor.length, tenor.unit)?, adjustment)?;
        }
    }
    Ok((ref_start, ref_end))
}

/// Payment date `lag` business days after `end` on `calendar`.
pub(crate) fn payment_date(
    calendar: &dyn Calendar,
    end: Date,
    lag: u32,
    adjustment: BusinessDayConvention,
) -> Result<Date> {
    let lag = i32::try_from(lag).unwrap_or(i32::MAX);
    calendar.advance(end, Period::days(lag), adjustment, false)
}
