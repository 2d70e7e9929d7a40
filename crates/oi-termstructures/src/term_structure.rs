//! `TermStructure`: base trait for all term structures.
//!
//! Every term structure has a **reference date**, a **day counter**, and a
//! **maximum date** (the furthest point at which it may be queried without
//! extrapolation).

use oi_core::errors::{Error, Result};
use oi_core::Time;
use oi_time::{Date, DayCounter};

/// Base trait for all term structures.
pub trait TermStructure: std::fmt::Debug + Send + Sync {
    /// The date at which discount = 1.0 and from which time is measured.
    fn reference_date(&self) -> Date;

    /// The day counter used for date → time conversions.
    fn day_counter(&self) -> &dyn DayCounter;

    /// The latest date for which the curve can be used.
    fn max_date(&self) -> Date;

    /// The latest time for which the curve can be used.
    fn max_time(&self) -> Time {
        self.time_from_reference(self.max_date())
    }

    /// Convert a date to a year fraction from the reference date.
    fn time_from_reference(&self, date: Date) -> Time {
        self.day_counter().year_fraction(self.reference_date(), date)
    }

    /// Fail unless `date` lies in `[reference_date, max_date]`; the upper
    /// bound is lifted when `extrapolate` is set.
    fn check_range(&self, date: Date, extrapolate: bool) -> Result<()> {
        let reference = self.reference_date();
        if date < reference {
            return Err(Error::Date(format!(
                "date ({date}) before reference date ({reference})"
            )));
        }
        let max = self.max_date();
        if !extrapolate && date > max {
            return Err(Error::Date(format!(
                "date ({date}) is past max curve date ({max})"
            )));
        }
        Ok(())
    }

    /// Time version of [`check_range`](Self::check_range).
    fn check_range_time(&self, t: Time, extrapolate: bool) -> Result<()> {
        if t < 0.0 {
            return Err(Error::InvalidArgument(format!("negative time ({t}) given")));
        }
        let max = self.max_time();
        if !extrapolate && t > max {
            return Err(Error::InvalidArgument(format!(
                "time ({t}) is past max curve time ({max})"
            )));
        }
        Ok(())
    }
}
