//! `InterestRateIndex`: base for interest-rate indexes.

use crate::index::Index;
use oi_core::errors::Result;
use oi_time::{Date, DayCounter, Period};

/// An index quoting an interest rate over a fixed tenor.
pub trait InterestRateIndex: Index {
    /// Family name without tenor (e.g. `"SOFR"`).
    fn family_name(&self) -> &str;

    /// The index tenor (1D for overnight indexes).
    fn tenor(&self) -> Period;

    /// Business days between fixing and value date.
    fn fixing_days(&self) -> u32;

    /// ISO code of the currency the index is denominated in.
    fn currency(&self) -> &str;

    /// Day counter used for accrual.
    fn day_counter(&self) -> &dyn DayCounter;

    /// Value date of the fixing made on `fixing_date`.
    fn value_date(&self, fixing_date: Date) -> Result<Date> {
        let lag = i32::try_from(self.fixing_days()).unwrap_or(i32::MAX);
        self.fixing_calendar().advance_business_days(fixing_date, lag)
    }

    /// Fixing date whose value date is `value_date`.
    fn fixing_date(&self, value_date: Date) -> Result<Date> {
        let lag = i32::try_from(self.fixing_days()).unwrap_or(i32::MAX);
        self.fixing_calendar().advance_business_days(value_date, -lag)
    }

    /// End of the deposit period starting on `value_date`.
    fn maturity_date(&self, value_date: Date) -> Result<Date>;
}
