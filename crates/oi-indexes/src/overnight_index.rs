//! `OvernightIndex`: overnight rate index.
//!
//! Overnight indexes have a one-business-day tenor.  The value date is
//! `fixing_days` business days after the fixing date (0 for most indexes,
//! so the fixing date **is** the value date).  Forecasts are simple
//! forward rates over one business day, read off the forwarding curve.

use crate::index::Index;
use crate::interest_rate_index::InterestRateIndex;
use oi_core::errors::{Error, Result};
use oi_core::{Handle, Rate};
use oi_termstructures::YieldTermStructure;
use oi_time::{Calendar, Date, DayCounter, Period};
use std::sync::Arc;

/// An overnight rate index (e.g. SOFR, ESTR, SONIA).
///
/// Cheap to clone: calendar, day counter and curve are shared.
#[derive(Debug, Clone)]
pub struct OvernightIndex {
    family_name: String,
    name: String,
    fixing_days: u32,
    currency: String,
    calendar: Arc<dyn Calendar>,
    day_counter: Arc<dyn DayCounter>,
    forwarding: Handle<dyn YieldTermStructure>,
}

impl OvernightIndex {
    /// Create a new overnight index without a forwarding curve.
    pub fn new(
        family_name: impl Into<String>,
        fixing_days: u32,
        currency: impl Into<String>,
        calendar: impl Calendar + 'static,
        day_counter: impl DayCounter + 'static,
    ) -> Self {
        let family_name = family_name.into();
        let currency = currency.into();
        Self {
            name: format!("{currency}-{family_name}"),
            family_name,
            fixing_days,
            currency,
            calendar: Arc::new(calendar),
            day_counter: Arc::new(day_counter),
            forwarding: Handle::null(),
        }
    }

    /// The same index forecasting off `forwarding`.
    pub fn with_forwarding(&self, forwarding: Handle<dyn YieldTermStructure>) -> Self {
        Self {
            forwarding,
            ..self.clone()
        }
    }

    /// The curve forecasts are read from (possibly empty).
    pub fn forwarding_term_structure(&self) -> &Handle<dyn YieldTermStructure> {
        &self.forwarding
    }

    /// Shared handle to the fixing calendar.
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// Shared handle to the accrual day counter.
    pub fn shared_day_counter(&self) -> &Arc<dyn DayCounter> {
        &self.day_counter
    }

    /// Simple forward rate over `[value_date, maturity_date]` implied by
    /// the forwarding curve.
    pub fn forward_rate(&self, value_date: Date, maturity_date: Date) -> Result<Rate> {
        let curve = self.forwarding.current_link(&format!("{} forwarding curve", self.name))?;
        let start = curve.discount(value_date, true)?;
        let end = curve.discount(maturity_date, true)?;
        if end == 0.0 {
            return Err(Error::Numerical(format!(
                "{} forwarding discount at {maturity_date} is zero",
                self.name
            )));
        }
        let tau = self.day_counter.year_fraction(value_date, maturity_date);
        if tau <= 0.0 {
            return Err(Error::Configuration(format!(
                "{}: non-positive accrual between {value_date} and {maturity_date}",
                self.name
            )));
        }
        Ok((start / end - 1.0) / tau)
    }
}

impl Index for OvernightIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn fixing_calendar(&self) -> &dyn Calendar {
        &*self.calendar
    }

    fn forecast_fixing(&self, fixing_date: Date) -> Result<Rate> {
        let value = self.value_date(fixing_date)?;
        let maturity = self.maturity_date(value)?;
        self.forward_rate(value, maturity)
    }
}

impl InterestRateIndex for OvernightIndex {
    fn family_name(&self) -> &str {
        &self.family_name
    }

    fn tenor(&self) -> Period {
        Period::days(1)
    }

    fn fixing_days(&self) -> u32 {
        self.fixing_days
    }

    fn currency(&self) -> &str {
        &self.currency
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    fn maturity_date(&self, value_date: Date) -> Result<Date> {
        self.calendar.advance_business_days(value_date, 1)
    }
}
