//! `Index`: base trait for all market indexes.

use crate::context::EvaluationContext;
use oi_core::errors::{Error, Result};
use oi_core::Rate;
use oi_time::{Calendar, Date};

/// Base trait for all market indexes.
pub trait Index: std::fmt::Debug + Send + Sync {
    /// Unique name under which fixings are stored (e.g. `"USD-SOFR"`).
    fn name(&self) -> &str;

    /// Calendar on which the index fixes.
    fn fixing_calendar(&self) -> &dyn Calendar;

    /// Whether `date` is a valid fixing date.
    fn is_valid_fixing_date(&self, date: Date) -> bool {
        self.fixing_calendar().is_business_day(date)
    }

    /// Projected fixing for `fixing_date`, ignoring any published value.
    fn forecast_fixing(&self, fixing_date: Date) -> Result<Rate>;

    /// The fixing for `fixing_date` as seen from `ctx`.
    ///
    /// Past fixings must have been published.  Today's fixing is used if
    /// published and forecast otherwise; future fixings are forecast.
    fn fixing(&self, fixing_date: Date, ctx: &EvaluationContext<'_>) -> Result<Rate> {
        if !self.is_valid_fixing_date(fixing_date) {
            return Err(Error::InvalidArgument(format!(
                "fixing date {fixing_date} is not valid for {}",
                self.name()
            )));
        }
        let today = ctx.evaluation_date;
        if fixing_date < today {
            return ctx
                .fixings
                .fixing(self.name(), fixing_date)?
                .ok_or_else(|| Error::MissingFixing {
                    index: self.name().to_string(),
                    date: fixing_date.to_string(),
                });
        }
        if fixing_date == today {
            // an unreadable history only means we forecast
            if let Ok(Some(rate)) = ctx.fixings.fixing(self.name(), fixing_date) {
                return Ok(rate);
            }
        }
        self.forecast_fixing(fixing_date)
    }
}
