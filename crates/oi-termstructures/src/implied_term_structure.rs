//! `ImpliedTermStructure`: the forward curve implied by a spot curve at a
//! later reference date.
//!
//! `D'(t) = D(ref' + t) / D(ref')`, where `D` is the original curve.  The
//! original curve is always queried against its own reference date, so
//! no ambient evaluation date has to be moved to read it.

use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;
use oi_core::errors::{Error, Result};
use oi_core::{DiscountFactor, Handle, Time};
use oi_time::{Date, DayCounter};
use std::sync::Arc;

/// A curve seen from a later reference date.
///
/// The original curve stays linked: relinking a shared handle upstream
/// and building a new implied curve from it picks up the new curve.
#[derive(Debug, Clone)]
pub struct ImpliedTermStructure {
    original: Arc<dyn YieldTermStructure>,
    reference_date: Date,
}

impl ImpliedTermStructure {
    /// Forward curve of `original` as of `reference_date`.
    ///
    /// # Errors
    /// Configuration error when the handle is empty; date error when
    /// `reference_date` precedes the original curve's reference date.
    pub fn new(original: &Handle<dyn YieldTermStructure>, reference_date: Date) -> Result<Self> {
        let original = Arc::clone(original.current_link("yield term structure")?);
        let spot = original.reference_date();
        if reference_date < spot {
            return Err(Error::Date(format!(
                "implied reference date ({reference_date}) before spot date ({spot})"
            )));
        }
        Ok(Self {
            original,
            reference_date,
        })
    }

    /// The spot curve this one is implied from.
    pub fn original(&self) -> &Arc<dyn YieldTermStructure> {
        &self.original
    }
}

impl TermStructure for ImpliedTermStructure {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        self.original.day_counter()
    }

    fn max_date(&self) -> Date {
        self.original.max_date()
    }
}

impl YieldTermStructure for ImpliedTermStructure {
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        let spot = self.original.reference_date();
        let original_time = t + self.day_counter().year_fraction(spot, self.reference_date);
        let denom = self.original.discount(self.reference_date, true)?;
        if denom == 0.0 {
            return Err(Error::Numerical(format!(
                "spot curve discount factor at {} is zero",
                self.reference_date
            )));
        }
        Ok(self.original.discount_time(original_time, true)? / denom)
    }
}
