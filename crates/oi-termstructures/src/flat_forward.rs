//! `FlatForward`: a yield term structure with a constant forward rate.
//!
//! The simplest possible curve: one continuously-compounded rate for all
//! maturities.  Useful as a forwarding curve in tests and as a
//! discounting curve for quick valuations.

use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;
use oi_core::errors::Result;
use oi_core::{Compounding, DiscountFactor, Rate, Real, Time};
use oi_time::{Date, DayCounter};
use std::sync::Arc;

/// A flat (constant) forward-rate yield term structure.
///
/// Discount factors are `P(t) = exp(-r·t)` where `r` is the
/// continuously-compounded equivalent of the supplied rate.
#[derive(Debug, Clone)]
pub struct FlatForward {
    reference_date: Date,
    day_counter: Arc<dyn DayCounter>,
    rate: Rate,
}

impl FlatForward {
    /// Flat curve at `rate`, quoted under `compounding` with
    /// `periods_per_year` (ignored unless compounded).
    pub fn new(
        reference_date: Date,
        rate: Rate,
        day_counter: impl DayCounter + 'static,
        compounding: Compounding,
        periods_per_year: Real,
    ) -> Self {
        let continuous = compounding.compound_factor(rate, 1.0, periods_per_year).ln();
        Self {
            reference_date,
            day_counter: Arc::new(day_counter),
            rate: continuous,
        }
    }

    /// Flat curve at a continuously-compounded rate.
    pub fn continuous(
        reference_date: Date,
        rate: Rate,
        day_counter: impl DayCounter + 'static,
    ) -> Self {
        Self::new(reference_date, rate, day_counter, Compounding::Continuous, 1.0)
    }

    /// The continuously-compounded flat rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }
}

impl TermStructure for FlatForward {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    fn max_date(&self) -> Date {
        Date::max_date()
    }
}

impl YieldTermStructure for FlatForward {
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        Ok((-self.rate * t).exp())
    }
}
