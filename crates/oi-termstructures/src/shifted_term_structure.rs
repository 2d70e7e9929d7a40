//! `ShiftedTermStructure`: a curve whose forward discount factors are
//! shifted in time, with an optional scale factor and zero-discount
//! windows.
//!
//! The reference date stays that of the original curve.  For a shift `s`
//! (the year fraction to the shifted reference date):
//!
//! * `s < 0`: `D'(t) = m · D(t - s) / D(-s)`
//! * `s ≥ 0`: `D'(t) = m · D(s) · D(t - s)` for `t > s`, else `m · D(t)`
//!
//! where `m` is the discount multiplier.  `D'(0)` is always 1, and dates on
//! or before `last_zero_df_date` or on or after `first_zero_df_date`
//! discount to zero.

use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;
use oi_core::errors::{Error, Result};
use oi_core::{DiscountFactor, Handle, Real, Time};
use oi_time::{Date, DayCounter};
use std::sync::Arc;

/// A curve with its forward discount factors shifted in time.
#[derive(Debug, Clone)]
pub struct ShiftedTermStructure {
    original: Arc<dyn YieldTermStructure>,
    shifted_reference_date: Date,
    df_multiplier: Real,
    last_zero_df_date: Option<Date>,
    first_zero_df_date: Option<Date>,
}

impl ShiftedTermStructure {
    /// Shift `original` so that its forwards start at
    /// `shifted_reference_date`.
    pub fn new(
        original: &Handle<dyn YieldTermStructure>,
        shifted_reference_date: Date,
    ) -> Result<Self> {
        Ok(Self {
            original: Arc::clone(original.current_link("yield term structure")?),
            shifted_reference_date,
            df_multiplier: 1.0,
            last_zero_df_date: None,
            first_zero_df_date: None,
        })
    }

    /// Scale every discount factor (except at `t = 0`) by `m`.
    pub fn with_df_multiplier(mut self, m: Real) -> Self {
        self.df_multiplier = m;
        self
    }

    /// Discount to zero on and before `date`.
    pub fn with_last_zero_df_date(mut self, date: Date) -> Self {
        self.last_zero_df_date = Some(date);
        self
    }

    /// Discount to zero on and after `date`.
    pub fn with_first_zero_df_date(mut self, date: Date) -> Self {
        self.first_zero_df_date = Some(date);
        self
    }

    /// The date the forwards are shifted to.
    pub fn shifted_reference_date(&self) -> Date {
        self.shifted_reference_date
    }

    /// Discount multiplier.
    pub fn df_multiplier(&self) -> Real {
        self.df_multiplier
    }

    /// End of the leading zero-discount window.
    pub fn last_zero_df_date(&self) -> Option<Date> {
        self.last_zero_df_date
    }

    /// Start of the trailing zero-discount window.
    pub fn first_zero_df_date(&self) -> Option<Date> {
        self.first_zero_df_date
    }
}

impl TermStructure for ShiftedTermStructure {
    fn reference_date(&self) -> Date {
        self.original.reference_date()
    }

    fn day_counter(&self) -> &dyn DayCounter {
        self.original.day_counter()
    }

    fn max_date(&self) -> Date {
        self.original.max_date()
    }
}

impl YieldTermStructure for ShiftedTermStructure {
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        if t == 0.0 {
            return Ok(1.0);
        }
        if let Some(d) = self.last_zero_df_date {
            if t <= self.time_from_reference(d) {
                return Ok(0.0);
            }
        }
        if let Some(d) = self.first_zero_df_date {
            if t >= self.time_from_reference(d) {
                return Ok(0.0);
            }
        }

        let shift = self.time_from_reference(self.shifted_reference_date);
        let d1 = if shift < 0.0 {
            let d = self.original.discount_time(-shift, true)?;
            if d == 0.0 {
                return Err(Error::Numerical(
                    "discount factor at the shift cannot be zero".into(),
                ));
            }
            1.0 / d
        } else if t > shift {
            self.original.discount_time(shift, true)?
        } else {
            1.0
        };
        let shifted_time = if t > shift { t - shift } else { t };
        let d2 = self.original.discount_time(shifted_time, true)?;
        Ok(self.df_multiplier * d1 * d2)
    }
}
