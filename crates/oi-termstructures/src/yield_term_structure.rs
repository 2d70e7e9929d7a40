//! `YieldTermStructure`: discount curves.
//!
//! Implementors provide [`discount_impl`](YieldTermStructure::discount_impl);
//! the range-checked public queries are derived from it.

use crate::term_structure::TermStructure;
use oi_core::errors::Result;
use oi_core::{DiscountFactor, Time};
use oi_time::Date;

/// A yield (interest-rate) term structure.
pub trait YieldTermStructure: TermStructure {
    /// Discount factor at time `t` from the reference date.  Called only
    /// after the range check.
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor>;

    // ── Public interface ─────────────────────────────────────────────────

    /// Discount factor for a date.
    fn discount(&self, date: Date, extrapolate: bool) -> Result<DiscountFactor> {
        self.check_range(date, extrapolate)?;
        self.discount_impl(self.time_from_reference(date))
    }

    /// Discount factor for a time.
    fn discount_time(&self, t: Time, extrapolate: bool) -> Result<DiscountFactor> {
        self.check_range_time(t, extrapolate)?;
        self.discount_impl(t)
    }
}
