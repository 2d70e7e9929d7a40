//! `CashFlow` trait: the base for all cash-flow types.
//!
//! A cash flow is an amount of money paid on a specific date.  Amounts of
//! floating coupons depend on fixings and curves, so they are computed
//! against an [`EvaluationContext`].

use crate::coupon::Coupon;
use oi_core::errors::Result;
use oi_core::Real;
use oi_indexes::EvaluationContext;
use oi_time::Date;
use std::fmt;

/// Base trait for all cash flows.
pub trait CashFlow: fmt::Debug + Send + Sync {
    /// The date on which this cash flow is paid.
    fn date(&self) -> Date;

    /// The amount paid on the payment date, as seen from `ctx`.
    fn amount(&self, ctx: &EvaluationContext<'_>) -> Result<Real>;

    /// Whether this cash flow has already been paid as of `ref_date`.
    ///
    /// With `include_ref_date` a flow paid on `ref_date` still counts as
    /// pending; without it, it counts as paid.
    fn has_occurred(&self, ref_date: Date, include_ref_date: bool) -> bool {
        if include_ref_date {
            self.date() < ref_date
        } else {
            self.date() <= ref_date
        }
    }

    /// This flow as a coupon, if it is one.
    fn as_coupon(&self) -> Option<&dyn Coupon> {
        None
    }
}

/// A `Leg` is a sequence of cash flows.
pub type Leg = Vec<Box<dyn CashFlow>>;

/// A fixed amount at a fixed date.
#[derive(Debug, Clone)]
pub struct SimpleCashFlow {
    /// The payment amount.
    pub amount: Real,
    /// The payment date.
    pub date: Date,
}

impl SimpleCashFlow {
    /// Create a new simple cash flow.
    pub fn new(amount: Real, date: Date) -> Self {
        Self { amount, date }
    }
}

impl CashFlow for SimpleCashFlow {
    fn date(&self) -> Date {
        self.date
    }

    fn amount(&self, _ctx: &EvaluationContext<'_>) -> Result<Real> {
        Ok(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oi_indexes::IndexManager;

    #[test]
    fn simple_cashflow() {
        let d = Date::from_ymd(2025, 6, 15).unwrap();
        let cf = SimpleCashFlow::new(100.0, d);
        let im = IndexManager::new();
        let ctx = EvaluationContext::new(d, &im);
        assert_eq!(cf.amount(&ctx).unwrap(), 100.0);
        assert!(cf.as_coupon().is_none());
    }

    #[test]
    fn has_occurred_respects_reference_date_flag() {
        let d = Date::from_ymd(2025, 6, 15).unwrap();
        let cf = SimpleCashFlow::new(100.0, d);
        let before = Date::from_ymd(2025, 6, 14).unwrap();
        let after = Date::from_ymd(2025, 6, 16).unwrap();
        assert!(!cf.has_occurred(before, false));
        assert!(cf.has_occurred(d, false));
        assert!(!cf.has_occurred(d, true));
        assert!(cf.has_occurred(after, true));
    }
}
