//! `Coupon` trait: base for interest-rate coupons.
//!
//! A coupon accrues interest on a nominal over `[accrual_start, accrual_end)`
//! and pays on its payment date.

use crate::cashflow::CashFlow;
use oi_core::errors::Result;
use oi_core::{Rate, Real, Time};
use oi_indexes::EvaluationContext;
use oi_time::{Date, DayCounter};

/// Base trait for interest-rate coupons.
pub trait Coupon: CashFlow {
    /// The notional amount.
    fn nominal(&self) -> Real;

    /// Start of the accrual period.
    fn accrual_start_date(&self) -> Date;

    /// End of the accrual period.
    fn accrual_end_date(&self) -> Date;

    /// Reference period start (differs from the accrual start for a short
    /// or long first coupon).
    fn reference_period_start(&self) -> Date {
        self.accrual_start_date()
    }

    /// Reference period end.
    fn reference_period_end(&self) -> Date {
        self.accrual_end_date()
    }

    /// Accrual period as a year fraction under [`day_counter`](Self::day_counter).
    fn accrual_period(&self) -> Time;

    /// Day counter used for accrual.
    fn day_counter(&self) -> &dyn DayCounter;

    /// Annualized coupon rate as seen from `ctx`.
    fn rate(&self, ctx: &EvaluationContext<'_>) -> Result<Rate>;
}
