//! Fixed-rate coupons and the fixed-leg builder.
//!
//! Fixed coupons accrue simple interest: `amount = nominal · rate · τ`.

use crate::cashflow::{CashFlow, Leg};
use crate::coupon::Coupon;
use crate::leg_support::{nth_or_last, payment_date, reference_period};
use oi_core::errors::Result;
use oi_core::{ensure_config, Rate, Real, Time};
use oi_indexes::EvaluationContext;
use oi_time::{Actual360, BusinessDayConvention, Calendar, Date, DayCounter, Schedule};
use std::sync::Arc;

/// A coupon paying a fixed simple rate.
#[derive(Debug, Clone)]
pub struct FixedRateCoupon {
    payment_date: Date,
    nominal: Real,
    rate: Rate,
    accrual_start: Date,
    accrual_end: Date,
    ref_start: Date,
    ref_end: Date,
    day_counter: Arc<dyn DayCounter>,
    accrual_period: Time,
}

impl FixedRateCoupon {
    /// Create a coupon whose reference period is its accrual period.
    pub fn new(
        payment_date: Date,
        nominal: Real,
        rate: Rate,
        day_counter: Arc<dyn DayCounter>,
        accrual_start: Date,
        accrual_end: Date,
    ) -> Self {
        Self::with_reference_period(
            payment_date,
            nominal,
            rate,
            day_counter,
            accrual_start,
            accrual_end,
            accrual_start,
            accrual_end,
        )
    }

    /// Create a coupon with an explicit reference period.
    #[allow(clippy::too_many_arguments)]
    pub fn with_reference_period(
        payment_date: Date,
        nominal: Real,
        rate: Rate,
        day_counter: Arc<dyn DayCounter>,
        accrual_start: Date,
        accrual_end: Date,
        ref_start: Date,
        ref_end: Date,
    ) -> Self {
        let accrual_period =
            day_counter.year_fraction_with_ref(accrual_start, accrual_end, ref_start, ref_end);
        Self {
            payment_date,
            nominal,
            rate,
            accrual_start,
            accrual_end,
            ref_start,
            ref_end,
            day_counter,
            accrual_period,
        }
    }

    /// The fixed rate.
    pub fn fixed_rate(&self) -> Rate {
        self.rate
    }
}

impl CashFlow for FixedRateCoupon {
    fn date(&self) -> Date {
        self.payment_date
    }

    fn amount(&self, _ctx: &EvaluationContext<'_>) -> Result<Real> {
        Ok(self.nominal * self.rate * self.accrual_period)
    }

    fn as_coupon(&self) -> Option<&dyn Coupon> {
        Some(self)
    }
}

impl Coupon for FixedRateCoupon {
    fn nominal(&self) -> Real {
        self.nominal
    }

    fn accrual_start_date(&self) -> Date {
        self.accrual_start
    }

    fn accrual_end_date(&self) -> Date {
        self.accrual_end
    }

    fn reference_period_start(&self) -> Date {
        self.ref_start
    }

    fn reference_period_end(&self) -> Date {
        self.ref_end
    }

    fn accrual_period(&self) -> Time {
        self.accrual_period
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    fn rate(&self, _ctx: &EvaluationContext<'_>) -> Result<Rate> {
        Ok(self.rate)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fixed-rate leg
// ────────────────────────────────────────────────────────────────────────────

/// Conventions of a fixed leg.
///
/// `notionals` and `rates` hold one value per period; a short vector is
/// extended with its last value.
#[derive(Debug, Clone)]
pub struct FixedLegTerms {
    /// Per-period notionals.
    pub notionals: Vec<Real>,
    /// Per-period fixed rates.
    pub rates: Vec<Rate>,
    /// Accrual day counter.
    pub day_counter: Arc<dyn DayCounter>,
    /// Payment calendar; the schedule calendar when `None`.
    pub payment_calendar: Option<Arc<dyn Calendar>>,
    /// Convention used to roll payment dates.
    pub payment_adjustment: BusinessDayConvention,
    /// Business days between accrual end and payment.
    pub payment_lag: u32,
}

impl Default for FixedLegTerms {
    fn default() -> Self {
        Self {
            notionals: vec![1.0],
            rates: Vec::new(),
            day_counter: Arc::new(Actual360),
            payment_calendar: None,
            payment_adjustment: BusinessDayConvention::Following,
            payment_lag: 0,
        }
    }
}

/// Build a fixed-rate leg, one coupon per schedule period.
pub fn fixed_rate_leg(schedule: &Schedule, terms: &FixedLegTerms) -> Result<Leg> {
    ensure_config!(!terms.notionals.is_empty(), "no notional given for fixed leg");
    ensure_config!(!terms.rates.is_empty(), "no coupon rate given for fixed leg");
    ensure_config!(
        terms.notionals.len() < schedule.size() && terms.rates.len() < schedule.size(),
        "more per-period values than the {} schedule periods",
        schedule.size() - 1
    );
    let calendar = terms
        .payment_calendar
        .clone()
        .unwrap_or_else(|| Arc::clone(schedule.calendar()));

    let mut leg: Leg = Vec::with_capacity(schedule.size() - 1);
    for (i, w) in schedule.dates().windows(2).enumerate() {
        let (start, end) = (w[0], w[1]);
        let (ref_start, ref_end) = reference_period(schedule, i, terms.payment_adjustment)?;
        let pay = payment_date(&*calendar, end, terms.payment_lag, terms.payment_adjustment)?;
        leg.push(Box::new(FixedRateCoupon::with_reference_period(
            pay,
            nth_or_last(&terms.notionals, i, 1.0),
            nth_or_last(&terms.rates, i, 0.0),
            Arc::clone(&terms.day_counter),
            start,
            end,
            ref_start,
            ref_end,
        )));
    }
    Ok(leg)
}
