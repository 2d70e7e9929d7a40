//! Overnight leg construction.

use crate::cashflow::Leg;
use crate::leg_support::{nth_or_last, payment_date, reference_period};
use crate::overnight_indexed_coupon::{
    ApproximationMode, CompoundingMode, OvernightCouponTerms, OvernightIndexedCoupon,
};
use oi_core::errors::Result;
use oi_core::{ensure_config, Real, Spread};
use oi_indexes::OvernightIndex;
use oi_time::{BusinessDayConvention, Calendar, DayCounter, Schedule};
use std::sync::Arc;

/// Conventions of an overnight leg.
///
/// Per-period vectors are extended with their last value; empty
/// `gearings`/`spreads` mean 1 and 0.
#[derive(Debug, Clone)]
pub struct OvernightLegTerms {
    /// Per-period notionals (at least one).
    pub notionals: Vec<Real>,
    /// Per-period gearings.
    pub gearings: Vec<Real>,
    /// Per-period spreads.
    pub spreads: Vec<Spread>,
    /// Accrual day counter; the index day counter when `None`.
    pub payment_day_counter: Option<Arc<dyn DayCounter>>,
    /// Payment calendar; the schedule calendar when `None`.
    pub payment_calendar: Option<Arc<dyn Calendar>>,
    /// Convention used to roll payment dates.
    pub payment_adjustment: BusinessDayConvention,
    /// Business days between accrual end and payment.
    pub payment_lag: u32,
    /// Rate cutoff applied to every coupon.
    pub rate_cutoff: u32,
    /// Compounding or averaging.
    pub compounding: CompoundingMode,
    /// Forecast approximation.
    pub approximation: ApproximationMode,
}

impl Default for OvernightLegTerms {
    fn default() -> Self {
        Self {
            notionals: vec![1.0],
            gearings: Vec::new(),
            spreads: Vec::new(),
            payment_day_counter: None,
            payment_calendar: None,
            payment_adjustment: BusinessDayConvention::Following,
            payment_lag: 0,
            rate_cutoff: 0,
            compounding: CompoundingMode::Compounding,
            approximation: ApproximationMode::None,
        }
    }
}

/// Build an overnight leg on `index`, one coupon per schedule period.
pub fn overnight_leg(
    schedule: &Schedule,
    index: &OvernightIndex,
    terms: &OvernightLegTerms,
) -> Result<Leg> {
    ensure_config!(!terms.notionals.is_empty(), "no notional given for overnight leg");
    ensure_config!(
        terms.notionals.len() < schedule.size()
            && terms.gearings.len() < schedule.size()
            && terms.spreads.len() < schedule.size(),
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
        let coupon_terms = OvernightCouponTerms {
            gearing: nth_or_last(&terms.gearings, i, 1.0),
            spread: nth_or_last(&terms.spreads, i, 0.0),
            rate_cutoff: terms.rate_cutoff,
            compounding: terms.compounding,
            approximation: terms.approximation,
        };
        let mut coupon = OvernightIndexedCoupon::new(
            pay,
            nth_or_last(&terms.notionals, i, 1.0),
            start,
            end,
            index.clone(),
            coupon_terms,
        )?;
        if let Some(dc) = &terms.payment_day_counter {
            coupon = coupon.with_day_counter(Arc::clone(dc));
        }
        leg.push(Box::new(coupon.with_reference_period(ref_start, ref_end)));
    }
    Ok(leg)
}
