//! Rate determination for overnight-indexed coupons.
//!
//! Sub-periods are walked in order and fall into three consecutive
//! segments, according to the (cutoff-remapped) fixing date they look up:
//!
//! 1. **realized**: the fixing date is before the evaluation date, so the
//!    fixing must be in the history;
//! 2. **border**: the fixing date is the evaluation date; a published
//!    fixing is used, otherwise the sub-period starts the forecast segment;
//! 3. **forecast**: everything else.
//!
//! With a rate cutoff of `k` the last `k` sub-periods reuse the fixing date
//! of sub-period `n - k - 1` but keep their own year fraction.
//!
//! The forecast segment is evaluated from the index's forwarding curve.
//! Compounding, and averaging under [`ApproximationMode::Takada`], need only
//! the discount factors at the first forecast value date and at the end of
//! the period, the latter extended over the cutoff span with the one-day
//! forward factor at the cutoff date.  Averaging otherwise sums the forecast
//! fixings one by one.

use crate::coupon::Coupon;
use crate::overnight_indexed_coupon::{
    ApproximationMode, CompoundingMode, OvernightIndexedCoupon, SubPeriods,
};
use oi_core::errors::{Error, Result};
use oi_core::{ensure_config, DiscountFactor, Rate, Real, Time};
use oi_indexes::{EvaluationContext, Index};
use oi_termstructures::YieldTermStructure;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Running compounded factor or averaged sum.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Accumulator {
    Compound(Real),
    Average(Real),
}

impl Accumulator {
    fn new(mode: CompoundingMode) -> Self {
        match mode {
            CompoundingMode::Compounding => Accumulator::Compound(1.0),
            CompoundingMode::Averaging => Accumulator::Average(0.0),
        }
    }

    /// Fold in rate `r` over `dt`.
    fn add_fixing(&mut self, r: Rate, dt: Time) {
        match self {
            Accumulator::Compound(cf) => *cf *= 1.0 + r * dt,
            Accumulator::Average(avg) => *avg += r * dt,
        }
    }

    /// Fold in a forecast discount ratio `D(start) / D(end)`.
    fn add_discount_ratio(&mut self, ratio: Real) {
        match self {
            Accumulator::Compound(cf) => *cf *= ratio,
            Accumulator::Average(avg) => *avg += ratio.ln(),
        }
    }

    /// Interest accrued per unit notional.
    fn amount(self) -> Real {
        match self {
            Accumulator::Compound(cf) => cf - 1.0,
            Accumulator::Average(avg) => avg,
        }
    }
}

/// Computes the rate of one [`OvernightIndexedCoupon`].
#[derive(Debug, Clone, Copy)]
pub struct OvernightCouponPricer<'a> {
    coupon: &'a OvernightIndexedCoupon,
}

impl<'a> OvernightCouponPricer<'a> {
    /// A pricer for `coupon`.
    pub fn new(coupon: &'a OvernightIndexedCoupon) -> Self {
        Self { coupon }
    }

    /// The coupon rate `gearing · amount / τ + spread` as seen from `ctx`.
    ///
    /// # Errors
    ///
    /// * `Configuration` if the rate cutoff leaves no independently fixed
    ///   sub-period, the accrual period is not positive, or a forecast is
    ///   needed and the forwarding curve is empty or not anchored at the
    ///   evaluation date.
    /// * `MissingFixing` if a fixing before the evaluation date is absent.
    /// * `Numerical` if the end discount factor is zero.
    pub fn swaplet_rate(&self, ctx: &EvaluationContext<'_>) -> Result<Rate> {
        let coupon = self.coupon;
        let index = coupon.index();
        let today = ctx.evaluation_date;
        let sp = coupon.sub_periods(today)?;

        let n = sp.len();
        let cutoff = coupon.rate_cutoff() as usize;
        ensure_config!(
            cutoff < n,
            "rate cutoff ({cutoff}) must be less than number of fixings in period ({n})"
        );
        let n_max = n - cutoff - 1;
        let lookup = |i: usize| sp.fixing_dates[i.min(n_max)];

        let mut acc = Accumulator::new(coupon.compounding());
        let mut i = 0;

        while i < n && lookup(i) < today {
            let date = lookup(i);
            let fixing = ctx
                .fixings
                .fixing(index.name(), date)?
                .ok_or_else(|| Error::MissingFixing {
                    index: index.name().to_string(),
                    date: date.to_string(),
                })?;
            trace!(index = index.name(), %date, fixing, dt = sp.dt[i], "realized fixing");
            acc.add_fixing(fixing, sp.dt[i]);
            i += 1;
        }
        let realized = i;

        if i < n && lookup(i) == today {
            match ctx.fixings.fixing(index.name(), today) {
                Ok(Some(fixing)) => {
                    while i < n && lookup(i) == today {
                        trace!(
                            index = index.name(),
                            date = %today,
                            fixing,
                            dt = sp.dt[i],
                            "border fixing"
                        );
                        acc.add_fixing(fixing, sp.dt[i]);
                        i += 1;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        index = index.name(),
                        date = %today,
                        error = %e,
                        "fixing lookup failed, forecasting instead"
                    );
                }
            }
        }

        debug!(
            index = index.name(),
            realized,
            forecast_from = i,
            n,
            mode = ?coupon.compounding(),
            approximation = ?coupon.approximation(),
            "overnight coupon phases"
        );

        if i < n {
            self.forecast(&mut acc, &sp, i, n_max, ctx)?;
        }

        let t = coupon.accrual_period();
        ensure_config!(t > 0.0, "coupon accrual period should be positive, got {t}");
        Ok(coupon.gearing() * (acc.amount() / t) + coupon.spread())
    }

    /// Fold sub-periods `first..n` in from the forwarding curve.
    fn forecast(
        &self,
        acc: &mut Accumulator,
        sp: &SubPeriods,
        first: usize,
        n_max: usize,
        ctx: &EvaluationContext<'_>,
    ) -> Result<()> {
        let coupon = self.coupon;
        let index = coupon.index();
        let curve = self.forwarding_curve(ctx)?;
        let telescopic = coupon.compounding() == CompoundingMode::Compounding
            || coupon.approximation() == ApproximationMode::Takada;

        if telescopic {
            let dates = &sp.value_dates;
            let n = sp.len();
            let cutoff = n - n_max - 1;
            let start_discount = curve.discount(dates[first], false)?;
            let last_fix_date = dates[n_max];
            let mut end_discount = if cutoff > 0 {
                curve.discount(last_fix_date, false)?
            } else {
                curve.discount(dates[n], false)?
            };
            if end_discount == 0.0 {
                return Err(Error::Numerical(format!(
                    "{} end discount factor at {} is zero",
                    index.name(),
                    if cutoff > 0 { last_fix_date } else { dates[n] }
                )));
            }
            if cutoff > 0 {
                // the one-day forward factor at the cutoff date, held over
                // the whole cutoff span
                let fwd: DiscountFactor =
                    curve.discount(last_fix_date.add_days(1)?, false)? / end_discount;
                let span = dates[n] - last_fix_date;
                end_discount *= fwd.powf(span as Real);
            }
            trace!(
                index = index.name(),
                start_discount,
                end_discount,
                "telescopic forecast"
            );
            acc.add_discount_ratio(start_discount / end_discount);
        } else {
            for j in first..sp.len() {
                let date = sp.fixing_dates[j.min(n_max)];
                let fixing = index.forecast_fixing(date)?;
                trace!(index = index.name(), %date, fixing, dt = sp.dt[j], "forecast fixing");
                acc.add_fixing(fixing, sp.dt[j]);
            }
        }
        Ok(())
    }

    /// The index's forwarding curve, which must be anchored at the
    /// evaluation date.
    fn forwarding_curve(
        &self,
        ctx: &EvaluationContext<'_>,
    ) -> Result<&'a Arc<dyn YieldTermStructure>> {
        let index = self.coupon.index();
        let curve = index
            .forwarding_term_structure()
            .current_link(&format!("{} forwarding curve", index.name()))?;
        ensure_config!(
            curve.reference_date() == ctx.evaluation_date,
            "{} forwarding curve reference date ({}) differs from evaluation date ({})",
            index.name(),
            curve.reference_date(),
            ctx.evaluation_date
        );
        Ok(curve)
    }

    /// Not available for overnight coupons.
    pub fn swaplet_price(&self) -> Result<Real> {
        Err(Error::Unsupported("swaplet price not available".into()))
    }

    /// Not available for overnight coupons.
    pub fn caplet_price(&self, _effective_cap: Rate) -> Result<Real> {
        Err(Error::Unsupported("caplet price not available".into()))
    }

    /// Not available for overnight coupons.
    pub fn caplet_rate(&self, _effective_cap: Rate) -> Result<Rate> {
        Err(Error::Unsupported("caplet rate not available".into()))
    }

    /// Not available for overnight coupons.
    pub fn floorlet_price(&self, _effective_floor: Rate) -> Result<Real> {
        Err(Error::Unsupported("floorlet price not available".into()))
    }

    /// Not available for overnight coupons.
    pub fn floorlet_rate(&self, _effective_floor: Rate) -> Result<Rate> {
        Err(Error::Unsupported("floorlet rate not available".into()))
    }
}
