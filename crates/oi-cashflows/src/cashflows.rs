//! Leg analytics.
//!
//! Present value and basis-point sensitivity of a leg against a discount
//! curve.  Flows that have already occurred as of the settlement date are
//! skipped; results are expressed as of `npv_date`.

use crate::cashflow::Leg;
use oi_core::errors::{Error, Result};
use oi_core::{Real, BASIS_POINT};
use oi_indexes::EvaluationContext;
use oi_termstructures::YieldTermStructure;
use oi_time::Date;

/// The first accrual start (or payment) date of a leg.
pub fn start_date(leg: &Leg) -> Option<Date> {
    leg.iter()
        .map(|cf| cf.as_coupon().map_or(cf.date(), |c| c.accrual_start_date()))
        .min()
}

/// The last payment (or accrual end) date of a leg.
pub fn maturity_date(leg: &Leg) -> Option<Date> {
    leg.iter()
        .map(|cf| cf.as_coupon().map_or(cf.date(), |c| c.accrual_end_date().max(cf.date())))
        .max()
}

fn npv_date_discount(curve: &dyn YieldTermStructure, npv_date: Date) -> Result<Real> {
    let d = curve.discount(npv_date, false)?;
    if d == 0.0 {
        return Err(Error::Numerical(format!("zero discount factor at npv date {npv_date}")));
    }
    Ok(d)
}

/// Net present value of the pending flows of `leg`.
///
/// `Σ amount · D(pay)` over flows not yet occurred on `settlement_date`,
/// divided by `D(npv_date)`.
pub fn npv(
    leg: &Leg,
    curve: &dyn YieldTermStructure,
    include_settlement_date_flows: bool,
    settlement_date: Date,
    npv_date: Date,
    ctx: &EvaluationContext<'_>,
) -> Result<Real> {
    let mut total = 0.0;
    for cf in leg {
        if cf.has_occurred(settlement_date, include_settlement_date_flows) {
            continue;
        }
        total += cf.amount(ctx)? * curve.discount(cf.date(), false)?;
    }
    Ok(total / npv_date_discount(curve, npv_date)?)
}

/// Basis-point sensitivity of `leg`: the value of one basis point of
/// coupon rate, `Σ nominal · τ · D(pay) · 1bp` over pending coupons.
pub fn bps(
    leg: &Leg,
    curve: &dyn YieldTermStructure,
    include_settlement_date_flows: bool,
    settlement_date: Date,
    npv_date: Date,
) -> Result<Real> {
    let mut total = 0.0;
    for cf in leg {
        if cf.has_occurred(settlement_date, include_settlement_date_flows) {
            continue;
        }
        if let Some(c) = cf.as_coupon() {
            total += c.nominal() * c.accrual_period() * curve.discount(cf.date(), false)?;
        }
    }
    Ok(total * BASIS_POINT / npv_date_discount(curve, npv_date)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cashflow::SimpleCashFlow;
    use crate::fixed_rate_coupon::{fixed_rate_leg, FixedLegTerms};
    use approx::assert_abs_diff_eq;
    use oi_indexes::IndexManager;
    use oi_termstructures::FlatForward;
    use oi_time::{Actual360, Period, ScheduleBuilder, WeekendsOnly};
    use std::sync::Arc;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn npv_skips_settled_flows() {
        let today = date(2024, 1, 2);
        let curve = FlatForward::continuous(today, 0.0, Actual360);
        let leg: Leg = vec![
            Box::new(SimpleCashFlow::new(10.0, today)),
            Box::new(SimpleCashFlow::new(20.0, date(2024, 6, 3))),
        ];
        let im = IndexManager::new();
        let ctx = EvaluationContext::new(today, &im);
        assert_eq!(npv(&leg, &curve, false, today, today, &ctx).unwrap(), 20.0);
        assert_eq!(npv(&leg, &curve, true, today, today, &ctx).unwrap(), 30.0);
        assert_eq!(bps(&leg, &curve, true, today, today).unwrap(), 0.0);
    }

    #[test]
    fn bps_of_fixed_leg_is_annuity() {
        let today = date(2024, 1, 2);
        let r = 0.04;
        let curve = FlatForward::continuous(today, r, Actual360);
        let sched = ScheduleBuilder::new(
            today,
            date(2026, 1, 2),
            Period::years(1),
            Arc::new(WeekendsOnly),
        )
        .build()
        .unwrap();
        let terms = FixedLegTerms {
            notionals: vec![100.0],
            rates: vec![0.05],
            ..FixedLegTerms::default()
        };
        let leg = fixed_rate_leg(&sched, &terms).unwrap();
        let im = IndexManager::new();
        let ctx = EvaluationContext::new(today, &im);

        let mut annuity = 0.0;
        let mut prev = today;
        for d in [date(2025, 1, 2), date(2026, 1, 2)] {
            let tau = (d - prev) as Real / 360.0;
            annuity += 100.0 * tau * (-r * (d - today) as Real / 360.0).exp();
            prev = d;
        }
        let b = bps(&leg, &curve, false, today, today).unwrap();
        assert_abs_diff_eq!(b, annuity * 1e-4, epsilon = 1e-12);
        let v = npv(&leg, &curve, false, today, today, &ctx).unwrap();
        assert_abs_diff_eq!(v, 0.05 * annuity, epsilon = 1e-10);
        assert_eq!(start_date(&leg), Some(today));
        assert_eq!(maturity_date(&leg), Some(date(2026, 1, 2)));
    }
}
