//! Discounting swap engine.
//!
//! Values each leg by discounting its pending flows on one curve:
//!
//! $$\text{NPV} = \sum_\ell \phi_\ell \sum_i a_{\ell,i}\, D(t_{\ell,i})$$
//!
//! with $\phi_\ell = \pm 1$ the leg sign.  Flows paid on or before the
//! curve reference date are skipped unless settlement-date flows are
//! included, in which case flows on the reference date count.

use crate::instrument::PricingEngine;
use crate::swap::{Swap, SwapResults};
use oi_cashflows::cashflows;
use oi_core::errors::Result;
use oi_core::Handle;
use oi_indexes::EvaluationContext;
use oi_termstructures::YieldTermStructure;

/// Prices swaps off a single discount curve.
#[derive(Debug, Clone)]
pub struct DiscountingSwapEngine {
    discount_curve: Handle<dyn YieldTermStructure>,
    include_settlement_date_flows: bool,
}

impl DiscountingSwapEngine {
    /// Engine discounting on `discount_curve`.
    pub fn new(
        discount_curve: Handle<dyn YieldTermStructure>,
        include_settlement_date_flows: bool,
    ) -> Self {
        Self {
            discount_curve,
            include_settlement_date_flows,
        }
    }

    /// The discount curve handle.
    pub fn discount_curve(&self) -> &Handle<dyn YieldTermStructure> {
        &self.discount_curve
    }
}

impl PricingEngine<Swap> for DiscountingSwapEngine {
    type Results = SwapResults;

    fn calculate(&self, swap: &Swap, ctx: &EvaluationContext<'_>) -> Result<SwapResults> {
        let curve = self.discount_curve.current_link("discounting term structure")?;
        let reference = curve.reference_date();

        let mut results = SwapResults::default();
        for (i, leg) in swap.legs().iter().enumerate() {
            let sign = swap.payer(i).unwrap_or(1.0);
            let npv = cashflows::npv(
                leg,
                &**curve,
                self.include_settlement_date_flows,
                reference,
                reference,
                ctx,
            )?;
            let bps = cashflows::bps(
                leg,
                &**curve,
                self.include_settlement_date_flows,
                reference,
                reference,
            )?;
            results.leg_npv.push(sign * npv);
            results.leg_bps.push(sign * bps);
            results.npv += sign * npv;
        }
        Ok(results)
    }
}
