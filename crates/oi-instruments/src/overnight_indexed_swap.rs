//! Overnight indexed swap: a fixed leg against an overnight leg.
//!
//! Both legs share the per-period notionals.  Per-period fixed rates,
//! gearings and spreads may vary; the single-value inspectors
//! ([`nominal`](OvernightIndexedSwap::nominal),
//! [`fixed_rate`](OvernightIndexedSwap::fixed_rate), ...) fail unless the
//! corresponding vector is flat.

use crate::instrument::{Instrument, PricingEngine};
use crate::swap::{Swap, SwapType};
use oi_cashflows::{
    fixed_rate_leg, overnight_leg, ApproximationMode, CompoundingMode, FixedLegTerms, Leg,
    OvernightLegTerms,
};
use oi_core::errors::{Error, Result};
use oi_core::{ensure_config, Rate, Real, Spread, BASIS_POINT};
use oi_indexes::{EvaluationContext, OvernightIndex};
use oi_time::{Date, Schedule};

/// Valuation of an [`OvernightIndexedSwap`].  Leg values carry the leg sign.
#[derive(Debug, Clone, PartialEq)]
pub struct OvernightIndexedSwapResults {
    /// Swap NPV.
    pub npv: Real,
    /// Signed NPV of the fixed leg.
    pub fixed_leg_npv: Real,
    /// Signed BPS of the fixed leg.
    pub fixed_leg_bps: Real,
    /// Signed NPV of the overnight leg.
    pub overnight_leg_npv: Real,
    /// Signed BPS of the overnight leg.
    pub overnight_leg_bps: Real,
    /// Fixed rate making the NPV zero; `None` unless the fixed rates are
    /// flat and the fixed leg has a non-zero BPS.
    pub fair_rate: Option<Rate>,
    /// Overnight spread making the NPV zero; `None` unless the spreads are
    /// flat and the overnight leg has a non-zero BPS.
    pub fair_spread: Option<Spread>,
}

/// A fixed-for-overnight swap.
#[derive(Debug)]
pub struct OvernightIndexedSwap {
    swap_type: SwapType,
    fixed_schedule: Schedule,
    fixed_terms: FixedLegTerms,
    overnight_schedule: Schedule,
    index: OvernightIndex,
    overnight_terms: OvernightLegTerms,
    swap: Swap,
}

impl OvernightIndexedSwap {
    /// Build both legs.
    ///
    /// # Errors
    ///
    /// `Configuration` if the two legs disagree on notionals, if a vector
    /// is missing, or if any overnight coupon is invalid (e.g. a rate
    /// cutoff not shorter than the period).
    pub fn new(
        swap_type: SwapType,
        fixed_schedule: Schedule,
        fixed_terms: FixedLegTerms,
        overnight_schedule: Schedule,
        index: OvernightIndex,
        overnight_terms: OvernightLegTerms,
    ) -> Result<Self> {
        ensure_config!(
            fixed_terms.notionals == overnight_terms.notionals,
            "fixed leg notionals {:?} differ from overnight leg notionals {:?}",
            fixed_terms.notionals,
            overnight_terms.notionals
        );
        let fixed = fixed_rate_leg(&fixed_schedule, &fixed_terms)?;
        let floating = overnight_leg(&overnight_schedule, &index, &overnight_terms)?;
        let swap = Swap::new(vec![fixed, floating], swap_type.leg_signs().to_vec())?;
        Ok(Self {
            swap_type,
            fixed_schedule,
            fixed_terms,
            overnight_schedule,
            index,
            overnight_terms,
            swap,
        })
    }

    /// Payer or receiver.
    pub fn swap_type(&self) -> SwapType {
        self.swap_type
    }

    /// Per-period notionals.
    pub fn nominals(&self) -> &[Real] {
        &self.fixed_terms.notionals
    }

    /// The notional, if flat.
    pub fn nominal(&self) -> Result<Real> {
        flat(&self.fixed_terms.notionals, None, "nominal")
    }

    /// Per-period fixed rates.
    pub fn fixed_rates(&self) -> &[Rate] {
        &self.fixed_terms.rates
    }

    /// The fixed rate, if flat.
    pub fn fixed_rate(&self) -> Result<Rate> {
        flat(&self.fixed_terms.rates, None, "fixed rate")
    }

    /// Per-period overnight gearings (empty means 1).
    pub fn gearings(&self) -> &[Real] {
        &self.overnight_terms.gearings
    }

    /// The overnight gearing, if flat.
    pub fn gearing(&self) -> Result<Real> {
        flat(&self.overnight_terms.gearings, Some(1.0), "gearing")
    }

    /// Per-period overnight spreads (empty means 0).
    pub fn spreads(&self) -> &[Spread] {
        &self.overnight_terms.spreads
    }

    /// The overnight spread, if flat.
    pub fn spread(&self) -> Result<Spread> {
        flat(&self.overnight_terms.spreads, Some(0.0), "spread")
    }

    /// Fixed-leg schedule.
    pub fn fixed_schedule(&self) -> &Schedule {
        &self.fixed_schedule
    }

    /// Overnight-leg schedule.
    pub fn overnight_schedule(&self) -> &Schedule {
        &self.overnight_schedule
    }

    /// Fixed-leg conventions.
    pub fn fixed_terms(&self) -> &FixedLegTerms {
        &self.fixed_terms
    }

    /// Overnight-leg conventions.
    pub fn overnight_terms(&self) -> &OvernightLegTerms {
        &self.overnight_terms
    }

    /// The overnight index.
    pub fn overnight_index(&self) -> &OvernightIndex {
        &self.index
    }

    /// Rate cutoff of the overnight coupons.
    pub fn rate_cutoff(&self) -> u32 {
        self.overnight_terms.rate_cutoff
    }

    /// Compounding or averaging.
    pub fn compounding(&self) -> CompoundingMode {
        self.overnight_terms.compounding
    }

    /// Forecast approximation.
    pub fn approximation(&self) -> ApproximationMode {
        self.overnight_terms.approximation
    }

    /// Fixed leg cash flows.
    pub fn fixed_leg(&self) -> &Leg {
        &self.swap.legs()[0]
    }

    /// Overnight leg cash flows.
    pub fn overnight_leg(&self) -> &Leg {
        &self.swap.legs()[1]
    }

    /// The underlying two-leg swap.
    pub fn swap(&self) -> &Swap {
        &self.swap
    }

    /// Value the swap with `engine`.
    pub fn price<E>(
        &self,
        engine: &E,
        ctx: &EvaluationContext<'_>,
    ) -> Result<OvernightIndexedSwapResults>
    where
        E: PricingEngine<Swap, Results = crate::swap::SwapResults>,
    {
        let res = engine.calculate(&self.swap, ctx)?;
        let (fixed_leg_npv, overnight_leg_npv) = (res.leg_npv[0], res.leg_npv[1]);
        let (fixed_leg_bps, overnight_leg_bps) = (res.leg_bps[0], res.leg_bps[1]);
        let fair_rate = match self.fixed_rate() {
            Ok(k) if fixed_leg_bps != 0.0 => Some(k - res.npv / (fixed_leg_bps / BASIS_POINT)),
            _ => None,
        };
        let fair_spread = match self.spread() {
            Ok(s) if overnight_leg_bps != 0.0 => {
                Some(s - res.npv / (overnight_leg_bps / BASIS_POINT))
            }
            _ => None,
        };
        Ok(OvernightIndexedSwapResults {
            npv: res.npv,
            fixed_leg_npv,
            fixed_leg_bps,
            overnight_leg_npv,
            overnight_leg_bps,
            fair_rate,
            fair_spread,
        })
    }

    /// The fixed rate making the swap worth zero.
    ///
    /// # Errors
    ///
    /// `Configuration` if the fixed rates are not flat; `Numerical` if
    /// the fixed leg has no sensitivity.
    pub fn fair_rate<E>(&self, engine: &E, ctx: &EvaluationContext<'_>) -> Result<Rate>
    where
        E: PricingEngine<Swap, Results = crate::swap::SwapResults>,
    {
        self.fixed_rate()?;
        self.price(engine, ctx)?
            .fair_rate
            .ok_or_else(|| Error::Numerical("fixed leg BPS is zero".into()))
    }

    /// The overnight spread making the swap worth zero.
    ///
    /// # Errors
    ///
    /// `Configuration` if the spreads are not flat; `Numerical` if the
    /// overnight leg has no sensitivity.
    pub fn fair_spread<E>(&self, engine: &E, ctx: &EvaluationContext<'_>) -> Result<Spread>
    where
        E: PricingEngine<Swap, Results = crate::swap::SwapResults>,
    {
        self.spread()?;
        self.price(engine, ctx)?
            .fair_spread
            .ok_or_else(|| Error::Numerical("overnight leg BPS is zero".into()))
    }
}

impl Instrument for OvernightIndexedSwap {
    fn is_expired(&self, evaluation_date: Date) -> bool {
        self.swap.is_expired(evaluation_date)
    }

    fn maturity_date(&self) -> Option<Date> {
        self.swap.maturity()
    }
}

/// The common value of `v`; `empty` stands in for an empty vector.
fn flat(v: &[Real], empty: Option<Real>, what: &str) -> Result<Real> {
    match v.split_first() {
        None => empty.ok_or_else(|| Error::Configuration(format!("no {what} given"))),
        Some((&first, rest)) if rest.iter().all(|&x| x == first) => Ok(first),
        Some(_) => Err(Error::Configuration(format!(
            "{what} not available: per-period values differ"
        ))),
    }
}
