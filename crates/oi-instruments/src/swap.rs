//! Generic swap: any number of legs, each paid or received.

use crate::instrument::{Instrument, PricingEngine};
use oi_cashflows::{cashflows, Leg};
use oi_core::errors::Result;
use oi_core::{ensure_config, Real};
use oi_indexes::EvaluationContext;
use oi_time::Date;

/// Swap type from the fixed-rate side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapType {
    /// Pay fixed, receive floating.
    #[default]
    Payer,
    /// Receive fixed, pay floating.
    Receiver,
}

impl SwapType {
    /// Signs of the (fixed, floating) legs: −1 for a paid leg, +1 for a
    /// received one.
    pub fn leg_signs(self) -> [Real; 2] {
        match self {
            SwapType::Payer => [-1.0, 1.0],
            SwapType::Receiver => [1.0, -1.0],
        }
    }
}

/// Results of valuing a [`Swap`].  Leg values carry the leg sign.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SwapResults {
    /// Sum of the signed leg values.
    pub npv: Real,
    /// Signed NPV of each leg.
    pub leg_npv: Vec<Real>,
    /// Signed basis-point sensitivity of each leg.
    pub leg_bps: Vec<Real>,
}

/// A set of legs with pay (−1) / receive (+1) signs.
#[derive(Debug)]
pub struct Swap {
    legs: Vec<Leg>,
    payer: Vec<Real>,
}

impl Swap {
    /// Create a swap; `payer[i]` is the sign of `legs[i]`.
    pub fn new(legs: Vec<Leg>, payer: Vec<Real>) -> Result<Self> {
        ensure_config!(
            legs.len() == payer.len(),
            "{} legs but {} payer signs",
            legs.len(),
            payer.len()
        );
        Ok(Self { legs, payer })
    }

    /// Number of legs.
    pub fn num_legs(&self) -> usize {
        self.legs.len()
    }

    /// All legs.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// The `i`-th leg.
    pub fn leg(&self, i: usize) -> Option<&Leg> {
        self.legs.get(i)
    }

    /// Sign of the `i`-th leg.
    pub fn payer(&self, i: usize) -> Option<Real> {
        self.payer.get(i).copied()
    }

    /// Earliest accrual start across legs.
    pub fn start_date(&self) -> Option<Date> {
        self.legs.iter().filter_map(cashflows::start_date).min()
    }

    /// Latest payment across legs.
    pub fn maturity(&self) -> Option<Date> {
        self.legs.iter().filter_map(cashflows::maturity_date).max()
    }

    /// Value the swap with `engine`.
    pub fn price<E>(&self, engine: &E, ctx: &EvaluationContext<'_>) -> Result<E::Results>
    where
        E: PricingEngine<Swap>,
    {
        engine.calculate(self, ctx)
    }
}

impl Instrument for Swap {
    fn is_expired(&self, evaluation_date: Date) -> bool {
        self.legs
            .iter()
            .flatten()
            .all(|cf| cf.has_occurred(evaluation_date, false))
    }

    fn maturity_date(&self) -> Option<Date> {
        self.maturity()
    }
}
