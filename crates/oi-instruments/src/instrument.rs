//! `Instrument` and `PricingEngine` traits.
//!
//! Instruments hold their cash flows; engines hold the market data needed
//! to value them and return typed results.

use oi_core::errors::Result;
use oi_indexes::EvaluationContext;
use oi_time::Date;

/// A pricing engine for instruments described by `Args`.
pub trait PricingEngine<Args: ?Sized>: std::fmt::Debug + Send + Sync {
    /// What the engine computes.
    type Results;

    /// Value `args` as seen from `ctx`.
    fn calculate(&self, args: &Args, ctx: &EvaluationContext<'_>) -> Result<Self::Results>;
}

/// Base trait for financial instruments.
pub trait Instrument: std::fmt::Debug + Send + Sync {
    /// Whether every cash flow has been paid as of `evaluation_date`.
    fn is_expired(&self, evaluation_date: Date) -> bool;

    /// The last relevant date.
    fn maturity_date(&self) -> Option<Date> {
        None
    }
}
