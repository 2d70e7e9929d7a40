//! # oi-indexes
//!
//! Overnight rate indexes and the store of their published fixings.
//!
//! An [`OvernightIndex`] knows its calendar, day counter and fixing lag,
//! and forecasts fixings off its forwarding curve.  Published fixings live
//! outside the index, behind the [`FixingHistory`] trait; [`IndexManager`]
//! is the in-memory implementation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Evaluation date plus fixing history, passed to every rate query.
pub mod context;

/// `FixingHistory` trait and the in-memory `IndexManager`.
pub mod fixing_history;

/// `Index` trait: base trait for all market indexes.
pub mod index;

/// `InterestRateIndex`: base for interest-rate indexes.
pub mod interest_rate_index;

/// Concrete overnight index definitions (SOFR, ESTR, SONIA, etc.).
pub mod overnight;

/// `OvernightIndex`: overnight rate indexes.
pub mod overnight_index;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use context::EvaluationContext;
pub use fixing_history::{FixingHistory, IndexManager};
pub use index::Index;
pub use interest_rate_index::InterestRateIndex;
pub use overnight::{corra, estr, saron, sofr, sonia, tona};
pub use overnight_index::OvernightIndex;
