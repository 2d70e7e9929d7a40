//! # oi-instruments
//!
//! Overnight indexed swaps (OIS) built from the coupons of `oi-cashflows`:
//!
//! - [`Swap`]: legs with pay/receive signs.
//! - [`OvernightIndexedSwap`]: fixed leg against an overnight leg, with
//!   fair rate and fair spread.
//! - [`MakeOis`]: market-convention construction from a tenor.
//! - [`DiscountingSwapEngine`]: leg NPVs and BPS off one discount curve.
//! - [`OvernightSwapIndex`]: the par rate of a forward-starting OIS as an
//!   index.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Discounting engine for swaps.
pub mod discounting_swap_engine;

/// `Instrument` and `PricingEngine` traits.
pub mod instrument;

/// `MakeOis`: OIS from market conventions.
pub mod make_ois;

/// `OvernightIndexedSwap`.
pub mod overnight_indexed_swap;

/// Generic multi-leg `Swap`.
pub mod swap;

/// Swap-rate indexes on overnight swaps.
pub mod swap_index;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use discounting_swap_engine::DiscountingSwapEngine;
pub use instrument::{Instrument, PricingEngine};
pub use make_ois::MakeOis;
pub use overnight_indexed_swap::{OvernightIndexedSwap, OvernightIndexedSwapResults};
pub use swap::{Swap, SwapResults, SwapType};
pub use swap_index::OvernightSwapIndex;
