//! # oi-termstructures
//!
//! Discount curves.  Every curve is anchored at an explicit reference date
//! and answers `discount(date)`; overnight coupons read forecasts from
//! these curves through a [`Handle`](oi_core::Handle).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Base trait for all term structures.
pub mod term_structure;

/// `YieldTermStructure` trait.
pub mod yield_term_structure;

/// Flat forward-rate curve.
pub mod flat_forward;

/// Discount-factor curve with log-linear interpolation.
pub mod interpolated_discount_curve;

/// A curve seen from a later reference date.
pub mod implied_term_structure;

/// A curve with its forward discount factors shifted in time.
pub mod shifted_term_structure;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use flat_forward::FlatForward;
pub use implied_term_structure::ImpliedTermStructure;
pub use interpolated_discount_curve::InterpolatedDiscountCurve;
pub use shifted_term_structure::ShiftedTermStructure;
pub use term_structure::TermStructure;
pub use yield_term_structure::YieldTermStructure;
