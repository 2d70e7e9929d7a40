//! # oi-cashflows
//!
//! Cash flows, fixed-rate and overnight-indexed coupons, and legs.
//!
//! The heart of the crate is the rate of an [`OvernightIndexedCoupon`]:
//! the accrual period is split into daily (or coarsened) sub-periods,
//! published fixings are compounded or averaged up to the evaluation date,
//! and the remainder is forecast from the index's forwarding curve, either
//! with a two-discount-factor shortcut or fixing by fixing.  See
//! [`OvernightCouponPricer`] for the details.
//!
//! ```no_run
//! use std::sync::Arc;
//! use oi_cashflows::{
//!     EvaluationContext, OvernightCouponTerms, OvernightIndexedCoupon, Coupon,
//! };
//! use oi_core::Handle;
//! use oi_indexes::{sofr, IndexManager};
//! use oi_termstructures::{FlatForward, YieldTermStructure};
//! use oi_time::{Actual360, Date};
//!
//! let today = Date::from_ymd(2024, 3, 4).unwrap();
//! let curve: Handle<dyn YieldTermStructure> =
//!     Handle::from_arc(Arc::new(FlatForward::continuous(today, 0.05, Actual360)));
//! let index = sofr().with_forwarding(curve);
//! let coupon = OvernightIndexedCoupon::new(
//!     Date::from_ymd(2024, 6, 6).unwrap(),
//!     1_000_000.0,
//!     Date::from_ymd(2024, 3, 4).unwrap(),
//!     Date::from_ymd(2024, 6, 4).unwrap(),
//!     index,
//!     OvernightCouponTerms::default(),
//! )
//! .unwrap();
//! let fixings = IndexManager::new();
//! let rate = coupon.rate(&EvaluationContext::new(today, &fixings)).unwrap();
//! println!("{rate}");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `CashFlow` trait, `Leg`, and `SimpleCashFlow`.
pub mod cashflow;

/// Leg analytics: NPV and BPS against a discount curve.
pub mod cashflows;

/// `Coupon` trait.
pub mod coupon;

/// Fixed-rate coupons and fixed legs.
pub mod fixed_rate_coupon;

/// Overnight-indexed coupons and their sub-period layout.
pub mod overnight_indexed_coupon;

/// Rate determination for overnight-indexed coupons.
pub mod overnight_coupon_pricer;

/// Overnight leg construction.
pub mod overnight_leg;

mod leg_support;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use cashflow::{CashFlow, Leg, SimpleCashFlow};
pub use cashflows::{bps, maturity_date, npv, start_date};
pub use coupon::Coupon;
pub use fixed_rate_coupon::{fixed_rate_leg, FixedLegTerms, FixedRateCoupon};
pub use oi_indexes::EvaluationContext;
pub use overnight_coupon_pricer::OvernightCouponPricer;
pub use overnight_indexed_coupon::{
    ApproximationMode, CompoundingMode, OvernightCouponTerms, OvernightIndexedCoupon, SubPeriods,
};
pub use overnight_leg::{overnight_leg, OvernightLegTerms};
