//! # oirates
//!
//! Compounded and averaged overnight-index coupons, overnight indexed
//! swaps, and the curves and indexes they price off.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the
//! individual `oi-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! oirates = "0.1"
//! ```
//!
//! ```rust
//! use std::sync::Arc;
//! use oirates::cashflows::{Coupon, EvaluationContext, OvernightCouponTerms, OvernightIndexedCoupon};
//! use oirates::core::Handle;
//! use oirates::indexes::{sofr, IndexManager};
//! use oirates::termstructures::{FlatForward, YieldTermStructure};
//! use oirates::time::{Actual360, Date};
//!
//! let today = Date::from_ymd(2024, 3, 4).unwrap();
//! let curve: Handle<dyn YieldTermStructure> =
//!     Handle::from_arc(Arc::new(FlatForward::continuous(today, 0.05, Actual360)));
//! let coupon = OvernightIndexedCoupon::new(
//!     Date::from_ymd(2024, 6, 4).unwrap(),
//!     1_000_000.0,
//!     today,
//!     Date::from_ymd(2024, 6, 4).unwrap(),
//!     sofr().with_forwarding(curve),
//!     OvernightCouponTerms::default(),
//! )
//! .unwrap();
//! let fixings = IndexManager::new();
//! let rate = coupon.rate(&EvaluationContext::new(today, &fixings)).unwrap();
//! assert!((rate - 0.05).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use oi_core as core;

/// Date, calendar, day counter, and schedule types.
pub use oi_time as time;

/// Yield term structures.
pub use oi_termstructures as termstructures;

/// Overnight indexes and fixing histories.
pub use oi_indexes as indexes;

/// Cash flows, coupons, and overnight rate determination.
pub use oi_cashflows as cashflows;

/// Swaps, swap engines, and swap-rate indexes.
pub use oi_instruments as instruments;
