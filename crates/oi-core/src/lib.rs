//! # oi-core
//!
//! Core types and error definitions for oirates.
//!
//! This crate provides the building blocks shared across the workspace:
//! type aliases, the error hierarchy, the `Handle` wrapper used to share
//! term structures, and the `TimeSeries` container backing fixing histories.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Compounding conventions.
pub mod compounding;

/// Error types and the `ensure!` / `ensure_config!` macros.
pub mod errors;

/// Shared reference handle (`Handle<T>`).
pub mod handle;

/// Generic time-series container.
pub mod time_series;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Non-negative integer type.
pub type Natural = u32;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A spread over a reference rate.
pub type Spread = Real;

/// A discount factor, normally in (0, 1].
pub type DiscountFactor = Real;

/// A time measurement in years.
pub type Time = Real;

/// One basis point.
pub const BASIS_POINT: Real = 1.0e-4;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use compounding::Compounding;
pub use errors::{Error, Result};
pub use handle::Handle;
pub use time_series::TimeSeries;
