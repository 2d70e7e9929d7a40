//! Error types for oirates.
//!
//! A single `thiserror`-derived enum covers every failure the library can
//! report.  Configuration problems, missing historical fixings, and
//! numerically degenerate inputs each get their own variant so callers can
//! react to them (e.g. publish the missing fixing and retry) without parsing
//! messages.  The `ensure!` and `ensure_config!` macros keep the call sites
//! short.

use thiserror::Error;

/// The top-level error type used throughout oirates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Invalid or inconsistent configuration (rate cutoff too large,
    /// non-positive accrual period, empty curve handle, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A fixing that must already be known is absent from the history.
    #[error("missing {index} fixing for {date}")]
    MissingFixing {
        /// Name of the index.
        index: String,
        /// The fixing date, formatted.
        date: String,
    },

    /// A numerically degenerate input, e.g. a zero discount factor used as
    /// a divisor.
    #[error("numerical error: {0}")]
    Numerical(String),

    /// The requested operation is not part of this object's contract.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (see [`ensure!`]).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Whether this error reports an absent historical fixing.
    pub fn is_missing_fixing(&self) -> bool {
        matches!(self, Error::MissingFixing { .. })
    }
}

/// Shorthand `Result` type used throughout oirates.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use oi_core::{ensure, errors::Error};
/// fn positive(x: f64) -> oi_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Configuration(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use oi_core::{ensure_config, errors::Error};
/// fn cutoff(rate_cutoff: usize, n: usize) -> oi_core::errors::Result<usize> {
///     ensure_config!(rate_cutoff < n, "rate cutoff {rate_cutoff} must be below {n}");
///     Ok(n - rate_cutoff - 1)
/// }
/// assert_eq!(cutoff(2, 5), Ok(2));
/// assert!(matches!(cutoff(5, 5), Err(Error::Configuration(_))));
/// ```
#[macro_export]
macro_rules! ensure_config {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Configuration(
                format!($($msg)*)
            ));
        }
    };
}
