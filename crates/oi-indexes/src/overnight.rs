//! Concrete overnight index factory functions.
//!
//! Pre-configured constructors for SOFR, €STR (ESTR), SONIA, TONA, CORRA
//! and SARON.  Each index fixes on [`WeekendsOnly`]; attach a holiday
//! calendar through [`OvernightIndex::new`] when one is available.  None
//! of them carries a forwarding curve; use
//! [`OvernightIndex::with_forwarding`].

use crate::overnight_index::OvernightIndex;
use oi_time::{Actual360, Actual365Fixed, WeekendsOnly};

/// SOFR (Secured Overnight Financing Rate): USD, Actual/360, no lag.
pub fn sofr() -> OvernightIndex {
    OvernightIndex::new("SOFR", 0, "USD", WeekendsOnly, Actual360)
}

/// €STR (Euro Short-Term Rate): EUR, Actual/360, no lag.
pub fn estr() -> OvernightIndex {
    OvernightIndex::new("ESTR", 0, "EUR", WeekendsOnly, Actual360)
}

/// SONIA (Sterling Overnight Index Average): GBP, Actual/365 (Fixed), no lag.
pub fn sonia() -> OvernightIndex {
    OvernightIndex::new("SONIA", 0, "GBP", WeekendsOnly, Actual365Fixed)
}

/// TONA (Tokyo Overnight Average Rate): JPY, Actual/365 (Fixed), no lag.
pub fn tona() -> OvernightIndex {
    OvernightIndex::new("TONA", 0, "JPY", WeekendsOnly, Actual365Fixed)
}

/// CORRA (Canadian Overnight Repo Rate Average): CAD, Actual/365 (Fixed), no lag.
pub fn corra() -> OvernightIndex {
    OvernightIndex::new("CORRA", 0, "CAD", WeekendsOnly, Actual365Fixed)
}

/// SARON (Swiss Average Rate Overnight): CHF, Actual/360, no lag.
pub fn saron() -> OvernightIndex {
    OvernightIndex::new("SARON", 0, "CHF", WeekendsOnly, Actual360)
}
