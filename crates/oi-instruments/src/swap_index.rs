//! `OvernightSwapIndex`: the par rate of an OIS as an index.
//!
//! The fixing on date `f` is the fair fixed rate of the swap starting on
//! the index value date of `f` and running for the index tenor.  The
//! underlying swap is rebuilt only when a different fixing date is asked
//! for; the cache lives in the index itself.
//!
//! A term index is the single-period case: one overnight coupon over the
//! whole tenor, see [`OvernightSwapIndex::term`].

use crate::instrument::Instrument;
use crate::make_ois::MakeOis;
use crate::overnight_indexed_swap::OvernightIndexedSwap;
use oi_cashflows::{ApproximationMode, CompoundingMode};
use oi_core::errors::{Error, Result};
use oi_core::{Handle, Rate};
use oi_indexes::{EvaluationContext, Index, IndexManager, InterestRateIndex, OvernightIndex};
use oi_termstructures::YieldTermStructure;
use oi_time::{Calendar, Date, DayCounter, Frequency, Period};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

type CachedSwap = Option<(Date, Arc<OvernightIndexedSwap>)>;

/// Swap-rate index on an overnight indexed swap.
#[derive(Debug)]
pub struct OvernightSwapIndex {
    family_name: String,
    name: String,
    tenor: Period,
    settlement_days: u32,
    currency: String,
    overnight_index: OvernightIndex,
    overnight_leg_frequency: Frequency,
    rate_cutoff: u32,
    compounding: CompoundingMode,
    approximation: ApproximationMode,
    discounting: Option<Handle<dyn YieldTermStructure>>,
    cache: Mutex<CachedSwap>,
}

impl OvernightSwapIndex {
    /// Index on `tenor` swaps paying every `overnight_leg_frequency`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        family_name: impl Into<String>,
        tenor: Period,
        settlement_days: u32,
        currency: impl Into<String>,
        overnight_index: OvernightIndex,
        overnight_leg_frequency: Frequency,
        rate_cutoff: u32,
        compounding: CompoundingMode,
        approximation: ApproximationMode,
    ) -> Self {
        let family_name = family_name.into();
        let name = format!(
            "{family_name}{tenor} {}",
            overnight_index.shared_day_counter().name()
        );
        Self {
            family_name,
            name,
            tenor,
            settlement_days,
            currency: currency.into(),
            overnight_index,
            overnight_leg_frequency,
            rate_cutoff,
            compounding,
            approximation,
            discounting: None,
            cache: Mutex::new(None),
        }
    }

    /// Term rate index: a single overnight coupon over `tenor`.
    pub fn term(
        family_name: impl Into<String>,
        tenor: Period,
        settlement_days: u32,
        overnight_index: OvernightIndex,
        compounding: CompoundingMode,
    ) -> Self {
        let currency = overnight_index.currency().to_string();
        Self::new(
            family_name,
            tenor,
            settlement_days,
            currency,
            overnight_index,
            Frequency::Once,
            0,
            compounding,
            ApproximationMode::None,
        )
    }

    /// Discount on `curve` instead of the overnight forwarding curve.
    pub fn with_discounting(mut self, curve: Handle<dyn YieldTermStructure>) -> Self {
        self.discounting = Some(curve);
        self
    }

    /// The overnight index of the floating leg.
    pub fn overnight_index(&self) -> &OvernightIndex {
        &self.overnight_index
    }

    /// Payment frequency of both legs.
    pub fn overnight_leg_frequency(&self) -> Frequency {
        self.overnight_leg_frequency
    }

    /// The swap fixing on `fixing_date`.  Reuses the last one built when
    /// the fixing date is unchanged.
    pub fn underlying_swap(&self, fixing_date: Date) -> Result<Arc<OvernightIndexedSwap>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((date, swap)) = cache.as_ref() {
            if *date == fixing_date {
                return Ok(Arc::clone(swap));
            }
        }
        debug!(index = %self.name, %fixing_date, "rebuilding underlying swap");
        let mut make = self.conventions(Some(0.0));
        make.effective_date = Some(self.value_date(fixing_date)?);
        // a fixed rate is given, so no curve is read while building
        let none = IndexManager::new();
        let swap = Arc::new(make.build(&EvaluationContext::new(fixing_date, &none))?);
        *cache = Some((fixing_date, Arc::clone(&swap)));
        Ok(swap)
    }

    fn conventions(&self, fixed_rate: Option<Rate>) -> MakeOis {
        let mut make = MakeOis::new(self.tenor, &self.overnight_index, fixed_rate);
        make.settlement_days = self.settlement_days;
        make.payment_frequency = self.overnight_leg_frequency;
        make.rate_cutoff = self.rate_cutoff;
        make.compounding = self.compounding;
        make.approximation = self.approximation;
        make.discounting = self.discounting.clone();
        make
    }
}

impl Index for OvernightSwapIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn fixing_calendar(&self) -> &dyn Calendar {
        self.overnight_index.fixing_calendar()
    }

    /// Fair rate of the underlying swap, valued as of the forwarding
    /// curve's reference date.
    fn forecast_fixing(&self, fixing_date: Date) -> Result<Rate> {
        let swap = self.underlying_swap(fixing_date)?;
        let engine = self.conventions(None).engine();
        let forwarding = self
            .overnight_index
            .forwarding_term_structure()
            .current_link(&format!("{} forwarding curve", self.overnight_index.name()))?;
        let none = IndexManager::new();
        let ctx = EvaluationContext::new(forwarding.reference_date(), &none);
        swap.fair_rate(&engine, &ctx)
    }
}

impl InterestRateIndex for OvernightSwapIndex {
    fn family_name(&self) -> &str {
        &self.family_name
    }

    fn tenor(&self) -> Period {
        self.tenor
    }

    fn fixing_days(&self) -> u32 {
        self.settlement_days
    }

    fn currency(&self) -> &str {
        &self.currency
    }

    fn day_counter(&self) -> &dyn DayCounter {
        self.overnight_index.day_counter()
    }

    fn maturity_date(&self, value_date: Date) -> Result<Date> {
        let fixing = self.fixing_date(value_date)?;
        let swap = self.underlying_swap(fixing)?;
        swap.maturity_date().ok_or_else(|| {
            Error::Runtime(format!("{}: underlying swap has no cash flows", self.name))
        })
    }
}
