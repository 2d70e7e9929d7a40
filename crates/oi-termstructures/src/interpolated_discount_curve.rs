//! `InterpolatedDiscountCurve`: a curve given by discount factors at
//! pillar dates, interpolated log-linearly in time.
//!
//! Log-linear interpolation on discounts gives piecewise-constant
//! instantaneous forwards, so any two pillars reproduce their discount
//! ratio exactly.  Beyond the last pillar the last forward is held flat.

use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;
use oi_core::errors::Result;
use oi_core::{ensure, DiscountFactor, Real, Time};
use oi_time::{Date, DayCounter};
use std::sync::Arc;

/// A yield curve defined by discount factors at known dates.
#[derive(Debug, Clone)]
pub struct InterpolatedDiscountCurve {
    day_counter: Arc<dyn DayCounter>,
    dates: Vec<Date>,
    times: Vec<Time>,
    log_discounts: Vec<Real>,
}

impl InterpolatedDiscountCurve {
    /// Build a curve from pillar dates and discount factors.
    ///
    /// The first date is the reference date and its discount factor must
    /// be 1.0.  Dates must be strictly increasing and every discount
    /// factor positive.
    pub fn new(
        dates: &[Date],
        discounts: &[DiscountFactor],
        day_counter: impl DayCounter + 'static,
    ) -> Result<Self> {
        ensure!(dates.len() >= 2, "need at least 2 dates (reference + 1 pillar)");
        ensure!(
            dates.len() == discounts.len(),
            "dates ({}) and discounts ({}) must have the same length",
            dates.len(),
            discounts.len()
        );
        ensure!(
            (discounts[0] - 1.0).abs() < 1e-12,
            "first discount factor must be 1.0, got {}",
            discounts[0]
        );
        ensure!(
            dates.windows(2).all(|w| w[0] < w[1]),
            "pillar dates must be strictly increasing"
        );
        ensure!(
            discounts.iter().all(|&d| d > 0.0),
            "discount factors must be positive"
        );

        let reference_date = dates[0];
        let times = dates
            .iter()
            .map(|&d| day_counter.year_fraction(reference_date, d))
            .collect();
        Ok(Self {
            day_counter: Arc::new(day_counter),
            dates: dates.to_vec(),
            times,
            log_discounts: discounts.iter().map(|d| d.ln()).collect(),
        })
    }

    /// Pillar dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Pillar times.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Pillar discount factors.
    pub fn discounts(&self) -> Vec<DiscountFactor> {
        self.log_discounts.iter().map(|l| l.exp()).collect()
    }

    fn log_discount(&self, t: Time) -> Real {
        let n = self.times.len();
        // segment i spans times[i]..times[i + 1]; past the end reuse the last one
        let i = self.times[1..n - 1]
            .iter()
            .take_while(|&&ti| ti < t)
            .count();
        let (t0, t1) = (self.times[i], self.times[i + 1]);
        let (l0, l1) = (self.log_discounts[i], self.log_discounts[i + 1]);
        l0 + (t - t0) * (l1 - l0) / (t1 - t0)
    }
}

impl TermStructure for InterpolatedDiscountCurve {
    fn reference_date(&self) -> Date {
        self.dates[0]
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    fn max_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }
}

impl YieldTermStructure for InterpolatedDiscountCurve {
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        if t == 0.0 {
            return Ok(1.0);
        }
        Ok(self.log_discount(t).exp())
    }
}
