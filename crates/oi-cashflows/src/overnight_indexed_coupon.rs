//! Overnight-indexed coupons.
//!
//! An [`OvernightIndexedCoupon`] pays the compounded or averaged overnight
//! rate over its accrual period.  The period is split into sub-periods, one
//! per business day of the index calendar; each sub-period has a value date
//! (start), the next value date (end), a fixing date and a year fraction
//! under the index day counter.
//!
//! When an [`ApproximationMode`] other than `None` is chosen, the forecast
//! part of the period only needs discount factors at a handful of dates, so
//! the daily grid is coarsened: it stays daily for about a week after
//! `max(start, evaluation date)` and over the last `max(7, rate_cutoff + 1)`
//! business days, with a single block sub-period in between.

use crate::cashflow::CashFlow;
use crate::coupon::Coupon;
use crate::overnight_coupon_pricer::OvernightCouponPricer;
use oi_core::errors::Result;
use oi_core::{ensure_config, Rate, Real, Spread, Time};
use oi_indexes::{EvaluationContext, Index, InterestRateIndex, OvernightIndex};
use oi_time::{BusinessDayConvention, Calendar, Date, DayCounter};
use std::sync::Arc;

/// Business days kept daily at either end of a coarsened grid.
const DAILY_STUB_DAYS: usize = 7;

/// How daily overnight rates combine into the coupon rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompoundingMode {
    /// `Π(1 + rᵢ·dtᵢ) − 1`, annualized.
    #[default]
    Compounding,
    /// `Σ rᵢ·dtᵢ`, annualized.
    Averaging,
}

/// How the not-yet-fixed part of the period is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApproximationMode {
    /// Daily sub-periods throughout.
    #[default]
    None,
    /// Coarsened sub-periods; forecasts telescope to two discount factors
    /// when compounding.
    Telescopic,
    /// Coarsened sub-periods; averaging uses the log of the discount ratio.
    Takada,
}

impl ApproximationMode {
    /// Whether the sub-period grid may be coarsened.
    pub fn coarsens_grid(self) -> bool {
        !matches!(self, ApproximationMode::None)
    }
}

/// Rate conventions of an overnight-indexed coupon.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OvernightCouponTerms {
    /// Multiplier applied to the compounded/averaged rate.
    pub gearing: Real,
    /// Spread added after gearing.
    pub spread: Spread,
    /// Number of final sub-periods that reuse the rate of the last
    /// independently fixed one.
    pub rate_cutoff: u32,
    /// Compounding or averaging.
    pub compounding: CompoundingMode,
    /// Forecast approximation.
    pub approximation: ApproximationMode,
}

impl Default for OvernightCouponTerms {
    fn default() -> Self {
        Self {
            gearing: 1.0,
            spread: 0.0,
            rate_cutoff: 0,
            compounding: CompoundingMode::Compounding,
            approximation: ApproximationMode::None,
        }
    }
}

/// The sub-period layout of a coupon as seen on one evaluation date.
///
/// `value_dates` has one more entry than `fixing_dates` and `dt`: sub-period
/// `i` runs from `value_dates[i]` to `value_dates[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPeriods {
    /// `n + 1` value dates.
    pub value_dates: Vec<Date>,
    /// `n` fixing dates.
    pub fixing_dates: Vec<Date>,
    /// `n` year fractions under the index day counter.
    pub dt: Vec<Time>,
}

impl SubPeriods {
    /// Number of sub-periods.
    pub fn len(&self) -> usize {
        self.dt.len()
    }

    /// `true` if there are no sub-periods.
    pub fn is_empty(&self) -> bool {
        self.dt.is_empty()
    }
}

/// A coupon paying the compounded or averaged overnight rate.
#[derive(Debug, Clone)]
pub struct OvernightIndexedCoupon {
    payment_date: Date,
    nominal: Real,
    accrual_start: Date,
    accrual_end: Date,
    ref_start: Date,
    ref_end: Date,
    day_counter: Arc<dyn DayCounter>,
    accrual_period: Time,
    index: OvernightIndex,
    terms: OvernightCouponTerms,
    // daily grid, coarsened on demand
    value_dates: Vec<Date>,
    fixing_dates: Vec<Date>,
}

impl OvernightIndexedCoupon {
    /// Create a coupon accruing over `[start, end)` on `index`.
    ///
    /// The accrual day counter defaults to the index day counter and the
    /// reference period to the accrual period.
    ///
    /// # Errors
    ///
    /// `Configuration` if `start >= end`, if the period holds no business
    /// day of the index calendar, or if `terms.rate_cutoff` is not below
    /// the number of daily sub-periods.
    pub fn new(
        payment_date: Date,
        nominal: Real,
        start: Date,
        end: Date,
        index: OvernightIndex,
        terms: OvernightCouponTerms,
    ) -> Result<Self> {
        ensure_config!(
            start < end,
            "accrual start ({start}) must be before accrual end ({end})"
        );
        let value_dates = daily_value_dates(&**index.calendar(), start, end)?;
        let n = value_dates.len() - 1;
        ensure_config!(
            (terms.rate_cutoff as usize) < n,
            "rate cutoff ({}) must be less than number of fixings in period ({n})",
            terms.rate_cutoff
        );
        let fixing_dates = value_dates[..n]
            .iter()
            .map(|&v| index.fixing_date(v))
            .collect::<Result<Vec<_>>>()?;
        let day_counter = Arc::clone(index.shared_day_counter());
        let accrual_period = day_counter.year_fraction(start, end);
        Ok(Self {
            payment_date,
            nominal,
            accrual_start: start,
            accrual_end: end,
            ref_start: start,
            ref_end: end,
            day_counter,
            accrual_period,
            index,
            terms,
            value_dates,
            fixing_dates,
        })
    }

    /// The same coupon measured against an explicit reference period.
    pub fn with_reference_period(mut self, ref_start: Date, ref_end: Date) -> Self {
        self.ref_start = ref_start;
        self.ref_end = ref_end;
        self.refresh_accrual_period();
        self
    }

    /// The same coupon accruing under `day_counter`.
    pub fn with_day_counter(mut self, day_counter: Arc<dyn DayCounter>) -> Self {
        self.day_counter = day_counter;
        self.refresh_accrual_period();
        self
    }

    fn refresh_accrual_period(&mut self) {
        self.accrual_period = self.day_counter.year_fraction_with_ref(
            self.accrual_start,
            self.accrual_end,
            self.ref_start,
            self.ref_end,
        );
    }

    /// The overnight index.
    pub fn index(&self) -> &OvernightIndex {
        &self.index
    }

    /// Rate conventions.
    pub fn terms(&self) -> &OvernightCouponTerms {
        &self.terms
    }

    /// Gearing.
    pub fn gearing(&self) -> Real {
        self.terms.gearing
    }

    /// Spread.
    pub fn spread(&self) -> Spread {
        self.terms.spread
    }

    /// Rate cutoff in sub-periods.
    pub fn rate_cutoff(&self) -> u32 {
        self.terms.rate_cutoff
    }

    /// Compounding mode.
    pub fn compounding(&self) -> CompoundingMode {
        self.terms.compounding
    }

    /// Approximation mode.
    pub fn approximation(&self) -> ApproximationMode {
        self.terms.approximation
    }

    /// Daily value dates (one per business day, plus the period end).
    pub fn value_dates(&self) -> &[Date] {
        &self.value_dates
    }

    /// Daily fixing dates.
    pub fn fixing_dates(&self) -> &[Date] {
        &self.fixing_dates
    }

    /// The sub-period layout used when pricing on `evaluation_date`.
    ///
    /// Daily unless the approximation mode allows coarsening; first and
    /// last value dates are always the daily ones and the year fractions
    /// add up to the index year fraction of the whole period.
    pub fn sub_periods(&self, evaluation_date: Date) -> Result<SubPeriods> {
        let n = self.fixing_dates.len();
        let keep = if self.terms.approximation.coarsens_grid() {
            self.coarse_mask(evaluation_date)?
        } else {
            vec![true; n + 1]
        };

        let mut value_dates = Vec::with_capacity(n + 1);
        let mut fixing_dates = Vec::with_capacity(n);
        for (i, &v) in self.value_dates.iter().enumerate() {
            if keep[i] {
                value_dates.push(v);
                if i < n {
                    fixing_dates.push(self.fixing_dates[i]);
                }
            }
        }
        let dc = self.index.day_counter();
        let dt = value_dates
            .windows(2)
            .map(|w| dc.year_fraction(w[0], w[1]))
            .collect();
        Ok(SubPeriods {
            value_dates,
            fixing_dates,
            dt,
        })
    }

    /// Which daily value dates survive coarsening.
    fn coarse_mask(&self, evaluation_date: Date) -> Result<Vec<bool>> {
        let n = self.fixing_dates.len();
        let first = self.value_dates[0];
        let last = self.value_dates[n];
        let front_end = self
            .index
            .calendar()
            .advance_business_days(first.max(evaluation_date), DAILY_STUB_DAYS as i32)?
            .min(last);
        let back = DAILY_STUB_DAYS.max(self.terms.rate_cutoff as usize + 1);
        let back_start = self.value_dates[n.saturating_sub(back)];
        Ok(self
            .value_dates
            .iter()
            .map(|&v| v <= front_end || v >= back_start)
            .collect())
    }

    /// Today-or-earlier fixings read from history and later ones forecast,
    /// one per daily fixing date.
    pub fn index_fixings(&self, ctx: &EvaluationContext<'_>) -> Result<Vec<Rate>> {
        self.fixing_dates
            .iter()
            .map(|&d| self.index.fixing(d, ctx))
            .collect()
    }

    /// The pricer computing this coupon's rate.
    pub fn pricer(&self) -> OvernightCouponPricer<'_> {
        OvernightCouponPricer::new(self)
    }
}

/// Every business day in `[start, end)` rolled forward, then the rolled end.
fn daily_value_dates(calendar: &dyn Calendar, start: Date, end: Date) -> Result<Vec<Date>> {
    let first = calendar.adjust(start, BusinessDayConvention::Following)?;
    let last = calendar.adjust(end, BusinessDayConvention::Following)?;
    ensure_config!(
        first < last,
        "no {} business day between {start} and {end}",
        calendar.name()
    );
    let mut dates = vec![first];
    let mut d = calendar.advance_business_days(first, 1)?;
    while d < last {
        dates.push(d);
        d = calendar.advance_business_days(d, 1)?;
    }
    dates.push(last);
    Ok(dates)
}

impl CashFlow for OvernightIndexedCoupon {
    fn date(&self) -> Date {
        self.payment_date
    }

    fn amount(&self, ctx: &EvaluationContext<'_>) -> Result<Real> {
        Ok(self.nominal * self.rate(ctx)? * self.accrual_period)
    }

    fn as_coupon(&self) -> Option<&dyn Coupon> {
        Some(self)
    }
}

impl Coupon for OvernightIndexedCoupon {
    fn nominal(&self) -> Real {
        self.nominal
    }

    fn accrual_start_date(&self) -> Date {
        self.accrual_start
    }

    fn accrual_end_date(&self) -> Date {
        self.accrual_end
    }

    fn reference_period_start(&self) -> Date {
        self.ref_start
    }

    fn reference_period_end(&self) -> Date {
        self.ref_end
    }

    fn accrual_period(&self) -> Time {
        self.accrual_period
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    fn rate(&self, ctx: &EvaluationContext<'_>) -> Result<Rate> {
        self.pricer().swaplet_rate(ctx)
    }
}
