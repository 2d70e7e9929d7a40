//! `MakeOis`: market-convention factory for [`OvernightIndexedSwap`].
//!
//! Fill in the public fields (or keep the defaults from
//! [`MakeOis::new`]) and call [`build`](MakeOis::build).  Leaving
//! `fixed_rate` unset builds the par swap.

use crate::discounting_swap_engine::DiscountingSwapEngine;
use crate::overnight_indexed_swap::OvernightIndexedSwap;
use crate::swap::SwapType;
use oi_cashflows::{ApproximationMode, CompoundingMode, FixedLegTerms, OvernightLegTerms};
use oi_core::errors::Result;
use oi_core::{Handle, Rate, Real, Spread};
use oi_indexes::{EvaluationContext, Index, OvernightIndex};
use oi_termstructures::YieldTermStructure;
use oi_time::{
    BusinessDayConvention, Calendar, Date, DateGeneration, DayCounter, Frequency, Period,
    Schedule, ScheduleBuilder,
};
use std::sync::Arc;
use tracing::debug;

/// Conventions for an overnight indexed swap.
#[derive(Debug, Clone)]
pub struct MakeOis {
    /// Swap length from the effective date.
    pub swap_tenor: Period,
    /// The overnight index.
    pub index: OvernightIndex,
    /// Fixed rate; `None` builds the par swap.
    pub fixed_rate: Option<Rate>,
    /// Offset of the effective date from the spot date.
    pub forward_start: Period,
    /// Business days from the evaluation date to spot.
    pub settlement_days: u32,
    /// Explicit effective date, overriding spot + forward start.
    pub effective_date: Option<Date>,
    /// Explicit termination date, overriding effective date + tenor.
    pub termination_date: Option<Date>,
    /// Calendar for the accrual schedules.
    pub calendar: Arc<dyn Calendar>,
    /// Payment frequency of both legs.
    pub payment_frequency: Frequency,
    /// Payment calendar; `None` uses the schedule calendar.
    pub payment_calendar: Option<Arc<dyn Calendar>>,
    /// Roll convention for payment dates.
    pub payment_adjustment: BusinessDayConvention,
    /// Business days between accrual end and payment.
    pub payment_lag: u32,
    /// Schedule generation rule.
    pub rule: DateGeneration,
    /// End-of-month rolling; `None` applies it when the effective date is
    /// a month end on `calendar`.
    pub end_of_month: Option<bool>,
    /// Payer or receiver of the fixed leg.
    pub swap_type: SwapType,
    /// Per-period notionals of both legs.
    pub nominals: Vec<Real>,
    /// Spread over the overnight rate.
    pub overnight_spread: Spread,
    /// Accrual day counter of the fixed leg.
    pub fixed_day_count: Arc<dyn DayCounter>,
    /// Lock-out days at the end of each overnight period.
    pub rate_cutoff: u32,
    /// Compounding or averaging of the overnight rates.
    pub compounding: CompoundingMode,
    /// Forecast approximation.
    pub approximation: ApproximationMode,
    /// Discount curve for the engine and the par rate; `None` uses the
    /// index forwarding curve.
    pub discounting: Option<Handle<dyn YieldTermStructure>>,
}

impl MakeOis {
    /// Spot-starting annual swap on `index` with its calendar and day
    /// counter.
    pub fn new(swap_tenor: Period, index: &OvernightIndex, fixed_rate: Option<Rate>) -> Self {
        Self {
            swap_tenor,
            fixed_rate,
            forward_start: Period::days(0),
            settlement_days: 2,
            effective_date: None,
            termination_date: None,
            calendar: index.calendar().clone(),
            payment_frequency: Frequency::Annual,
            payment_calendar: None,
            payment_adjustment: BusinessDayConvention::Following,
            payment_lag: 0,
            rule: DateGeneration::Backward,
            end_of_month: None,
            swap_type: SwapType::Payer,
            nominals: vec![1.0],
            overnight_spread: 0.0,
            fixed_day_count: index.shared_day_counter().clone(),
            rate_cutoff: 0,
            compounding: CompoundingMode::Compounding,
            approximation: ApproximationMode::None,
            discounting: None,
            index: index.clone(),
        }
    }

    /// Curve used for discounting.
    pub fn discount_curve(&self) -> Handle<dyn YieldTermStructure> {
        self.discounting
            .clone()
            .unwrap_or_else(|| self.index.forwarding_term_structure().clone())
    }

    /// A discounting engine on [`discount_curve`](Self::discount_curve).
    pub fn engine(&self) -> DiscountingSwapEngine {
        DiscountingSwapEngine::new(self.discount_curve(), false)
    }

    /// Effective date as seen on `evaluation_date`.
    pub fn start_date(&self, evaluation_date: Date) -> Result<Date> {
        if let Some(d) = self.effective_date {
            return Ok(d);
        }
        let cal = &*self.calendar;
        let today = cal.adjust(evaluation_date, BusinessDayConvention::Following)?;
        let lag = i32::try_from(self.settlement_days).unwrap_or(i32::MAX);
        let spot = cal.advance_business_days(today, lag)?;
        let convention = if self.forward_start.length < 0 {
            BusinessDayConvention::Preceding
        } else {
            BusinessDayConvention::Following
        };
        cal.advance(spot, self.forward_start, convention, false)
    }

    /// Build the swap.
    ///
    /// # Errors
    ///
    /// Schedule or leg construction failures, and for a par swap any
    /// failure to price the zero-rate swap (e.g. a missing curve).
    pub fn build(&self, ctx: &EvaluationContext<'_>) -> Result<OvernightIndexedSwap> {
        let start = self.start_date(ctx.evaluation_date)?;
        let end_of_month = match self.end_of_month {
            Some(flag) => flag,
            None => self.calendar.is_end_of_month(start)?,
        };
        let end = match self.termination_date {
            Some(d) => d,
            None if end_of_month => self.calendar.advance(
                start,
                self.swap_tenor,
                BusinessDayConvention::ModifiedFollowing,
                true,
            )?,
            None => start.advance(self.swap_tenor.length, self.swap_tenor.unit)?,
        };

        let (tenor, rule) = match self.payment_frequency {
            Frequency::Once => (Period::years(0), DateGeneration::Zero),
            freq => (Period::from_frequency(freq)?, self.rule),
        };
        let schedule = ScheduleBuilder::new(start, end, tenor, self.calendar.clone())
            .with_convention(BusinessDayConvention::ModifiedFollowing)
            .with_termination_convention(BusinessDayConvention::ModifiedFollowing)
            .with_rule(rule)
            .end_of_month(end_of_month)
            .build()?;

        let rate = match self.fixed_rate {
            Some(r) => r,
            None => {
                let par = self.assemble(schedule.clone(), 0.0)?;
                let r = par.fair_rate(&self.engine(), ctx)?;
                debug!(index = self.index.name(), tenor = %self.swap_tenor, fair_rate = r, "par rate");
                r
            }
        };
        self.assemble(schedule, rate)
    }

    fn assemble(&self, schedule: Schedule, rate: Rate) -> Result<OvernightIndexedSwap> {
        let fixed = FixedLegTerms {
            notionals: self.nominals.clone(),
            rates: vec![rate],
            day_counter: self.fixed_day_count.clone(),
            payment_calendar: self.payment_calendar.clone(),
            payment_adjustment: self.payment_adjustment,
            payment_lag: self.payment_lag,
        };
        let overnight = OvernightLegTerms {
            notionals: self.nominals.clone(),
            gearings: Vec::new(),
            spreads: vec![self.overnight_spread],
            payment_day_counter: Some(self.index.shared_day_counter().clone()),
            payment_calendar: self.payment_calendar.clone(),
            payment_adjustment: self.payment_adjustment,
            payment_lag: self.payment_lag,
            rate_cutoff: self.rate_cutoff,
            compounding: self.compounding,
            approximation: self.approximation,
        };
        OvernightIndexedSwap::new(
            self.swap_type,
            schedule.clone(),
            fixed,
            schedule,
            self.index.clone(),
            overnight,
        )
    }
}
