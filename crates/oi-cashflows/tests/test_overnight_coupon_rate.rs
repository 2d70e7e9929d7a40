//! Rate determination of overnight-indexed coupons: realized, border and
//! forecast segments, rate cutoff and the discount-ratio shortcuts.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use oi_cashflows::{
    ApproximationMode, CashFlow, CompoundingMode, Coupon, EvaluationContext, OvernightCouponTerms,
    OvernightIndexedCoupon,
};
use oi_core::errors::{Error, Result};
use oi_core::{DiscountFactor, Handle, Rate, Real, Time};
use oi_indexes::{FixingHistory, Index, IndexManager, OvernightIndex};
use oi_termstructures::{
    FlatForward, InterpolatedDiscountCurve, TermStructure, YieldTermStructure,
};
use oi_time::{Actual360, Date, DayCounter, NullCalendar, Thirty360, WeekendsOnly};
use proptest::prelude::*;
use std::sync::Arc;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// An index fixing every calendar day, so each sub-period is one day.
fn daily_index() -> OvernightIndex {
    OvernightIndex::new("TEST", 0, "USD", NullCalendar, Actual360)
}

fn coupon(
    index: &OvernightIndex,
    start: Date,
    end: Date,
    terms: OvernightCouponTerms,
) -> OvernightIndexedCoupon {
    OvernightIndexedCoupon::new(end, 1.0, start, end, index.clone(), terms).unwrap()
}

fn publish(im: &IndexManager, index: &OvernightIndex, first: Date, rates: &[Rate]) {
    for (k, &r) in rates.iter().enumerate() {
        im.add_fixing(index.name(), first + k as i64, r, true).unwrap();
    }
}

fn compounding(rate_cutoff: u32) -> OvernightCouponTerms {
    OvernightCouponTerms {
        rate_cutoff,
        ..OvernightCouponTerms::default()
    }
}

fn averaging(approximation: ApproximationMode) -> OvernightCouponTerms {
    OvernightCouponTerms {
        compounding: CompoundingMode::Averaging,
        approximation,
        ..OvernightCouponTerms::default()
    }
}

/// Discount factors read from a table of dates, Actual/360 from the
/// reference date.  Unknown dates are an error.
#[derive(Debug)]
struct TableCurve {
    reference: Date,
    table: Vec<(Date, DiscountFactor)>,
    dc: Actual360,
}

impl TableCurve {
    fn handle(reference: Date, table: Vec<(Date, DiscountFactor)>) -> Handle<dyn YieldTermStructure> {
        Handle::from_arc(Arc::new(TableCurve {
            reference,
            table,
            dc: Actual360,
        }))
    }
}

impl TermStructure for TableCurve {
    fn reference_date(&self) -> Date {
        self.reference
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &self.dc
    }

    fn max_date(&self) -> Date {
        Date::max_date()
    }
}

impl YieldTermStructure for TableCurve {
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        let d = self.reference + (t * 360.0).round() as i64;
        self.table
            .iter()
            .find(|(date, _)| *date == d)
            .map(|&(_, df)| df)
            .ok_or_else(|| Error::Runtime(format!("no discount factor at {d}")))
    }
}

/// A history whose lookups fail on one date.
#[derive(Debug)]
struct FailingOn {
    inner: IndexManager,
    broken: Date,
}

impl FixingHistory for FailingOn {
    fn fixing(&self, index_name: &str, date: Date) -> Result<Option<Rate>> {
        if date == self.broken {
            return Err(Error::Runtime("fixing service unavailable".into()));
        }
        self.inner.fixing(index_name, date)
    }
}

// ── Realized segment ────────────────────────────────────────────────────────

#[test]
fn compounding_of_realized_fixings() {
    let index = daily_index();
    let start = date(2024, 6, 3);
    let c = coupon(&index, start, date(2024, 6, 6), compounding(0));
    let im = IndexManager::new();
    publish(&im, &index, start, &[0.01, 0.012, 0.011]);
    let ctx = EvaluationContext::new(date(2024, 6, 10), &im);

    let dt: Real = 1.0 / 360.0;
    let cf = (1.0 + 0.01 * dt) * (1.0 + 0.012 * dt) * (1.0 + 0.011 * dt);
    let rate = c.rate(&ctx).unwrap();
    assert_abs_diff_eq!(rate, (cf - 1.0) / (3.0 * dt), epsilon = 1e-15);
    // first order: the plain average
    assert_abs_diff_eq!(rate, 0.011, epsilon = 1e-6);
}

#[test]
fn averaging_of_realized_fixings() {
    let index = daily_index();
    let start = date(2024, 6, 3);
    let c = coupon(&index, start, date(2024, 6, 6), averaging(ApproximationMode::None));
    let im = IndexManager::new();
    publish(&im, &index, start, &[0.01, 0.012, 0.011]);
    let ctx = EvaluationContext::new(date(2024, 6, 10), &im);

    let dt: Real = 1.0 / 360.0;
    let avg = 0.01 * dt + 0.012 * dt + 0.011 * dt;
    assert_abs_diff_eq!(c.rate(&ctx).unwrap(), avg / (3.0 * dt), epsilon = 1e-15);
}

#[test]
fn gearing_and_spread_apply_after_annualizing() {
    let index = daily_index();
    let start = date(2024, 6, 3);
    let terms = OvernightCouponTerms {
        gearing: 2.0,
        spread: 0.001,
        ..OvernightCouponTerms::default()
    };
    let c = coupon(&index, start, date(2024, 6, 5), terms);
    let im = IndexManager::new();
    publish(&im, &index, start, &[0.02, 0.02]);
    let ctx = EvaluationContext::new(date(2024, 6, 10), &im);

    let dt: Real = 1.0 / 360.0;
    let cf = (1.0 + 0.02 * dt) * (1.0 + 0.02 * dt);
    assert_abs_diff_eq!(
        c.rate(&ctx).unwrap(),
        2.0 * (cf - 1.0) / (2.0 * dt) + 0.001,
        epsilon = 1e-15
    );
    assert_abs_diff_eq!(
        c.amount(&ctx).unwrap(),
        c.rate(&ctx).unwrap() * 2.0 * dt,
        epsilon = 1e-15
    );
}

#[test]
fn weekend_sub_period_weighs_three_days() {
    let index = OvernightIndex::new("TEST", 0, "USD", WeekendsOnly, Actual360);
    // Friday to Monday
    let c = coupon(&index, date(2024, 6, 7), date(2024, 6, 10), averaging(ApproximationMode::None));
    let im = IndexManager::new();
    im.add_fixing(index.name(), date(2024, 6, 7), 0.05, false).unwrap();
    let ctx = EvaluationContext::new(date(2024, 6, 12), &im);
    assert_abs_diff_eq!(c.rate(&ctx).unwrap(), 0.05, epsilon = 1e-15);
}

#[test]
fn missing_past_fixing_is_reported() {
    let index = daily_index();
    let start = date(2024, 6, 3);
    let c = coupon(&index, start, date(2024, 6, 6), compounding(0));
    let im = IndexManager::new();
    publish(&im, &index, start, &[0.01]);
    let err = c
        .rate(&EvaluationContext::new(date(2024, 6, 10), &im))
        .unwrap_err();
    assert_eq!(
        err,
        Error::MissingFixing {
            index: "USD-TEST".into(),
            date: date(2024, 6, 4).to_string(),
        }
    );
}

// ── Rate cutoff ─────────────────────────────────────────────────────────────

fn realized_rate(rates: &[Rate], rate_cutoff: u32, mode: CompoundingMode) -> Rate {
    let index = daily_index();
    let start = date(2024, 6, 3);
    let end = start + rates.len() as i64;
    let terms = OvernightCouponTerms {
        rate_cutoff,
        compounding: mode,
        ..OvernightCouponTerms::default()
    };
    let c = coupon(&index, start, end, terms);
    let im = IndexManager::new();
    publish(&im, &index, start, rates);
    c.rate(&EvaluationContext::new(end + 5, &im)).unwrap()
}

#[test]
fn cutoff_reuses_last_independent_fixing() {
    let rates = [0.010, 0.011, 0.012, 0.013, 0.014];
    let frozen = [0.010, 0.011, 0.012, 0.012, 0.012];
    for mode in [CompoundingMode::Compounding, CompoundingMode::Averaging] {
        assert_abs_diff_eq!(
            realized_rate(&rates, 2, mode),
            realized_rate(&frozen, 0, mode),
            epsilon = 1e-15
        );
    }
}

#[test]
fn cutoff_equal_to_sub_period_count_is_rejected() {
    let index = daily_index();
    let err = OvernightIndexedCoupon::new(
        date(2024, 6, 8),
        1.0,
        date(2024, 6, 3),
        date(2024, 6, 8),
        index,
        compounding(5),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

proptest! {
    #[test]
    fn cutoff_remap_matches_manual_freeze(
        rates in prop::collection::vec(-0.01f64..0.1, 2..12),
        k in 0usize..11,
        averaging in any::<bool>(),
    ) {
        let k = k % rates.len();
        let n_max = rates.len() - k - 1;
        let mut frozen = rates.clone();
        for r in frozen.iter_mut().skip(n_max + 1) {
            *r = rates[n_max];
        }
        let mode = if averaging { CompoundingMode::Averaging } else { CompoundingMode::Compounding };
        let with_cutoff = realized_rate(&rates, k as u32, mode);
        let manual = realized_rate(&frozen, 0, mode);
        prop_assert!((with_cutoff - manual).abs() < 1e-13);
    }
}

// ── Forecast segment ────────────────────────────────────────────────────────

/// Daily curve from `start` with the given discount factors after it.
fn daily_curve(start: Date, discounts: &[DiscountFactor]) -> Handle<dyn YieldTermStructure> {
    let mut dates = vec![start];
    let mut dfs = vec![1.0];
    for (k, &d) in discounts.iter().enumerate() {
        dates.push(start + (k as i64 + 1));
        dfs.push(d);
    }
    Handle::from_arc(Arc::new(
        InterpolatedDiscountCurve::new(&dates, &dfs, Actual360).unwrap(),
    ))
}

fn telescoping_matches_daily_forwards(discounts: &[DiscountFactor]) {
    let start = date(2024, 6, 3);
    let end = start + discounts.len() as i64;
    let curve = daily_curve(start, discounts);
    let index = daily_index().with_forwarding(curve);
    let im = IndexManager::new();
    let ctx = EvaluationContext::new(start, &im);
    let dt: Real = 1.0 / 360.0;

    let mut all = vec![1.0];
    all.extend_from_slice(discounts);
    let forwards: Vec<Rate> = all.windows(2).map(|w| (w[0] / w[1] - 1.0) / dt).collect();
    let t = discounts.len() as Real * dt;

    // rates near zero make relative comparisons meaningless
    let compounded = forwards.iter().fold(1.0, |cf, f| cf * (1.0 + f * dt));
    let c = coupon(&index, start, end, compounding(0));
    assert_abs_diff_eq!(c.rate(&ctx).unwrap(), (compounded - 1.0) / t, epsilon = 1e-11);

    let summed: Real = forwards.iter().map(|f| f * dt).sum();
    let c = coupon(&index, start, end, averaging(ApproximationMode::None));
    assert_abs_diff_eq!(c.rate(&ctx).unwrap(), summed / t, epsilon = 1e-11);
}

#[test]
fn telescoping_equals_explicit_compounding() {
    telescoping_matches_daily_forwards(&[0.9999, 0.9997, 0.99965, 0.9994, 0.9991]);
}

proptest! {
    #[test]
    fn telescoping_equals_explicit_compounding_for_any_curve(
        steps in prop::collection::vec(0.99990f64..1.00002, 1..15),
    ) {
        let discounts: Vec<DiscountFactor> = steps
            .iter()
            .scan(1.0, |d, s| { *d *= s; Some(*d) })
            .collect();
        telescoping_matches_daily_forwards(&discounts);
    }
}

#[test]
fn telescopic_grid_gives_same_compounded_rate() {
    let today = date(2024, 1, 2);
    let curve: Handle<dyn YieldTermStructure> =
        Handle::from_arc(Arc::new(FlatForward::continuous(today, 0.045, Actual360)));
    let index = OvernightIndex::new("TEST", 0, "USD", WeekendsOnly, Actual360).with_forwarding(curve);
    let im = IndexManager::new();
    let ctx = EvaluationContext::new(today, &im);
    let (start, end) = (date(2024, 1, 2), date(2024, 7, 2));

    let daily = coupon(&index, start, end, compounding(0));
    let coarse = coupon(
        &index,
        start,
        end,
        OvernightCouponTerms {
            approximation: ApproximationMode::Telescopic,
            ..OvernightCouponTerms::default()
        },
    );
    assert!(coarse.sub_periods(today).unwrap().len() < daily.sub_periods(today).unwrap().len());
    assert_relative_eq!(
        daily.rate(&ctx).unwrap(),
        coarse.rate(&ctx).unwrap(),
        max_relative = 1e-12
    );
    // exp(r t) - 1 over t
    let t: Real = 182.0 / 360.0;
    assert_relative_eq!(
        daily.rate(&ctx).unwrap(),
        ((0.045 * t).exp() - 1.0) / t,
        max_relative = 1e-12
    );
}

#[test]
fn takada_error_shrinks_with_rate_level() {
    let today = date(2024, 1, 2);
    let (start, end) = (date(2024, 1, 2), date(2024, 4, 2));
    let im = IndexManager::new();
    let ctx = EvaluationContext::new(today, &im);

    let gap = |r: Rate| {
        let curve: Handle<dyn YieldTermStructure> =
            Handle::from_arc(Arc::new(FlatForward::continuous(today, r, Actual360)));
        let index = daily_index().with_forwarding(curve);
        let exact = coupon(&index, start, end, averaging(ApproximationMode::None))
            .rate(&ctx)
            .unwrap();
        let takada = coupon(&index, start, end, averaging(ApproximationMode::Takada))
            .rate(&ctx)
            .unwrap();
        // the log of the discount ratio is the continuous rate itself
        assert_abs_diff_eq!(takada, r, epsilon = 1e-12);
        (exact - takada).abs()
    };
    let high = gap(0.10);
    let low = gap(0.01);
    assert!(high > 0.0);
    assert!(low < high / 50.0);
    assert!(high < 1e-4);
}

#[test]
fn takada_with_cutoff_recovers_flat_rate() {
    let today = date(2024, 1, 2);
    let (start, end) = (date(2024, 1, 2), date(2024, 4, 2));
    let r = 0.045;
    let curve: Handle<dyn YieldTermStructure> =
        Handle::from_arc(Arc::new(FlatForward::continuous(today, r, Actual360)));
    let index = OvernightIndex::new("TEST", 0, "USD", WeekendsOnly, Actual360).with_forwarding(curve);
    let im = IndexManager::new();
    let ctx = EvaluationContext::new(today, &im);

    for rate_cutoff in [0, 1, 3] {
        let terms = OvernightCouponTerms {
            rate_cutoff,
            ..averaging(ApproximationMode::Takada)
        };
        let rate = coupon(&index, start, end, terms).rate(&ctx).unwrap();
        assert_abs_diff_eq!(rate, r, epsilon = 1e-12);
    }
}

#[test]
fn averaging_on_telescopic_grid_sums_coarse_forecasts() {
    let today = date(2024, 1, 2);
    let (start, end) = (date(2024, 1, 2), date(2024, 4, 2));
    let curve: Handle<dyn YieldTermStructure> =
        Handle::from_arc(Arc::new(FlatForward::continuous(today, 0.045, Actual360)));
    let index = OvernightIndex::new("TEST", 0, "USD", WeekendsOnly, Actual360).with_forwarding(curve);
    let im = IndexManager::new();
    let ctx = EvaluationContext::new(today, &im);

    let coarse = coupon(&index, start, end, averaging(ApproximationMode::Telescopic));
    let daily = coupon(&index, start, end, averaging(ApproximationMode::None));
    let sp = coarse.sub_periods(today).unwrap();
    assert!(sp.len() < daily.sub_periods(today).unwrap().len());

    // each surviving sub-period carries the overnight forecast of its
    // fixing date over its whole length
    let summed: Real = sp
        .fixing_dates
        .iter()
        .zip(&sp.dt)
        .map(|(&d, &dt)| index.forecast_fixing(d).unwrap() * dt)
        .sum();
    let rate = coarse.rate(&ctx).unwrap();
    assert_relative_eq!(rate, summed / coarse.accrual_period(), max_relative = 1e-12);
    assert_relative_eq!(rate, daily.rate(&ctx).unwrap(), max_relative = 5e-4);
}

// ── Border ──────────────────────────────────────────────────────────────────

#[test]
fn border_fixing_is_used_when_published() {
    let start = date(2024, 6, 3);
    let today = date(2024, 6, 5);
    let curve: Handle<dyn YieldTermStructure> =
        Handle::from_arc(Arc::new(FlatForward::continuous(today, 0.03, Actual360)));
    let index = daily_index().with_forwarding(curve);
    let c = coupon(&index, start, date(2024, 6, 8), compounding(0));
    let im = IndexManager::new();
    publish(&im, &index, start, &[0.02, 0.02, 0.02]);
    let ctx = EvaluationContext::new(today, &im);

    let dt: Real = 1.0 / 360.0;
    let realized = (1.0 + 0.02 * dt).powi(3);
    let forecast = (0.03 * 2.0 * dt).exp();
    assert_relative_eq!(
        c.rate(&ctx).unwrap(),
        (realized * forecast - 1.0) / (5.0 * dt),
        max_relative = 1e-12
    );
}

#[test]
fn border_falls_through_to_forecast() {
    let start = date(2024, 6, 3);
    let today = date(2024, 6, 5);
    let curve: Handle<dyn YieldTermStructure> =
        Handle::from_arc(Arc::new(FlatForward::continuous(today, 0.03, Actual360)));
    let index = daily_index().with_forwarding(curve);
    let end = date(2024, 6, 8);

    let im = IndexManager::new();
    publish(&im, &index, start, &[0.02, 0.02]);
    let failing = FailingOn {
        inner: IndexManager::new(),
        broken: today,
    };
    publish(&failing.inner, &index, start, &[0.02, 0.02]);

    for terms in [compounding(0), compounding(2), averaging(ApproximationMode::None)] {
        let c = coupon(&index, start, end, terms);
        let absent = c.rate(&EvaluationContext::new(today, &im)).unwrap();
        let broken = c.rate(&EvaluationContext::new(today, &failing)).unwrap();
        assert_eq!(absent, broken);
    }

    let dt: Real = 1.0 / 360.0;
    let c = coupon(&index, start, end, compounding(0));
    let expected = ((1.0 + 0.02 * dt).powi(2) * (0.03 * 3.0 * dt).exp() - 1.0) / (5.0 * dt);
    assert_relative_eq!(
        c.rate(&EvaluationContext::new(today, &im)).unwrap(),
        expected,
        max_relative = 1e-12
    );
}

#[test]
fn border_fixing_covers_whole_cutoff_span() {
    let start = date(2024, 6, 3);
    let end = date(2024, 6, 8);
    // the last independent fixing (5 June) is today's
    let today = date(2024, 6, 5);
    let index = daily_index();
    let c = coupon(&index, start, end, compounding(2));
    let im = IndexManager::new();
    publish(&im, &index, start, &[0.02, 0.021, 0.019]);
    // all fixings known: no curve needed
    let rate = c.rate(&EvaluationContext::new(today, &im)).unwrap();
    assert_abs_diff_eq!(
        rate,
        realized_rate(&[0.02, 0.021, 0.019, 0.019, 0.019], 0, CompoundingMode::Compounding),
        epsilon = 1e-15
    );
}

// ── Failures ────────────────────────────────────────────────────────────────

#[test]
fn zero_accrual_period_fails_at_finalization() {
    // 30/360 counts 30 Jan to 31 Jan as zero days
    let index = daily_index();
    let c = OvernightIndexedCoupon::new(
        date(2024, 1, 31),
        1.0,
        date(2024, 1, 30),
        date(2024, 1, 31),
        index.clone(),
        compounding(0),
    )
    .unwrap()
    .with_day_counter(Arc::new(Thirty360));
    let im = IndexManager::new();
    publish(&im, &index, date(2024, 1, 30), &[0.02]);
    let err = c
        .rate(&EvaluationContext::new(date(2024, 2, 5), &im))
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn zero_end_discount_is_numerical_error() {
    let start = date(2024, 6, 3);
    let end = date(2024, 6, 5);
    let curve = TableCurve::handle(start, vec![(start, 1.0), (end, 0.0)]);
    let index = daily_index().with_forwarding(curve);
    let c = coupon(&index, start, end, compounding(0));
    let im = IndexManager::new();
    let err = c.rate(&EvaluationContext::new(start, &im)).unwrap_err();
    assert!(matches!(err, Error::Numerical(_)));
}

#[test]
fn forecast_without_curve_is_configuration_error() {
    let index = daily_index();
    let c = coupon(&index, date(2024, 6, 3), date(2024, 6, 6), compounding(0));
    let im = IndexManager::new();
    let err = c
        .rate(&EvaluationContext::new(date(2024, 6, 3), &im))
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

// ── End to end ──────────────────────────────────────────────────────────────

#[test]
fn realized_then_forecast_with_cutoff() {
    // seven daily sub-periods, cutoff 2: sub-period 4 is the last one with
    // its own fixing and 5, 6 reuse it
    let start = date(2024, 6, 3);
    let end = date(2024, 6, 10);
    let today = date(2024, 6, 6);
    let start_df = 0.99850;
    let end_df = 0.99900;
    let fwd_df = 0.999945;
    let curve = TableCurve::handle(
        today,
        vec![
            (today, start_df),
            (date(2024, 6, 7), end_df),
            (date(2024, 6, 8), end_df * fwd_df),
        ],
    );
    let index = daily_index().with_forwarding(curve);
    let c = coupon(&index, start, end, compounding(2));
    let im = IndexManager::new();
    publish(&im, &index, start, &[0.020, 0.021, 0.019]);
    let rate = c.rate(&EvaluationContext::new(today, &im)).unwrap();

    let dt: Real = 1.0 / 360.0;
    let realized = (1.0 + 0.020 * dt) * (1.0 + 0.021 * dt) * (1.0 + 0.019 * dt);
    // three calendar days from 7 June to 10 June
    let adjusted_end = end_df * fwd_df.powi(3);
    let expected = (realized * start_df / adjusted_end - 1.0) / (7.0 * dt);
    assert_relative_eq!(rate, expected, max_relative = 1e-12);
}
