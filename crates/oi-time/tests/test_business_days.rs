//! Business-day arithmetic on the holiday-free calendars.
//!
//! Overnight coupons lay out one sub-period per business day, so these
//! properties underpin the daily value-date grid.

use oi_time::{BusinessDayConvention, Calendar, Date, Period, WeekendsOnly};
use proptest::prelude::*;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

#[test]
fn five_business_days_span_a_week() {
    let cal = WeekendsOnly;
    let mut d = date(2024, 3, 4);
    for _ in 0..52 {
        let next = cal.advance_business_days(d, 5).unwrap();
        assert_eq!(d.days_between(next), 7, "from {d}");
        d = next;
    }
}

#[test]
fn preceding_then_following_is_stable_on_business_days() {
    let cal = WeekendsOnly;
    let mut d = date(2024, 1, 1);
    while d < date(2024, 3, 1) {
        let p = cal.adjust(d, BusinessDayConvention::Preceding).unwrap();
        assert!(cal.is_business_day(p));
        assert!(p <= d);
        assert_eq!(cal.adjust(p, BusinessDayConvention::Following).unwrap(), p);
        d += 1;
    }
}

#[test]
fn month_advance_on_weekend_rolls() {
    let cal = WeekendsOnly;
    // 31 Jan 2024 + 1M = 29 Feb 2024 (Thursday)
    let d = cal
        .advance(
            date(2024, 1, 31),
            Period::months(1),
            BusinessDayConvention::ModifiedFollowing,
            false,
        )
        .unwrap();
    assert_eq!(d, date(2024, 2, 29));
}

proptest! {
    #[test]
    fn advance_and_count_agree(offset in 0i64..2000, n in 1i32..40) {
        let cal = WeekendsOnly;
        let start = cal
            .adjust(date(2020, 1, 1) + offset, BusinessDayConvention::Following)
            .unwrap();
        let end = cal.advance_business_days(start, n).unwrap();
        prop_assert!(cal.is_business_day(end));
        prop_assert_eq!(cal.business_days_between(start, end).unwrap(), i64::from(n));
        prop_assert_eq!(cal.advance_business_days(end, -n).unwrap(), start);
    }
}
