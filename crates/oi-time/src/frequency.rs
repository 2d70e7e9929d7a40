//! `Frequency`: how often coupons are paid.

use oi_core::Real;

/// Payment frequency.
///
/// Besides the usual calendar frequencies this includes the 26-week
/// variants used by some overnight swap markets, whose per-year count
/// depends on the day-count basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    /// No recurring events.
    NoFrequency,
    /// A single payment at maturity.
    Once,
    /// Once a year.
    Annual,
    /// Twice a year.
    Semiannual,
    /// Every four months.
    EveryFourthMonth,
    /// Four times a year.
    Quarterly,
    /// Six times a year.
    Bimonthly,
    /// Twelve times a year.
    Monthly,
    /// Every four weeks.
    EveryFourthWeek,
    /// Every two weeks.
    Biweekly,
    /// Every week.
    Weekly,
    /// Every day.
    Daily,
    /// Every 26 weeks, counted as two per year.
    Every26Weeks,
    /// Every 26 weeks on a 360-day basis (360/182 per year).
    Every26Weeks360,
    /// Every 26 weeks on a 365-day basis (365/182 per year).
    Every26Weeks365,
}

impl Frequency {
    /// Number of periods per year, or `None` for [`Frequency::NoFrequency`].
    ///
    /// The 26-week variants on a 360/365 basis return fractional values.
    pub fn periods_per_year(&self) -> Option<Real> {
        let n = match self {
            Frequency::NoFrequency => return None,
            Frequency::Once => 0.0,
            Frequency::Annual => 1.0,
            Frequency::Semiannual | Frequency::Every26Weeks => 2.0,
            Frequency::EveryFourthMonth => 3.0,
            Frequency::Quarterly => 4.0,
            Frequency::Bimonthly => 6.0,
            Frequency::Monthly => 12.0,
            Frequency::EveryFourthWeek => 13.0,
            Frequency::Biweekly => 26.0,
            Frequency::Weekly => 52.0,
            Frequency::Daily => 365.0,
            Frequency::Every26Weeks360 => 360.0 / 182.0,
            Frequency::Every26Weeks365 => 365.0 / 182.0,
        };
        Some(n)
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Frequency::NoFrequency => "No-Frequency",
            Frequency::Once => "Once",
            Frequency::Annual => "Annual",
            Frequency::Semiannual => "Semiannual",
            Frequency::EveryFourthMonth => "Every-Fourth-Month",
            Frequency::Quarterly => "Quarterly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Monthly => "Monthly",
            Frequency::EveryFourthWeek => "Every-fourth-week",
            Frequency::Biweekly => "Biweekly",
            Frequency::Weekly => "Weekly",
            Frequency::Daily => "Daily",
            Frequency::Every26Weeks => "Every-26-weeks",
            Frequency::Every26Weeks360 => "Every-26-weeks-360",
            Frequency::Every26Weeks365 => "Every-26-weeks-365",
        };
        write!(f, "{s}")
    }
}
