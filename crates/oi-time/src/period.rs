//! `Period`: a signed span of [`TimeUnit`]s such as `3M` or `-2D`.

use crate::frequency::Frequency;
use crate::time_unit::TimeUnit;
use oi_core::errors::{Error, Result};

/// A time span made up of an integer length and a [`TimeUnit`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    /// Number of units.
    pub length: i32,
    /// The unit of time.
    pub unit: TimeUnit,
}

impl Period {
    /// Create a new period.
    pub const fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// `n` days.
    pub const fn days(n: i32) -> Self {
        Self::new(n, TimeUnit::Days)
    }

    /// `n` weeks.
    pub const fn weeks(n: i32) -> Self {
        Self::new(n, TimeUnit::Weeks)
    }

    /// `n` months.
    pub const fn months(n: i32) -> Self {
        Self::new(n, TimeUnit::Months)
    }

    /// `n` years.
    pub const fn years(n: i32) -> Self {
        Self::new(n, TimeUnit::Years)
    }

    /// The tenor between two payments at the given frequency.
    ///
    /// # Errors
    /// [`Frequency::NoFrequency`] has no tenor.
    pub fn from_frequency(freq: Frequency) -> Result<Self> {
        Ok(match freq {
            Frequency::NoFrequency => {
                return Err(Error::InvalidArgument(format!(
                    "cannot convert {freq} to a period"
                )))
            }
            Frequency::Once => Period::years(0),
            Frequency::Annual => Period::years(1),
            Frequency::Semiannual => Period::months(6),
            Frequency::EveryFourthMonth => Period::months(4),
            Frequency::Quarterly => Period::months(3),
            Frequency::Bimonthly => Period::months(2),
            Frequency::Monthly => Period::months(1),
            Frequency::EveryFourthWeek => Period::weeks(4),
            Frequency::Biweekly => Period::weeks(2),
            Frequency::Weekly => Period::weeks(1),
            Frequency::Daily => Period::days(1),
            Frequency::Every26Weeks | Frequency::Every26Weeks360 | Frequency::Every26Weeks365 => {
                Period::weeks(26)
            }
        })
    }
}

impl std::ops::Neg for Period {
    type Output = Self;
    fn neg(self) -> Self {
        Period::new(-self.length, self.unit)
    }
}

impl std::ops::Mul<i32> for Period {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Period::new(self.length * rhs, self.unit)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.length, self.unit)
    }
}

impl std::fmt::Debug for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Period({self})")
    }
}
