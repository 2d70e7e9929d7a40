//! Compounding conventions.

use crate::{Real, Time};

/// How interest is compounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compounding {
    /// Simple interest: `1 + r·t`
    Simple,
    /// Compounded interest: `(1 + r/f)^(f·t)`
    Compounded,
    /// Continuously compounded: `e^(r·t)`
    Continuous,
}

impl Compounding {
    /// Growth factor of one unit over `t` years at rate `r`.
    ///
    /// `periods_per_year` is only read for [`Compounding::Compounded`].
    pub fn compound_factor(self, r: Real, t: Time, periods_per_year: Real) -> Real {
        match self {
            Compounding::Simple => 1.0 + r * t,
            Compounding::Compounded => (1.0 + r / periods_per_year).powf(periods_per_year * t),
            Compounding::Continuous => (r * t).exp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn factors_agree_at_zero_time() {
        for c in [Compounding::Simple, Compounding::Compounded, Compounding::Continuous] {
            assert_abs_diff_eq!(c.compound_factor(0.05, 0.0, 1.0), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn annual_compounding_one_year() {
        let f = Compounding::Compounded.compound_factor(0.05, 1.0, 1.0);
        assert_abs_diff_eq!(f, 1.05, epsilon = 1e-15);
        let s = Compounding::Simple.compound_factor(0.05, 0.5, 1.0);
        assert_abs_diff_eq!(s, 1.025, epsilon = 1e-15);
    }
}
