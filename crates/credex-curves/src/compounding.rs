//! Compounding conventions for turning zero rates into discount factors.
//!
//! The discount curve is supplied as zero rates; the convention under which
//! the producer quoted them is part of the curve, not of the bootstrap.
//! `Continuous` (`df = exp(-r·t)`) is the default.
//!
//! # Example
//!
//! ```rust
//! use credex_curves::Compounding;
//!
//! let rate = 0.05; // 5% rate
//! let t = 2.0;     // 2 years
//!
//! let df_continuous = Compounding::Continuous.discount_factor(rate, t);
//! let df_annual = Compounding::Annual.discount_factor(rate, t);
//!
//! // Continuous compounding gives slightly lower DF
//! assert!(df_continuous < df_annual);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interest compounding convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Compounding {
    /// Simple interest (no compounding)
    Simple,
    /// Annual compounding (1x per year)
    Annual,
    /// Semi-annual compounding (2x per year)
    SemiAnnual,
    /// Quarterly compounding (4x per year)
    Quarterly,
    /// Monthly compounding (12x per year)
    Monthly,
    /// Continuous compounding
    #[default]
    Continuous,
}

impl Compounding {
    /// Returns the number of compounding periods per year.
    ///
    /// Returns 0 for Simple and Continuous.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Compounding::Simple | Compounding::Continuous => 0,
            Compounding::Annual => 1,
            Compounding::SemiAnnual => 2,
            Compounding::Quarterly => 4,
            Compounding::Monthly => 12,
        }
    }

    /// Returns true if this is continuous compounding.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Compounding::Continuous)
    }

    /// Discount factor for a zero `rate` over `t` years.
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Continuous => (-rate * t).exp(),
            Compounding::Simple => 1.0 / (1.0 + rate * t),
            _ => {
                let n = f64::from(self.periods_per_year());
                (1.0 + rate / n).powf(-n * t)
            }
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compounding::Simple => "Simple",
            Compounding::Annual => "Annual",
            Compounding::SemiAnnual => "Semi-Annual",
            Compounding::Quarterly => "Quarterly",
            Compounding::Monthly => "Monthly",
            Compounding::Continuous => "Continuous",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_continuous() {
        assert!(Compounding::default().is_continuous());
    }

    #[test]
    fn test_discount_factor_continuous() {
        let df = Compounding::Continuous.discount_factor(0.05, 1.0);
        // DF = e^(-0.05) ≈ 0.9512
        assert_relative_eq!(df, (-0.05_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_discount_factor_semi_annual() {
        let df = Compounding::SemiAnnual.discount_factor(0.05, 1.0);
        // DF = (1 + 0.025)^(-2) ≈ 0.9518
        assert_relative_eq!(df, 1.025_f64.powf(-2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_discount_factor_simple() {
        let df = Compounding::Simple.discount_factor(0.04, 0.5);
        assert_relative_eq!(df, 1.0 / 1.02, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_time_is_par() {
        for c in [
            Compounding::Simple,
            Compounding::Annual,
            Compounding::Quarterly,
            Compounding::Continuous,
        ] {
            assert_relative_eq!(c.discount_factor(0.07, 0.0), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Compounding::Quarterly).unwrap();
        let back: Compounding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Compounding::Quarterly);
    }
}
