//! CDS par spread quotes.
//!
//! A quote pairs a tenor in years with a running par spread expressed as a
//! decimal fraction of notional (`0.0100` = 100bp). Quote sets used for a
//! bootstrap must have strictly increasing tenors, one quote per tenor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CurveError, CurveResult};

/// Basis points per unit of spread.
pub const BPS_PER_UNIT: f64 = 10_000.0;

/// A CDS par spread quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsQuote {
    /// Maturity in years.
    pub tenor: f64,
    /// Par spread as a decimal fraction.
    pub spread: f64,
}

impl CdsQuote {
    /// Creates a quote, rejecting non-finite or non-positive inputs.
    pub fn new(tenor: f64, spread: f64) -> CurveResult<Self> {
        if !tenor.is_finite() || tenor <= 0.0 {
            return Err(CurveError::invalid_value(format!(
                "CDS tenor must be positive and finite, got {tenor}"
            )));
        }
        if !spread.is_finite() || spread <= 0.0 {
            return Err(CurveError::invalid_value(format!(
                "CDS spread must be positive and finite, got {spread}"
            )));
        }
        Ok(Self { tenor, spread })
    }

    /// Creates a quote from a spread in basis points.
    pub fn from_bps(tenor: f64, spread_bps: f64) -> CurveResult<Self> {
        Self::new(tenor, spread_bps / BPS_PER_UNIT)
    }

    /// Builds a quote set from parallel tenor and spread arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrays differ in length, are empty, contain
    /// an invalid quote, or if the tenors are not strictly increasing.
    pub fn from_arrays(tenors: &[f64], spreads: &[f64]) -> CurveResult<Vec<Self>> {
        if tenors.len() != spreads.len() {
            return Err(CurveError::length_mismatch(
                "CDS spreads vs CDS tenors",
                tenors.len(),
                spreads.len(),
            ));
        }
        if tenors.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }

        let quotes = tenors
            .iter()
            .zip(spreads)
            .map(|(&tenor, &spread)| Self::new(tenor, spread))
            .collect::<CurveResult<Vec<_>>>()?;

        if let Some(i) = (1..quotes.len()).find(|&i| quotes[i].tenor <= quotes[i - 1].tenor) {
            return Err(CurveError::non_monotonic_tenors(
                i,
                quotes[i - 1].tenor,
                quotes[i].tenor,
            ));
        }

        Ok(quotes)
    }

    /// Spread in basis points.
    #[must_use]
    pub fn spread_bps(&self) -> f64 {
        self.spread * BPS_PER_UNIT
    }

    /// Flat hazard rate implied by the credit triangle, `s / (1 - R)`.
    #[must_use]
    pub fn flat_hazard_estimate(&self, recovery_rate: f64) -> f64 {
        self.spread / (1.0 - recovery_rate)
    }
}

impl fmt::Display for CdsQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CDS {}Y {:.2}bp", self.tenor, self.spread_bps())
    }
}
