//! Input validation and post-solve domain checks.
//!
//! Everything here runs before the first tenor is solved, except
//! [`check_hazard_rate`], which guards each accepted solution.

use crate::bootstrap::BootstrapConfig;
use crate::error::{CurveError, CurveResult};
use crate::quotes::CdsQuote;

/// Largest scale a `rust_decimal::Decimal` can hold.
pub const MAX_ROUNDING_DECIMALS: u32 = 28;

/// Validates a quote set for bootstrapping.
///
/// # Errors
///
/// Returns an error if the set is empty, a quote has a non-finite or
/// non-positive tenor or spread, or the tenors are not strictly increasing.
pub fn validate_quotes(quotes: &[CdsQuote]) -> CurveResult<()> {
    if quotes.is_empty() {
        return Err(CurveError::insufficient_points(1, 0));
    }

    for quote in quotes {
        CdsQuote::new(quote.tenor, quote.spread)?;
    }

    if let Some(i) = (1..quotes.len()).find(|&i| quotes[i].tenor <= quotes[i - 1].tenor) {
        return Err(CurveError::non_monotonic_tenors(
            i,
            quotes[i - 1].tenor,
            quotes[i].tenor,
        ));
    }

    Ok(())
}

/// Validates bootstrap parameters.
///
/// # Errors
///
/// Returns [`CurveError::InvalidValue`] for a zero premium frequency, a
/// recovery rate outside `[0, 1)`, a non-positive solver tolerance or
/// iteration cap, a negative repricing tolerance, or more rounding
/// decimals than the decimal type can carry.
pub fn validate_config(config: &BootstrapConfig) -> CurveResult<()> {
    if config.premium_frequency == 0 {
        return Err(CurveError::invalid_value(
            "premium frequency must be at least one payment per year",
        ));
    }
    if !(0.0..1.0).contains(&config.recovery_rate) {
        return Err(CurveError::invalid_value(format!(
            "recovery rate must lie in [0, 1), got {}",
            config.recovery_rate
        )));
    }
    if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
        return Err(CurveError::invalid_value(format!(
            "solver tolerance must be positive, got {}",
            config.tolerance
        )));
    }
    if config.max_iterations == 0 {
        return Err(CurveError::invalid_value(
            "solver needs at least one iteration",
        ));
    }
    if let Some(dp) = config.rounding_decimals {
        if dp > MAX_ROUNDING_DECIMALS {
            return Err(CurveError::invalid_value(format!(
                "cannot round to {dp} decimals, maximum is {}",
                MAX_ROUNDING_DECIMALS
            )));
        }
    }
    if config.repricing_tolerance.is_nan() || config.repricing_tolerance < 0.0 {
        return Err(CurveError::invalid_value(format!(
            "repricing tolerance must be non-negative, got {}",
            config.repricing_tolerance
        )));
    }

    Ok(())
}

/// Validates parallel discount tenor/rate arrays.
///
/// # Errors
///
/// Returns [`CurveError::LengthMismatch`] when the lengths differ.
pub fn validate_discount_arrays(tenors: &[f64], rates: &[f64]) -> CurveResult<()> {
    if tenors.len() != rates.len() {
        return Err(CurveError::length_mismatch(
            "discount rates vs discount tenors",
            tenors.len(),
            rates.len(),
        ));
    }
    Ok(())
}

/// Rejects a solved hazard rate that is negative or non-finite.
///
/// # Errors
///
/// Returns [`CurveError::DomainViolation`] carrying the tenor.
pub fn check_hazard_rate(tenor_index: usize, tenor: f64, hazard_rate: f64) -> CurveResult<()> {
    if !hazard_rate.is_finite() || hazard_rate < 0.0 {
        return Err(CurveError::domain_violation(tenor_index, tenor, hazard_rate));
    }
    Ok(())
}
