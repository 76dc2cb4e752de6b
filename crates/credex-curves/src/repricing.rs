//! Repricing validation for bootstrapped hazard curves.
//!
//! A bootstrapped curve must price every input CDS at par: recomputing the
//! premium and protection legs from the solved hazards and the same discount
//! curve must give a difference within tolerance. Every curve built through
//! [`CdsBootstrapper::bootstrap_validated`](crate::CdsBootstrapper::bootstrap_validated)
//! comes with a [`RepricingReport`] as its audit trail.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::credit_curve::HazardCurve;
use crate::curves::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::legs::LegValuator;
use crate::quotes::CdsQuote;
use crate::survival::BootstrapContext;

/// Default absolute tolerance on `|premium - protection|` per unit notional.
pub const DEFAULT_REPRICING_TOLERANCE: f64 = 1e-6;

/// Repricing result for a single CDS quote.
#[derive(Debug, Clone)]
pub struct RepricingCheck {
    /// Description of the quote (e.g., "CDS 5Y 72.59bp")
    pub instrument_id: String,

    /// The quote that was repriced
    pub quote: CdsQuote,

    /// Premium leg value from the curve
    pub premium_leg: f64,

    /// Protection leg value from the curve
    pub protection_leg: f64,

    /// Absolute error |premium_leg - protection_leg|
    pub error: f64,

    /// Tolerance for this quote
    pub tolerance: f64,

    /// Whether this quote passed validation
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a new repricing check result.
    #[must_use]
    pub fn new(quote: CdsQuote, premium_leg: f64, protection_leg: f64, tolerance: f64) -> Self {
        let error = (premium_leg - protection_leg).abs();

        Self {
            instrument_id: quote.to_string(),
            quote,
            premium_leg,
            protection_leg,
            error,
            tolerance,
            passed: error <= tolerance,
        }
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "✓" } else { "✗" };
        write!(
            f,
            "{} {} | Premium: {:.6e} | Protection: {:.6e} | Error: {:.2e} (tol: {:.2e})",
            status,
            self.instrument_id,
            self.premium_leg,
            self.protection_leg,
            self.error,
            self.tolerance
        )
    }
}

/// Complete repricing report for audit trail.
#[derive(Debug, Clone)]
pub struct RepricingReport {
    /// Individual quote checks
    checks: Vec<RepricingCheck>,

    /// Maximum absolute error across all quotes
    max_error: f64,

    /// Root mean square of all errors
    rms_error: f64,

    /// Number of quotes that passed
    passed_count: usize,
}

impl RepricingReport {
    /// Creates a new repricing report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        let max_error = checks.iter().map(|c| c.error).fold(0.0_f64, f64::max);

        let rms_error = if checks.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = checks.iter().map(|c| c.error * c.error).sum();
            (sum_sq / checks.len() as f64).sqrt()
        };

        let passed_count = checks.iter().filter(|c| c.passed).count();

        Self {
            checks,
            max_error,
            rms_error,
            passed_count,
        }
    }

    /// Creates an empty report.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns whether all quotes passed repricing validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.passed_count == self.checks.len()
    }

    /// Returns the individual repricing checks.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Returns the maximum absolute error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Returns the RMS error.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        self.rms_error
    }

    /// Returns the number of quotes that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.passed_count
    }

    /// Returns the number of quotes that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.checks.len() - self.passed_count
    }

    /// Returns the total number of quotes checked.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.checks.len()
    }

    /// Returns failed checks for error reporting.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    /// Returns failed quote IDs for error messages.
    #[must_use]
    pub fn failed_instruments(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.instrument_id.as_str())
            .collect()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repricing Report")?;
        writeln!(f, "================")?;
        writeln!(f, "Status: {}", if self.is_valid() { "PASSED" } else { "FAILED" })?;
        writeln!(f, "Quotes: {}/{} passed", self.passed_count, self.checks.len())?;
        writeln!(f, "Max Error: {:.2e}", self.max_error)?;
        writeln!(f, "RMS Error: {:.2e}", self.rms_error)?;

        if !self.checks.is_empty() {
            writeln!(f)?;
            writeln!(f, "Details:")?;
            for check in &self.checks {
                writeln!(f, "  {check}")?;
            }
        }

        Ok(())
    }
}

/// Result of curve bootstrap including repricing validation.
///
/// # Usage
///
/// ```rust,ignore
/// let result = bootstrapper.bootstrap_validated()?;
///
/// if result.is_valid() {
///     let q = result.curve.survival_probability(5.0)?;
/// } else {
///     for check in result.failed_checks() {
///         eprintln!("Failed: {}", check);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BootstrapResult<C> {
    /// The bootstrapped curve.
    pub curve: C,

    /// Repricing validation report.
    pub repricing_report: RepricingReport,

    /// Time taken to build the curve.
    pub build_duration: Duration,
}

impl<C> BootstrapResult<C> {
    /// Creates a new bootstrap result.
    #[must_use]
    pub fn new(curve: C, repricing_report: RepricingReport, build_duration: Duration) -> Self {
        Self {
            curve,
            repricing_report,
            build_duration,
        }
    }

    /// Returns whether every quote reprices within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.repricing_report.is_valid()
    }

    /// Returns the maximum repricing error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.repricing_report.max_error()
    }

    /// Returns the RMS repricing error.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        self.repricing_report.rms_error()
    }

    /// Returns failed checks.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&RepricingCheck> {
        self.repricing_report.failed_checks()
    }

    /// Returns failed quote IDs.
    #[must_use]
    pub fn failed_instruments(&self) -> Vec<&str> {
        self.repricing_report.failed_instruments()
    }

    /// Consumes the result and returns the curve if repricing passed.
    #[must_use]
    pub fn into_valid_curve(self) -> Option<C> {
        if self.is_valid() {
            Some(self.curve)
        } else {
            None
        }
    }

    /// Consumes the result and returns the curve without checking validity.
    #[must_use]
    pub fn into_curve_unchecked(self) -> C {
        self.curve
    }

    /// Returns a reference to the curve.
    #[must_use]
    pub fn curve(&self) -> &C {
        &self.curve
    }
}

impl<C: fmt::Debug> fmt::Display for BootstrapResult<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bootstrap Result")?;
        writeln!(f, "Build time: {:?}", self.build_duration)?;
        writeln!(f)?;
        write!(f, "{}", self.repricing_report)?;
        Ok(())
    }
}

/// Reprices `quotes` against `curve`, one check per tenor.
///
/// # Errors
///
/// Returns [`CurveError::LengthMismatch`] if the quote count differs from
/// the number of curve segments.
pub fn reprice_curve(
    curve: &HazardCurve,
    quotes: &[CdsQuote],
    discount_curve: &DiscountCurve,
    premium_frequency: u32,
    tolerance: f64,
) -> CurveResult<RepricingReport> {
    if quotes.len() != curve.len() {
        return Err(CurveError::length_mismatch(
            "repriced quotes vs curve segments",
            curve.len(),
            quotes.len(),
        ));
    }

    let mut context = BootstrapContext::new();
    let mut checks = Vec::with_capacity(quotes.len());

    for (quote, segment) in quotes.iter().zip(curve.segments()) {
        let valuator = LegValuator::new(
            discount_curve,
            &context,
            quote,
            premium_frequency,
            curve.recovery_rate(),
        );
        let legs = valuator.legs(segment.hazard_rate);
        let check =
            RepricingCheck::new(*quote, legs.premium(quote.spread), legs.protection, tolerance);

        if !check.passed {
            warn!(
                quote = %check.instrument_id,
                error = check.error,
                tolerance,
                "quote does not reprice within tolerance"
            );
        }

        checks.push(check);
        context = context.extended(*segment);
    }

    Ok(RepricingReport::new(checks))
}

/// Helper to time curve building operations.
pub struct BuildTimer {
    start: Instant,
}

impl BuildTimer {
    /// Starts a new timer.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Returns the elapsed duration.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
