//! Sequential hazard-rate bootstrap.
//!
//! Solves one hazard rate per CDS tenor, in tenor order. Each solve prices
//! its quote on top of the segments already finalized, so tenor `i` cannot
//! start before tenor `i - 1` is accepted.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::credit_curve::HazardCurve;
use crate::curves::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::legs::LegValuator;
use crate::quotes::CdsQuote;
use crate::repricing::{
    reprice_curve, BootstrapResult, BuildTimer, DEFAULT_REPRICING_TOLERANCE,
};
use crate::solver::{HazardSolver, HazardSolverMethod};
use crate::survival::{BootstrapContext, HazardSegment};
use crate::validation;

/// Configuration for the CDS bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Premium payments per year.
    pub premium_frequency: u32,
    /// Recovery rate as a decimal fraction.
    pub recovery_rate: f64,
    /// Per-tenor solver.
    pub solver: HazardSolverMethod,
    /// Solver convergence tolerance.
    pub tolerance: f64,
    /// Solver iteration cap.
    pub max_iterations: u32,
    /// Decimal places each solved hazard is rounded to; `None` keeps full precision.
    pub rounding_decimals: Option<u32>,
    /// Absolute tolerance for repricing checks.
    pub repricing_tolerance: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            premium_frequency: 4,
            recovery_rate: 0.4,
            solver: HazardSolverMethod::Brent,
            tolerance: 1e-10,
            max_iterations: 100,
            rounding_decimals: Some(8),
            repricing_tolerance: DEFAULT_REPRICING_TOLERANCE,
        }
    }
}

impl BootstrapConfig {
    /// Sets the premium frequency.
    #[must_use]
    pub fn with_premium_frequency(mut self, premium_frequency: u32) -> Self {
        self.premium_frequency = premium_frequency;
        self
    }

    /// Sets the recovery rate.
    #[must_use]
    pub fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.recovery_rate = recovery_rate;
        self
    }

    /// Sets the solver method.
    #[must_use]
    pub fn with_solver(mut self, solver: HazardSolverMethod) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the solver iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the hazard rounding precision.
    #[must_use]
    pub fn with_rounding_decimals(mut self, rounding_decimals: Option<u32>) -> Self {
        self.rounding_decimals = rounding_decimals;
        self
    }

    /// Sets the repricing tolerance.
    #[must_use]
    pub fn with_repricing_tolerance(mut self, repricing_tolerance: f64) -> Self {
        self.repricing_tolerance = repricing_tolerance;
        self
    }

    /// Builds the per-tenor solver described by this configuration.
    #[must_use]
    pub fn hazard_solver(&self) -> HazardSolver {
        HazardSolver::new(
            self.solver,
            self.tolerance,
            self.max_iterations,
            self.rounding_decimals,
        )
    }
}

/// Sequential bootstrapper for piecewise-constant hazard curves.
///
/// The sequential bootstrap algorithm:
/// 1. Validate quotes and parameters
/// 2. Start from an empty context, `S(0) = 1`
/// 3. For each tenor, solve the hazard rate that prices its quote at par
/// 4. Finalize the segment and extend the context
///
/// # Example
///
/// ```rust
/// use credex_curves::{CdsBootstrapper, CdsQuote, DiscountCurve};
///
/// let curve = CdsBootstrapper::new(DiscountCurve::flat(0.02))
///     .add_quote(CdsQuote::from_bps(1.0, 60.0).unwrap())
///     .add_quote(CdsQuote::from_bps(3.0, 80.0).unwrap())
///     .with_recovery_rate(0.4)
///     .bootstrap()
///     .unwrap();
///
/// assert_eq!(curve.len(), 2);
/// assert!(curve.survival_probabilities()[1] < curve.survival_probabilities()[0]);
/// ```
#[derive(Debug, Clone)]
pub struct CdsBootstrapper {
    /// Risk-free discount curve.
    discount_curve: DiscountCurve,
    /// Quotes to bootstrap, in tenor order.
    quotes: Vec<CdsQuote>,
    /// Bootstrap configuration.
    config: BootstrapConfig,
}

impl CdsBootstrapper {
    /// Creates a new bootstrapper discounting on `discount_curve`.
    #[must_use]
    pub fn new(discount_curve: DiscountCurve) -> Self {
        Self {
            discount_curve,
            quotes: Vec::new(),
            config: BootstrapConfig::default(),
        }
    }

    /// Sets the bootstrap configuration.
    #[must_use]
    pub fn with_config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the premium frequency.
    #[must_use]
    pub fn with_premium_frequency(mut self, premium_frequency: u32) -> Self {
        self.config.premium_frequency = premium_frequency;
        self
    }

    /// Sets the recovery rate.
    #[must_use]
    pub fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.config.recovery_rate = recovery_rate;
        self
    }

    /// Sets the solver method.
    #[must_use]
    pub fn with_solver(mut self, solver: HazardSolverMethod) -> Self {
        self.config.solver = solver;
        self
    }

    /// Adds a quote to the bootstrap set.
    #[must_use]
    pub fn add_quote(mut self, quote: CdsQuote) -> Self {
        self.quotes.push(quote);
        self
    }

    /// Adds multiple quotes to the bootstrap set.
    #[must_use]
    pub fn add_quotes(mut self, quotes: impl IntoIterator<Item = CdsQuote>) -> Self {
        self.quotes.extend(quotes);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Returns the quotes.
    #[must_use]
    pub fn quotes(&self) -> &[CdsQuote] {
        &self.quotes
    }

    /// Returns the discount curve.
    #[must_use]
    pub fn discount_curve(&self) -> &DiscountCurve {
        &self.discount_curve
    }

    /// Bootstraps the hazard curve from the added quotes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No quotes are provided, or a quote or parameter is invalid
    /// - The solver fails to converge for any tenor
    /// - A solved hazard rate is negative
    pub fn bootstrap(&self) -> CurveResult<HazardCurve> {
        validation::validate_config(&self.config)?;
        validation::validate_quotes(&self.quotes)?;

        let solver = self.config.hazard_solver();
        let mut context = BootstrapContext::new();

        for (index, quote) in self.quotes.iter().enumerate() {
            let valuator = LegValuator::new(
                &self.discount_curve,
                &context,
                quote,
                self.config.premium_frequency,
                self.config.recovery_rate,
            );
            let solution = solver.solve(&valuator, index)?;
            validation::check_hazard_rate(index, quote.tenor, solution.hazard_rate)?;

            debug!(
                tenor_index = index,
                tenor = quote.tenor,
                hazard_rate = solution.hazard_rate,
                iterations = solution.iterations,
                objective = solution.objective,
                "solved hazard segment"
            );

            let segment = HazardSegment::new(context.last_tenor(), quote.tenor, solution.hazard_rate);
            context = context.extended(segment);
        }

        info!(
            tenors = self.quotes.len(),
            solver = %solver.method(),
            survival = context.survival(),
            "hazard curve bootstrap complete"
        );

        HazardCurve::new(context.segments().to_vec(), self.config.recovery_rate)
    }

    /// Bootstraps the curve and reprices every quote against it.
    ///
    /// This method does NOT fail if repricing validation fails. Check
    /// `result.is_valid()`, or use [`Self::bootstrap_validated_strict`].
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::bootstrap`].
    pub fn bootstrap_validated(&self) -> CurveResult<BootstrapResult<HazardCurve>> {
        let timer = BuildTimer::start();

        let curve = self.bootstrap()?;
        let repricing_report = reprice_curve(
            &curve,
            &self.quotes,
            &self.discount_curve,
            self.config.premium_frequency,
            self.config.repricing_tolerance,
        )?;

        Ok(BootstrapResult::new(curve, repricing_report, timer.elapsed()))
    }

    /// Bootstraps with repricing validation, failing if any quote misprices.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::RepricingFailed`] if any quote exceeds the
    /// repricing tolerance.
    pub fn bootstrap_validated_strict(&self) -> CurveResult<BootstrapResult<HazardCurve>> {
        let result = self.bootstrap_validated()?;

        if !result.is_valid() {
            return Err(CurveError::repricing_failed(
                result.repricing_report.failed_count(),
                result.repricing_report.max_error(),
                result.failed_instruments().into_iter().map(String::from).collect(),
            ));
        }

        Ok(result)
    }
}

/// Bootstraps hazard rates and survival probabilities from raw arrays.
///
/// Returns `(hazard_rates, survival_probabilities)`, both aligned to
/// `cds_tenors`; the survival array excludes `S(0) = 1`. Defaults other
/// than frequency and recovery come from [`BootstrapConfig::default`].
///
/// # Errors
///
/// Returns a validation error before any solve if either pair of arrays
/// differs in length, plus any error from [`CdsBootstrapper::bootstrap`].
pub fn bootstrap_hazard_curve(
    cds_tenors: &[f64],
    cds_spreads: &[f64],
    discount_tenors: &[f64],
    discount_rates: &[f64],
    premium_frequency: u32,
    recovery_rate: f64,
) -> CurveResult<(Vec<f64>, Vec<f64>)> {
    validation::validate_discount_arrays(discount_tenors, discount_rates)?;
    let quotes = CdsQuote::from_arrays(cds_tenors, cds_spreads)?;
    let discount_curve = DiscountCurve::new(discount_tenors.to_vec(), discount_rates.to_vec())?;

    let curve = CdsBootstrapper::new(discount_curve)
        .add_quotes(quotes)
        .with_premium_frequency(premium_frequency)
        .with_recovery_rate(recovery_rate)
        .bootstrap()?;

    Ok((curve.hazard_rates(), curve.survival_probabilities().to_vec()))
}
