//! Per-tenor hazard rate solver.
//!
//! For sane inputs the signed pricing error `premium - protection` falls
//! monotonically as the candidate hazard rises, so the default method
//! brackets the root from zero and runs Brent; `Bisection` halves the same
//! bracket. The `Minimize` method instead minimises the absolute error from
//! the credit-triangle seed `spread / (1 - recovery)`.
//!
//! A failed solve reports the pricing error where the search stopped.

use credex_math::optimization::{bracket_minimum, golden_section, OptimizationConfig};
use credex_math::solvers::{bisection, brent, expand_bracket, hybrid_numerical, SolverConfig};
use credex_math::MathError;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::legs::LegValuator;

/// Doublings allowed while searching for a sign change.
const MAX_BRACKET_EXPANSIONS: u32 = 60;

/// Smallest initial bracket width.
const MIN_BRACKET_WIDTH: f64 = 1e-4;

/// Root-finding strategy for a single tenor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HazardSolverMethod {
    /// Brent on a bracket grown from zero.
    #[default]
    Brent,
    /// Newton with a numerical derivative, Brent fallback on the bracket.
    Hybrid,
    /// Interval halving on the same bracket as `Brent`.
    Bisection,
    /// Golden-section minimisation of the absolute pricing error.
    Minimize,
}

impl std::fmt::Display for HazardSolverMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Brent => write!(f, "Brent"),
            Self::Hybrid => write!(f, "Hybrid"),
            Self::Bisection => write!(f, "Bisection"),
            Self::Minimize => write!(f, "Minimize"),
        }
    }
}

/// An accepted hazard rate for one tenor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardSolution {
    /// Hazard rate on the open segment, after rounding.
    pub hazard_rate: f64,
    /// Absolute pricing error at `hazard_rate`.
    pub objective: f64,
    /// Solver iterations used.
    pub iterations: u32,
}

/// Solves for the hazard rate that prices one CDS quote at par.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardSolver {
    method: HazardSolverMethod,
    tolerance: f64,
    max_iterations: u32,
    rounding_decimals: Option<u32>,
}

impl Default for HazardSolver {
    fn default() -> Self {
        Self {
            method: HazardSolverMethod::default(),
            tolerance: 1e-10,
            max_iterations: 100,
            rounding_decimals: Some(8),
        }
    }
}

impl HazardSolver {
    /// Creates a solver.
    #[must_use]
    pub fn new(
        method: HazardSolverMethod,
        tolerance: f64,
        max_iterations: u32,
        rounding_decimals: Option<u32>,
    ) -> Self {
        Self {
            method,
            tolerance,
            max_iterations,
            rounding_decimals,
        }
    }

    /// Returns the method.
    #[must_use]
    pub fn method(&self) -> HazardSolverMethod {
        self.method
    }

    /// Solves the open segment of `valuator`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::OptimizationFailure`] if no root is bracketed
    /// or the chosen method does not converge.
    pub fn solve(
        &self,
        valuator: &LegValuator<'_>,
        tenor_index: usize,
    ) -> CurveResult<HazardSolution> {
        let seed = valuator.quote().flat_hazard_estimate(valuator.recovery_rate());
        let fail = |err: MathError| {
            let objective = last_objective(&err).unwrap_or_else(|| valuator.objective(seed));
            CurveError::optimization_failure(
                tenor_index,
                valuator.quote().tenor,
                objective,
                err.to_string(),
            )
        };

        let (raw, iterations) = match self.method {
            HazardSolverMethod::Brent => {
                let config = SolverConfig::new(self.tolerance, self.max_iterations);
                let (a, b) = bracket_root(valuator, seed).map_err(fail)?;
                let result = brent(|h| valuator.residual(h), a, b, &config).map_err(fail)?;
                (result.root, result.iterations)
            }
            HazardSolverMethod::Hybrid => {
                let config = SolverConfig::new(self.tolerance, self.max_iterations);
                let bounds = bracket_root(valuator, seed).map_err(fail)?;
                let guess = seed.clamp(bounds.0, bounds.1);
                let result =
                    hybrid_numerical(|h| valuator.residual(h), guess, Some(bounds), &config)
                        .map_err(fail)?;
                (result.root, result.iterations)
            }
            HazardSolverMethod::Bisection => {
                let config = SolverConfig::new(self.tolerance, self.max_iterations);
                let (a, b) = bracket_root(valuator, seed).map_err(fail)?;
                let result = bisection(|h| valuator.residual(h), a, b, &config).map_err(fail)?;
                (result.root, result.iterations)
            }
            HazardSolverMethod::Minimize => self.minimize(valuator, seed).map_err(fail)?,
        };

        let hazard_rate = self.round(raw);

        Ok(HazardSolution {
            hazard_rate,
            objective: valuator.objective(hazard_rate),
            iterations,
        })
    }

    fn minimize(&self, valuator: &LegValuator<'_>, seed: f64) -> Result<(f64, u32), MathError> {
        let config = OptimizationConfig {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            ..OptimizationConfig::default()
        };
        let objective = |h: f64| valuator.objective(h);
        let step = config.step_size * seed.abs().max(MIN_BRACKET_WIDTH);

        let (a, _, c) = bracket_minimum(objective, seed, step, MAX_BRACKET_EXPANSIONS)?;
        let result = golden_section(objective, a, c, &config);

        if !result.converged {
            return Err(MathError::convergence_failed(result.iterations, result.value));
        }
        Ok((result.x, result.iterations))
    }

    fn round(&self, hazard_rate: f64) -> f64 {
        match self.rounding_decimals {
            Some(dp) => Decimal::from_f64(hazard_rate)
                .and_then(|d| d.round_dp(dp).to_f64())
                .unwrap_or(hazard_rate),
            None => hazard_rate,
        }
    }
}

/// Pricing error at the point where a failed search stopped, if the error
/// records one.
fn last_objective(err: &MathError) -> Option<f64> {
    match err {
        MathError::ConvergenceFailed { residual, .. } => Some(residual.abs()),
        MathError::InvalidBracket { fb, .. } => Some(fb.abs()),
        _ => None,
    }
}

/// Brackets the sign change of the residual.
///
/// The residual at zero hazard fixes the direction: positive means the root
/// lies above zero, negative means it lies below.
fn bracket_root(valuator: &LegValuator<'_>, seed: f64) -> Result<(f64, f64), MathError> {
    let width = (2.0 * seed.abs()).max(MIN_BRACKET_WIDTH);

    if valuator.residual(0.0) >= 0.0 {
        expand_bracket(|h| valuator.residual(h), 0.0, width, MAX_BRACKET_EXPANSIONS)
    } else {
        let (lo, hi) =
            expand_bracket(|x| valuator.residual(-x), 0.0, width, MAX_BRACKET_EXPANSIONS)?;
        Ok((-hi, -lo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::DiscountCurve;
    use crate::quotes::CdsQuote;
    use crate::survival::{BootstrapContext, HazardSegment};
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn single_tenor_valuator(curve: &DiscountCurve) -> LegValuator<'_> {
        let quote = CdsQuote::new(1.0, 0.01).unwrap();
        LegValuator::new(curve, &BootstrapContext::new(), &quote, 4, 0.4)
    }

    #[test]
    fn test_brent_single_tenor() {
        let curve = DiscountCurve::flat(0.02);
        let valuator = single_tenor_valuator(&curve);

        let solution = HazardSolver::default().solve(&valuator, 0).unwrap();

        assert_relative_eq!(solution.hazard_rate, 0.01667, epsilon = 1e-4);
        assert!(solution.objective < 1e-8);
    }

    #[test]
    fn test_methods_agree() {
        let curve = DiscountCurve::flat(0.02);
        let valuator = single_tenor_valuator(&curve);

        let solve = |method| {
            HazardSolver::new(method, 1e-10, 100, Some(8))
                .solve(&valuator, 0)
                .unwrap()
                .hazard_rate
        };

        let brent = solve(HazardSolverMethod::Brent);
        assert_relative_eq!(solve(HazardSolverMethod::Hybrid), brent, epsilon = 2e-8);
        assert_relative_eq!(solve(HazardSolverMethod::Minimize), brent, epsilon = 2e-8);
        assert_relative_eq!(solve(HazardSolverMethod::Bisection), brent, epsilon = 2e-8);
    }

    #[test]
    fn test_rounding_to_eight_decimals() {
        let curve = DiscountCurve::flat(0.02);
        let valuator = single_tenor_valuator(&curve);

        let rounded = HazardSolver::default().solve(&valuator, 0).unwrap();
        let scaled = rounded.hazard_rate * 1e8;
        assert_relative_eq!(scaled, scaled.round(), epsilon = 1e-6);

        let raw = HazardSolver::new(HazardSolverMethod::Brent, 1e-12, 100, None)
            .solve(&valuator, 0)
            .unwrap();
        assert!((raw.hazard_rate - rounded.hazard_rate).abs() <= 6e-9);
    }

    #[test]
    fn test_round_uses_decimal_scale() {
        let solver = HazardSolver::new(HazardSolverMethod::Brent, 1e-10, 100, Some(4));
        let rounded = Decimal::from_f64(solver.round(0.016_666_67)).unwrap();
        assert_eq!(rounded, dec!(0.0167));

        let unrounded = HazardSolver::new(HazardSolverMethod::Brent, 1e-10, 100, None);
        assert_eq!(unrounded.round(0.016_666_67), 0.016_666_67);
    }

    #[test]
    fn test_negative_root_is_returned() {
        // A high-hazard first segment makes a small 2Y spread unreachable
        // with a non-negative hazard on the second segment
        let curve = DiscountCurve::flat(0.02);
        let context = BootstrapContext::new().extended(HazardSegment::new(0.0, 1.0, 0.2));
        let quote = CdsQuote::new(2.0, 0.005).unwrap();
        let valuator = LegValuator::new(&curve, &context, &quote, 4, 0.4);

        let solution = HazardSolver::default().solve(&valuator, 1).unwrap();

        assert!(solution.hazard_rate < 0.0);
    }

    #[test]
    fn test_iteration_cap_is_optimization_failure() {
        let curve = DiscountCurve::flat(0.02);
        let valuator = single_tenor_valuator(&curve);

        let result = HazardSolver::new(HazardSolverMethod::Minimize, 1e-14, 3, Some(8))
            .solve(&valuator, 0);

        assert!(matches!(
            result,
            Err(CurveError::OptimizationFailure { tenor_index: 0, .. })
        ));
    }

    #[test]
    fn test_failure_carries_last_objective() {
        let curve = DiscountCurve::flat(0.02);
        let valuator = single_tenor_valuator(&curve);
        let seed_objective = valuator.objective(0.01 / 0.6);

        for method in [HazardSolverMethod::Minimize, HazardSolverMethod::Bisection] {
            let err = HazardSolver::new(method, 1e-14, 3, Some(8))
                .solve(&valuator, 0)
                .unwrap_err();

            let CurveError::OptimizationFailure { objective, .. } = err else {
                panic!("{method}: expected OptimizationFailure, got {err:?}");
            };
            assert!(objective.is_finite());
            assert_ne!(objective, seed_objective, "{method}");
        }
    }

    #[test]
    fn test_last_objective_from_math_errors() {
        let err = MathError::convergence_failed(10, -2.5e-7);
        assert_eq!(last_objective(&err), Some(2.5e-7));

        let err = MathError::InvalidBracket {
            a: 0.0,
            b: 1.0,
            fa: 0.1,
            fb: -0.3,
        };
        assert_eq!(last_objective(&err), Some(0.3));

        assert_eq!(last_objective(&MathError::invalid_input("bad")), None);
    }
}
