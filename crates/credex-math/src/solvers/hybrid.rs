//! Hybrid root-finding: Newton-Raphson with a Brent safety net.

use crate::error::{MathError, MathResult};
use crate::solvers::{brent, SolverConfig, SolverResult};

/// Step size for central finite differences.
const FINITE_DIFFERENCE_STEP: f64 = 1e-8;

/// Newton iterations tried before falling back to Brent.
const NEWTON_ITERATION_CAP: u32 = 20;

/// Consecutive residual blow-ups tolerated before Newton is abandoned.
const MAX_DIVERGENT_STEPS: u32 = 3;

/// Hybrid root-finding algorithm.
///
/// Runs a monitored Newton-Raphson first. If Newton diverges, hits a flat
/// derivative, leaves `bounds`, or runs out of iterations, the search
/// restarts with Brent on `bounds` (or on a bracket found around the initial
/// guess when no bounds are given).
///
/// # Example
///
/// ```rust
/// use credex_math::solvers::{hybrid, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();
/// assert!((f(result.root)).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    match monitored_newton(&f, &df, initial_guess, bounds, config) {
        Ok(result) => Ok(result),
        Err(newton_err) => {
            log::debug!("hybrid solver falling back to Brent: {newton_err}");
            let (a, b) = match bounds {
                Some(bounds) => bounds,
                None => find_bracket(&f, initial_guess).ok_or_else(|| {
                    MathError::invalid_input(
                        "Newton-Raphson failed and no bracketing interval was found",
                    )
                })?,
            };
            let fallback = brent(&f, a, b, config)?;
            Ok(SolverResult {
                iterations: fallback.iterations + NEWTON_ITERATION_CAP.min(config.max_iterations),
                ..fallback
            })
        }
    }
}

/// Hybrid solver with a central-difference derivative.
pub fn hybrid_numerical<F>(
    f: F,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let h = FINITE_DIFFERENCE_STEP;
    let df = |x: f64| (f(x + h) - f(x - h)) / (2.0 * h);

    hybrid(&f, df, initial_guess, bounds, config)
}

fn monitored_newton<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergent_steps = 0;
    let max_iterations = config.max_iterations.min(NEWTON_ITERATION_CAP);

    for iteration in 0..max_iterations {
        let fx = f(x);
        let residual = fx.abs();

        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if residual > 2.0 * prev_residual {
            divergent_steps += 1;
            if divergent_steps >= MAX_DIVERGENT_STEPS {
                return Err(MathError::invalid_input("Newton-Raphson diverging"));
            }
        } else {
            divergent_steps = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if dfx.abs() < 1e-15 {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;

        if !x.is_finite() {
            return Err(MathError::invalid_input("Newton produced non-finite value"));
        }
        if let Some((lo, hi)) = bounds {
            if x < lo.min(hi) || x > lo.max(hi) {
                return Err(MathError::invalid_input("Newton step left the bounds"));
            }
        }

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    Err(MathError::convergence_failed(max_iterations, f(x).abs()))
}

/// Symmetric exponential search for a sign change around `initial_guess`.
fn find_bracket<F>(f: &F, initial_guess: f64) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let f_init = f(initial_guess);
    let mut delta = 0.1_f64.max(initial_guess.abs() * 0.1);

    while delta <= 1e6 {
        let left = initial_guess - delta;
        let right = initial_guess + delta;
        let f_left = f(left);
        let f_right = f(right);

        if f_left * f_init <= 0.0 {
            return Some((left, initial_guess));
        }
        if f_right * f_init <= 0.0 {
            return Some((initial_guess, right));
        }
        delta *= 2.0;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_fallback_to_brent() {
        // Newton from 0 jumps to -2.5, outside the bounds
        let f = |x: f64| x * x * x - 2.0 * x - 5.0;
        let df = |x: f64| 3.0 * x * x - 2.0;

        let result = hybrid(f, df, 0.0, Some((1.0, 3.0)), &SolverConfig::default()).unwrap();

        assert!(f(result.root).abs() < 1e-10);
        assert!(result.root > 1.0 && result.root < 3.0);
    }

    #[test]
    fn test_numerical_derivative() {
        let f = |x: f64| x * x - 2.0;

        let result =
            hybrid_numerical(f, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-8);
    }

    #[test]
    fn test_auto_bracket_finding() {
        // Flat derivative at the guess forces the fallback without bounds
        let f = |x: f64| x * x * x - 8.0;
        let df = |x: f64| 3.0 * x * x;

        let result = hybrid(f, df, 0.0, None, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 2.0, epsilon = 1e-9);
    }
}
