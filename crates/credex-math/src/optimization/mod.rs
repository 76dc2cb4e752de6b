//! One-dimensional unconstrained minimisation.
//!
//! [`bracket_minimum`] walks downhill from a seed until the function turns
//! up again, producing a triple `a < b < c` with `f(b) <= f(a), f(c)`.
//! [`golden_section`] then shrinks that bracket to the requested width.
//! Neither routine needs derivatives, so both work on kinked objectives
//! such as an absolute pricing error.

use crate::error::{MathError, MathResult};

/// Golden ratio, the growth factor for downhill expansion.
const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy)]
pub struct OptimizationConfig {
    /// Bracket width at which the minimiser reports convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Initial step for bracket search, relative to `max(|seed|, 1e-4)`.
    pub step_size: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 100,
            step_size: 0.1,
        }
    }
}

/// Result of a one-dimensional minimisation.
#[derive(Debug, Clone, Copy)]
pub struct MinimizeResult {
    /// Location of the minimum.
    pub x: f64,
    /// Objective value at `x`.
    pub value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the bracket shrank below the tolerance.
    pub converged: bool,
}

/// Finds a bracketing triple around a local minimum, starting at `seed`.
///
/// Returns `(a, b, c)` with `a < b < c`, `f(b) <= f(a)` and `f(b) <= f(c)`.
///
/// # Errors
///
/// Returns [`MathError::ConvergenceFailed`] if the function keeps decreasing
/// for `max_expansions` steps, or [`MathError::InvalidInput`] for a
/// non-finite seed or non-positive step.
pub fn bracket_minimum<F>(
    f: F,
    seed: f64,
    step: f64,
    max_expansions: u32,
) -> MathResult<(f64, f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if !seed.is_finite() || !step.is_finite() || step <= 0.0 {
        return Err(MathError::invalid_input(format!(
            "bracket search needs a finite seed and positive step, got seed={seed}, step={step}"
        )));
    }

    let mut a = seed;
    let mut b = seed + step;
    let mut fa = f(a);
    let mut fb = f(b);

    // Walk in the downhill direction
    if fb > fa {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c = b + GOLDEN_RATIO * (b - a);
    let mut fc = f(c);

    for _ in 0..max_expansions {
        if fc >= fb {
            return Ok(if a < c { (a, b, c) } else { (c, b, a) });
        }
        a = b;
        fa = fb;
        b = c;
        fb = fc;
        c = b + GOLDEN_RATIO * (b - a);
        fc = f(c);
    }

    log::debug!("bracket search still descending at x={b} (f={fb:.3e}, previous f={fa:.3e})");

    Err(MathError::convergence_failed(max_expansions, fb))
}

/// Golden-section search for a minimum inside `[a, b]`.
///
/// The function is assumed unimodal on the interval. The result always
/// carries the best point found; `converged` is false when the iteration
/// cap was hit before the interval narrowed to `config.tolerance`.
pub fn golden_section<F>(f: F, a: f64, b: f64, config: &OptimizationConfig) -> MinimizeResult
where
    F: Fn(f64) -> f64,
{
    let inv_phi = GOLDEN_RATIO - 1.0;
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut x1 = hi - inv_phi * (hi - lo);
    let mut x2 = lo + inv_phi * (hi - lo);
    let mut f1 = f(x1);
    let mut f2 = f(x2);

    for iteration in 0..config.max_iterations {
        if hi - lo < config.tolerance {
            let x = 0.5 * (lo + hi);
            return MinimizeResult {
                x,
                value: f(x),
                iterations: iteration,
                converged: true,
            };
        }

        if f1 <= f2 {
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - inv_phi * (hi - lo);
            f1 = f(x1);
        } else {
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + inv_phi * (hi - lo);
            f2 = f(x2);
        }
    }

    let (x, value) = if f1 <= f2 { (x1, f1) } else { (x2, f2) };
    MinimizeResult {
        x,
        value,
        iterations: config.max_iterations,
        converged: hi - lo < config.tolerance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bracket_quadratic() {
        let f = |x: f64| (x - 2.0).powi(2);

        let (a, b, c) = bracket_minimum(f, 0.0, 0.1, 50).unwrap();

        assert!(a < b && b < c);
        assert!(f(b) <= f(a) && f(b) <= f(c));
        assert!(a <= 2.0 && c >= 2.0);
    }

    #[test]
    fn test_bracket_walks_left() {
        let f = |x: f64| (x + 1.0).abs();

        let (a, b, c) = bracket_minimum(f, 1.0, 0.1, 50).unwrap();

        assert!(a < b && b < c);
        assert!(a <= -1.0 && c >= -1.0);
    }

    #[test]
    fn test_bracket_unbounded_descent_fails() {
        let f = |x: f64| -x;
        assert!(bracket_minimum(f, 0.0, 0.1, 10).is_err());
    }

    #[test]
    fn test_bracket_rejects_bad_step() {
        let f = |x: f64| x * x;
        assert!(bracket_minimum(f, 0.0, 0.0, 10).is_err());
        assert!(bracket_minimum(f, f64::NAN, 0.1, 10).is_err());
    }

    #[test]
    fn test_golden_section_on_kinked_objective() {
        // |x - 0.0166| has a kink at the minimum
        let f = |x: f64| (x - 0.0166).abs();

        let result = golden_section(f, 0.0, 0.1, &OptimizationConfig::default());

        assert!(result.converged);
        assert_relative_eq!(result.x, 0.0166, epsilon = 1e-10);
        assert!(result.value < 1e-10);
    }

    #[test]
    fn test_golden_section_reports_non_convergence() {
        let f = |x: f64| (x - 0.3).powi(2);
        let config = OptimizationConfig {
            max_iterations: 5,
            ..OptimizationConfig::default()
        };

        let result = golden_section(f, 0.0, 1.0, &config);

        assert!(!result.converged);
        assert_eq!(result.iterations, 5);
    }
}
