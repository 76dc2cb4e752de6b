//! Interval halving.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Finds a root of `f` on `[a, b]` by interval halving.
///
/// Only the sign of `f` at the left edge is tracked, so each step costs one
/// evaluation. Stops when `|f(mid)|` or the half-width falls below
/// `config.tolerance`.
///
/// # Example
///
/// ```rust
/// use credex_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = (a.min(b), a.max(b));
    let (fa, fb) = (f(lo), f(hi));

    for (x, fx) in [(lo, fa), (hi, fb)] {
        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: 0,
                residual: fx,
            });
        }
    }
    if fa.signum() == fb.signum() {
        return Err(MathError::InvalidBracket { a: lo, b: hi, fa, fb });
    }

    let left_positive = fa > 0.0;
    let mut last = (lo, fa);

    for iteration in 1..=config.max_iterations {
        let mid = lo + 0.5 * (hi - lo);
        let f_mid = f(mid);
        last = (mid, f_mid);

        if f_mid.abs() < config.tolerance || 0.5 * (hi - lo) < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration,
                residual: f_mid,
            });
        }

        if (f_mid > 0.0) == left_positive {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    log::debug!(
        "bisection hit {} iterations at x={} (f={:.3e})",
        config.max_iterations,
        last.0,
        last.1
    );
    Err(MathError::convergence_failed(config.max_iterations, last.1))
}
