//! Root-finding algorithms.
//!
//! - [`brent`]: Robust bracketing method (inverse quadratic, secant, bisection)
//! - [`bisection`]: Simple and reliable bracketing method
//! - [`hybrid`]: Monitored Newton-Raphson with Brent fallback
//! - [`expand_bracket`]: Grows an interval until the function changes sign
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Hybrid | Fast | Guaranteed* | Initial guess |
//!
//! *When bounds are provided or can be found automatically.
//!
//! # Example
//!
//! ```rust
//! use credex_math::solvers::{brent, expand_bracket, SolverConfig};
//!
//! // Decreasing function with a root at 0.25, known positive at 0
//! let f = |x: f64| 0.25 - x;
//! let (a, b) = expand_bracket(&f, 0.0, 0.01, 60).unwrap();
//! let result = brent(f, a, b, &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.25).abs() < 1e-10);
//! ```

mod bisection;
mod brent;
mod hybrid;

pub use bisection::bisection;
pub use brent::brent;
pub use hybrid::{hybrid, hybrid_numerical};

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Grows `[lo, hi]` to the right until `f` changes sign.
///
/// `lo` stays fixed; each expansion doubles the width of the interval. This
/// suits functions whose sign is known at a natural lower bound (zero for
/// rates and intensities) and whose root lies somewhere above it.
///
/// # Errors
///
/// Returns [`MathError::InvalidBracket`] if no sign change is found within
/// `max_expansions` doublings, or [`MathError::InvalidInput`] if `hi <= lo`.
pub fn expand_bracket<F>(f: F, lo: f64, hi: f64, max_expansions: u32) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if hi <= lo || !lo.is_finite() || !hi.is_finite() {
        return Err(MathError::invalid_input(format!(
            "bracket start must satisfy lo < hi, got [{lo}, {hi}]"
        )));
    }

    let f_lo = f(lo);
    let mut hi = hi;
    let mut f_hi = f(hi);

    for _ in 0..max_expansions {
        if f_lo * f_hi <= 0.0 {
            return Ok((lo, hi));
        }
        hi = lo + 2.0 * (hi - lo);
        f_hi = f(hi);
    }

    if f_lo * f_hi <= 0.0 {
        return Ok((lo, hi));
    }

    Err(MathError::InvalidBracket {
        a: lo,
        b: hi,
        fa: f_lo,
        fb: f_hi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_expand_bracket_grows_upward() {
        let f = |x: f64| 3.0 - x;

        let (a, b) = expand_bracket(f, 0.0, 0.1, 60).unwrap();

        assert_eq!(a, 0.0);
        assert!(b >= 3.0);
        // 0.1 doubled five times is 3.2, the first width past the root
        assert_relative_eq!(b, 3.2, epsilon = 1e-12);
    }

    #[test]
    fn test_expand_bracket_already_bracketed() {
        let f = |x: f64| x - 0.05;
        let (a, b) = expand_bracket(f, 0.0, 0.1, 10).unwrap();
        assert_eq!((a, b), (0.0, 0.1));
    }

    #[test]
    fn test_expand_bracket_fails_without_sign_change() {
        let f = |x: f64| 1.0 + x * x;
        let result = expand_bracket(f, 0.0, 1.0, 20);
        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_expand_bracket_rejects_empty_interval() {
        let f = |x: f64| x;
        assert!(expand_bracket(f, 1.0, 1.0, 10).is_err());
    }

    #[test]
    fn test_all_solvers_agree_on_survival_equation() {
        // exp(-h) = 0.9 has root h = -ln(0.9)
        let f = |h: f64| (-h).exp() - 0.9;
        let df = |h: f64| -(-h).exp();
        let config = SolverConfig::default();
        let expected = -(0.9_f64).ln();

        let brent_result = brent(f, 0.0, 1.0, &config).unwrap();
        let bisection_result = bisection(f, 0.0, 1.0, &config).unwrap();
        let hybrid_result = hybrid(f, df, 0.05, Some((0.0, 1.0)), &config).unwrap();

        assert_relative_eq!(brent_result.root, expected, epsilon = 1e-9);
        assert_relative_eq!(bisection_result.root, expected, epsilon = 1e-9);
        assert_relative_eq!(hybrid_result.root, expected, epsilon = 1e-9);
    }
}
