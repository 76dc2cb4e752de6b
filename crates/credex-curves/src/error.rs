//! Error types for hazard-curve construction.
//!
//! Input problems (length mismatches, bad tenors, out-of-domain parameters)
//! are detected before any solve starts. Solver and domain failures carry
//! the tenor at which the bootstrap stopped.

use credex_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Two parallel input arrays have different lengths.
    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Which pair of arrays disagreed.
        what: String,
        /// Length of the reference array.
        expected: usize,
        /// Length of the offending array.
        actual: usize,
    },

    /// Not enough data points.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Tenors are not strictly increasing.
    #[error("Non-monotonic tenors at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicTenors {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous tenor value.
        prev: f64,
        /// Current tenor value.
        current: f64,
    },

    /// Invalid value (NaN, Inf, or domain error).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why value is invalid.
        reason: String,
    },

    /// The hazard solver did not converge for a tenor.
    #[error(
        "Optimization failed at tenor #{tenor_index} ({tenor:.4}y), objective {objective:.3e}: {reason}"
    )]
    OptimizationFailure {
        /// Index of the tenor being solved.
        tenor_index: usize,
        /// Tenor in years.
        tenor: f64,
        /// Last objective value seen by the solver.
        objective: f64,
        /// Description of the failure.
        reason: String,
    },

    /// A solved hazard rate has no economic meaning.
    #[error("Domain violation at tenor #{tenor_index} ({tenor:.4}y): hazard rate {hazard_rate}")]
    DomainViolation {
        /// Index of the tenor being solved.
        tenor_index: usize,
        /// Tenor in years.
        tenor: f64,
        /// The rejected hazard rate.
        hazard_rate: f64,
    },

    /// The bootstrapped curve does not reprice its inputs.
    #[error(
        "Repricing failed for {failed_count} quote(s), max error {max_error:.2e}: {instruments:?}"
    )]
    RepricingFailed {
        /// Number of quotes outside tolerance.
        failed_count: usize,
        /// Largest absolute pricing error.
        max_error: f64,
        /// Descriptions of the failing quotes.
        instruments: Vec<String>,
    },

    /// Requested tenor is outside the curve's valid range.
    #[error("Tenor {requested:.4} out of range [{min:.4}, {max:.4}]")]
    TenorOutOfRange {
        /// The requested tenor in years.
        requested: f64,
        /// Minimum valid tenor.
        min: f64,
        /// Maximum valid tenor.
        max: f64,
    },

    /// Mathematical error.
    #[error("Math error: {reason}")]
    MathError {
        /// Description of the mathematical error.
        reason: String,
    },
}

impl CurveError {
    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates a non-monotonic tenors error.
    #[must_use]
    pub fn non_monotonic_tenors(index: usize, prev: f64, current: f64) -> Self {
        Self::NonMonotonicTenors {
            index,
            prev,
            current,
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates an optimization failure error.
    #[must_use]
    pub fn optimization_failure(
        tenor_index: usize,
        tenor: f64,
        objective: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::OptimizationFailure {
            tenor_index,
            tenor,
            objective,
            reason: reason.into(),
        }
    }

    /// Creates a domain violation error.
    #[must_use]
    pub fn domain_violation(tenor_index: usize, tenor: f64, hazard_rate: f64) -> Self {
        Self::DomainViolation {
            tenor_index,
            tenor,
            hazard_rate,
        }
    }

    /// Creates a repricing failure error.
    #[must_use]
    pub fn repricing_failed(failed_count: usize, max_error: f64, instruments: Vec<String>) -> Self {
        Self::RepricingFailed {
            failed_count,
            max_error,
            instruments,
        }
    }

    /// Creates a tenor out of range error.
    #[must_use]
    pub fn tenor_out_of_range(requested: f64, min: f64, max: f64) -> Self {
        Self::TenorOutOfRange {
            requested,
            min,
            max,
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }

    /// Returns true for errors raised by input validation.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. }
                | Self::InsufficientPoints { .. }
                | Self::NonMonotonicTenors { .. }
                | Self::InvalidValue { .. }
        )
    }
}

impl From<MathError> for CurveError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                Self::insufficient_points(required, actual)
            }
            other => Self::math_error(other.to_string()),
        }
    }
}
