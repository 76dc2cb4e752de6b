//! Interpolation methods for term-structure inputs.
//!
//! Only piecewise-linear interpolation is provided. Discount rates consumed by
//! the hazard bootstrap are quoted on an arbitrary tenor grid, and linear
//! interpolation between the two bracketing points is the market-data contract.

mod linear;

pub use linear::LinearInterpolator;

use crate::error::MathResult;

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trait_object_dispatch() {
        let interp: Box<dyn Interpolator> = Box::new(
            LinearInterpolator::new(vec![0.5, 1.0, 2.0], vec![0.02, 0.025, 0.03]).unwrap(),
        );

        assert!(interp.in_range(0.75));
        assert!(!interp.in_range(2.5));
        assert!(!interp.allows_extrapolation());
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 0.0275, epsilon = 1e-12);
        assert_relative_eq!(interp.derivative(1.5).unwrap(), 0.005, epsilon = 1e-12);
    }
}
