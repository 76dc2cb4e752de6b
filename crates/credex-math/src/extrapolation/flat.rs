//! Flat (constant) extrapolation.

use super::Extrapolator;

/// Flat extrapolation: holds the edge value constant.
///
/// ```rust
/// use credex_math::extrapolation::{FlatExtrapolator, Extrapolator};
///
/// let rate = FlatExtrapolator.extrapolate(40.0, 30.0, 0.0881, -0.0006);
/// assert_eq!(rate, 0.0881);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatExtrapolator;

impl Extrapolator for FlatExtrapolator {
    fn extrapolate(&self, _t: f64, _edge_t: f64, edge_value: f64, _edge_derivative: f64) -> f64 {
        edge_value
    }

    fn name(&self) -> &'static str {
        "Flat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_slope_and_distance() {
        for t in [-5.0, 0.0, 31.0, 100.0] {
            assert_eq!(FlatExtrapolator.extrapolate(t, 30.0, 0.04, 0.01), 0.04);
        }
        assert_eq!(FlatExtrapolator.name(), "Flat");
    }
}
