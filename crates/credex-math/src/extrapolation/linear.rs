//! Linear extrapolation.

use super::Extrapolator;

/// Linear extrapolation: continues with the edge slope.
///
/// `y = y_edge + slope · (t − t_edge)`. Long extensions of a downward-sloping
/// rate curve can go negative; callers that care should clamp or pick
/// [`FlatExtrapolator`](super::FlatExtrapolator).
///
/// ```rust
/// use credex_math::extrapolation::{LinearExtrapolator, Extrapolator};
///
/// let rate = LinearExtrapolator.extrapolate(15.0, 10.0, 0.05, 0.001);
/// assert!((rate - 0.055).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearExtrapolator;

impl Extrapolator for LinearExtrapolator {
    fn extrapolate(&self, t: f64, edge_t: f64, edge_value: f64, edge_derivative: f64) -> f64 {
        edge_value + edge_derivative * (t - edge_t)
    }

    fn name(&self) -> &'static str {
        "Linear"
    }
}
