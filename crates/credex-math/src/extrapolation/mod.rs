//! Extrapolation methods for curves.
//!
//! - [`FlatExtrapolator`]: Constant extension from the edge point
//! - [`LinearExtrapolator`]: Continuation with the edge slope
//!
//! Both work in either direction: pass the first point and its slope to
//! extend to the left, the last point and its slope to extend to the right.
//!
//! # Example
//!
//! ```rust
//! use credex_math::extrapolation::{ExtrapolationMethod, Extrapolator};
//!
//! let method = ExtrapolationMethod::Linear;
//! let rate = method.extrapolate(35.0, 30.0, 0.0881, -0.00024);
//! assert!((rate - 0.0869).abs() < 1e-12);
//! ```

mod flat;
mod linear;

use serde::{Deserialize, Serialize};

pub use flat::FlatExtrapolator;
pub use linear::LinearExtrapolator;

/// Trait for extrapolation methods.
pub trait Extrapolator: Send + Sync {
    /// Extrapolates to time `t` given the edge point.
    ///
    /// # Arguments
    ///
    /// * `t` - Target time for extrapolation
    /// * `edge_t` - Time of the edge point
    /// * `edge_value` - Value at the edge point
    /// * `edge_derivative` - Slope at the edge point
    fn extrapolate(&self, t: f64, edge_t: f64, edge_value: f64, edge_derivative: f64) -> f64;

    /// Returns the name of the extrapolation method.
    fn name(&self) -> &'static str;
}

/// Choice of extrapolation beyond curve boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExtrapolationMethod {
    /// Constant value from boundary
    Flat,
    /// Linear continuation with boundary slope
    #[default]
    Linear,
}

impl Extrapolator for ExtrapolationMethod {
    fn extrapolate(&self, t: f64, edge_t: f64, edge_value: f64, edge_derivative: f64) -> f64 {
        match self {
            Self::Flat => FlatExtrapolator.extrapolate(t, edge_t, edge_value, edge_derivative),
            Self::Linear => LinearExtrapolator.extrapolate(t, edge_t, edge_value, edge_derivative),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Flat => FlatExtrapolator.name(),
            Self::Linear => LinearExtrapolator.name(),
        }
    }
}
