//! Discount curve built from zero-rate pillars.

use credex_math::extrapolation::{ExtrapolationMethod, Extrapolator};
use credex_math::interpolation::{Interpolator, LinearInterpolator};

use crate::compounding::Compounding;
use crate::error::{CurveError, CurveResult};

#[derive(Debug, Clone)]
enum RateSource {
    Flat(f64),
    Linear(LinearInterpolator),
}

/// A risk-free discount curve given as parallel tenor/rate arrays.
///
/// Rates are linearly interpolated between pillars. Outside the pillar range
/// the configured [`ExtrapolationMethod`] continues from the nearest edge
/// (linear by default), so queries never fail. A single pillar describes a
/// flat curve.
///
/// # Example
///
/// ```rust
/// use credex_curves::DiscountCurve;
///
/// let curve = DiscountCurve::new(vec![1.0, 2.0], vec![0.02, 0.03]).unwrap();
///
/// assert!((curve.rate_at(1.5) - 0.025).abs() < 1e-12);
/// assert!((curve.rate_at(3.0) - 0.04).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountCurve {
    tenors: Vec<f64>,
    rates: Vec<f64>,
    source: RateSource,
    compounding: Compounding,
    extrapolation: ExtrapolationMethod,
}

impl DiscountCurve {
    /// Creates a discount curve from tenors (years) and zero rates.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrays differ in length, are empty, contain
    /// non-finite values, or if the tenors are not strictly increasing.
    pub fn new(tenors: Vec<f64>, rates: Vec<f64>) -> CurveResult<Self> {
        if tenors.len() != rates.len() {
            return Err(CurveError::length_mismatch(
                "discount rates vs discount tenors",
                tenors.len(),
                rates.len(),
            ));
        }
        if tenors.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }
        if let Some(bad) = tenors.iter().chain(rates.iter()).find(|v| !v.is_finite()) {
            return Err(CurveError::invalid_value(format!(
                "discount curve values must be finite, got {bad}"
            )));
        }
        if let Some(i) = (1..tenors.len()).find(|&i| tenors[i] <= tenors[i - 1]) {
            return Err(CurveError::non_monotonic_tenors(i, tenors[i - 1], tenors[i]));
        }

        let source = if tenors.len() == 1 {
            RateSource::Flat(rates[0])
        } else {
            RateSource::Linear(LinearInterpolator::new(tenors.clone(), rates.clone())?)
        };

        Ok(Self {
            tenors,
            rates,
            source,
            compounding: Compounding::default(),
            extrapolation: ExtrapolationMethod::default(),
        })
    }

    /// Creates a flat curve at `rate`.
    #[must_use]
    pub fn flat(rate: f64) -> Self {
        Self {
            tenors: vec![0.0],
            rates: vec![rate],
            source: RateSource::Flat(rate),
            compounding: Compounding::default(),
            extrapolation: ExtrapolationMethod::default(),
        }
    }

    /// Sets the convention under which the rates are quoted.
    #[must_use]
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Sets how rates are continued beyond the first and last pillar.
    #[must_use]
    pub fn with_extrapolation(mut self, method: ExtrapolationMethod) -> Self {
        self.extrapolation = method;
        self
    }

    /// Returns the pillar tenors.
    #[must_use]
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Returns the pillar rates.
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Returns the compounding convention.
    #[must_use]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Returns the extrapolation method.
    #[must_use]
    pub fn extrapolation(&self) -> ExtrapolationMethod {
        self.extrapolation
    }

    /// Zero rate at `t` years.
    #[must_use]
    pub fn rate_at(&self, t: f64) -> f64 {
        match &self.source {
            RateSource::Flat(rate) => *rate,
            RateSource::Linear(interp) => {
                let (min, max) = (interp.min_x(), interp.max_x());
                if t < min {
                    let edge = interp.ys()[0];
                    self.extrapolation
                        .extrapolate(t, min, edge, interp.slope_at(min))
                } else if t > max {
                    let edge = interp.ys()[interp.ys().len() - 1];
                    self.extrapolation
                        .extrapolate(t, max, edge, interp.slope_at(max))
                } else {
                    interp.value_at(t)
                }
            }
        }
    }

    /// Discount factor at `t` years.
    #[must_use]
    pub fn discount_factor(&self, t: f64) -> f64 {
        self.compounding.discount_factor(self.rate_at(t), t)
    }
}
