//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Linear interpolation between data points.
///
/// Outside the data range the edge segment is extended, which is the
/// behaviour of `interp1d(kind="linear", fill_value="extrapolate")`. That
/// extension is only reachable through [`Interpolator::interpolate`] when
/// [`with_extrapolation`](Self::with_extrapolation) was called; the raw
/// [`value_at`](Self::value_at) helper always extends.
///
/// # Example
///
/// ```rust
/// use credex_math::interpolation::{LinearInterpolator, Interpolator};
///
/// let xs = vec![0.25, 0.5, 1.0];
/// let ys = vec![0.0247, 0.0265, 0.0308];
///
/// let interp = LinearInterpolator::new(xs, ys).unwrap();
/// let y = interp.interpolate(0.75).unwrap();
/// assert!((y - 0.02865).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    allow_extrapolation: bool,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if the lengths
    /// differ, if any value is non-finite or if `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("values must be finite"));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self {
            xs,
            ys,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Returns the x coordinates.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Returns the y coordinates.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Finds the index i such that xs[i] <= x < xs[i+1], clamped to the
    /// first and last segment.
    fn find_segment(&self, x: f64) -> usize {
        let last = self.xs.len() - 2;
        self.xs.partition_point(|&probe| probe <= x).saturating_sub(1).min(last)
    }

    /// Value on the segment containing `x`, extending the edge segments
    /// outside the data range.
    #[must_use]
    pub fn value_at(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        y0 + (x - x0) / (x1 - x0) * (y1 - y0)
    }

    /// Slope of the segment containing `x` (edge slope outside the range).
    #[must_use]
    pub fn slope_at(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i])
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if !self.allow_extrapolation && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        Ok(())
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        Ok(self.value_at(x))
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        Ok(self.slope_at(x))
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
