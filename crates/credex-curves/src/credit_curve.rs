//! Bootstrapped piecewise-constant hazard curve.

use serde::{Deserialize, Serialize};

use crate::curves::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::survival::HazardSegment;

/// Tolerance for segment boundaries to be considered contiguous.
const BOUNDARY_TOLERANCE: f64 = 1e-12;

/// A piecewise-constant hazard curve with survival probabilities at each
/// tenor.
///
/// The hazard rate is constant on `[start, end)` of each segment and flat
/// beyond the last tenor.
///
/// # Example
///
/// ```rust
/// use credex_curves::{HazardCurve, HazardSegment};
///
/// let curve = HazardCurve::new(
///     vec![
///         HazardSegment::new(0.0, 1.0, 0.01),
///         HazardSegment::new(1.0, 3.0, 0.02),
///     ],
///     0.4,
/// )
/// .unwrap();
///
/// let q = curve.survival_probability(2.0).unwrap();
/// assert!((q - (-0.03_f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HazardCurveParts")]
pub struct HazardCurve {
    segments: Vec<HazardSegment>,
    survival_probabilities: Vec<f64>,
    recovery_rate: f64,
}

/// Serialized form of a [`HazardCurve`].
///
/// Survival probabilities are derived data; they are recomputed from the
/// segments rather than read back.
#[derive(Deserialize)]
struct HazardCurveParts {
    segments: Vec<HazardSegment>,
    recovery_rate: f64,
}

impl TryFrom<HazardCurveParts> for HazardCurve {
    type Error = CurveError;

    fn try_from(parts: HazardCurveParts) -> CurveResult<Self> {
        Self::new(parts.segments, parts.recovery_rate)
    }
}

impl HazardCurve {
    /// Creates a curve from contiguous segments starting at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no segments, the first does not start
    /// at zero, segments are empty or leave gaps, a hazard is non-finite,
    /// or the recovery rate lies outside `[0, 1)`.
    pub fn new(segments: Vec<HazardSegment>, recovery_rate: f64) -> CurveResult<Self> {
        if !(0.0..1.0).contains(&recovery_rate) {
            return Err(CurveError::invalid_value(format!(
                "recovery rate must lie in [0, 1), got {recovery_rate}"
            )));
        }
        let Some(first) = segments.first() else {
            return Err(CurveError::insufficient_points(1, 0));
        };
        if first.start.abs() > BOUNDARY_TOLERANCE {
            return Err(CurveError::invalid_value(format!(
                "first hazard segment must start at 0, got {}",
                first.start
            )));
        }

        let mut prev_end = 0.0;
        for (i, seg) in segments.iter().enumerate() {
            if seg.end <= seg.start {
                return Err(CurveError::non_monotonic_tenors(i, seg.start, seg.end));
            }
            if (seg.start - prev_end).abs() > BOUNDARY_TOLERANCE {
                return Err(CurveError::invalid_value(format!(
                    "hazard segment {i} starts at {} but previous ends at {prev_end}",
                    seg.start
                )));
            }
            if !seg.hazard_rate.is_finite() {
                return Err(CurveError::invalid_value(format!(
                    "hazard rate of segment {i} is not finite"
                )));
            }
            prev_end = seg.end;
        }

        let mut cumulative = 0.0;
        let survival_probabilities = segments
            .iter()
            .map(|seg| {
                cumulative += seg.integral();
                (-cumulative).exp()
            })
            .collect();

        Ok(Self {
            segments,
            survival_probabilities,
            recovery_rate,
        })
    }

    /// Returns the segments.
    #[must_use]
    pub fn segments(&self) -> &[HazardSegment] {
        &self.segments
    }

    /// Returns the tenor (segment end) of each segment.
    #[must_use]
    pub fn tenors(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.end).collect()
    }

    /// Returns the hazard rate of each segment.
    #[must_use]
    pub fn hazard_rates(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.hazard_rate).collect()
    }

    /// Survival probability at each tenor, excluding `S(0) = 1`.
    #[must_use]
    pub fn survival_probabilities(&self) -> &[f64] {
        &self.survival_probabilities
    }

    /// Survival probability at the `index`-th tenor.
    #[must_use]
    pub fn survival_probability_at_tenor(&self, index: usize) -> Option<f64> {
        self.survival_probabilities.get(index).copied()
    }

    /// Returns the recovery rate.
    #[must_use]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Returns the last tenor.
    #[must_use]
    pub fn max_tenor(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.end)
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the curve has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn check_tenor(&self, t: f64) -> CurveResult<()> {
        if t.is_nan() || t < 0.0 {
            return Err(CurveError::tenor_out_of_range(t, 0.0, self.max_tenor()));
        }
        Ok(())
    }

    /// Instantaneous hazard rate at `t`.
    pub fn hazard_rate_at(&self, t: f64) -> CurveResult<f64> {
        self.check_tenor(t)?;
        let index = self
            .segments
            .partition_point(|s| s.end <= t)
            .min(self.segments.len() - 1);
        Ok(self.segments[index].hazard_rate)
    }

    /// Integrated hazard `∫₀ᵗ h(u) du`.
    pub fn cumulative_hazard(&self, t: f64) -> CurveResult<f64> {
        self.check_tenor(t)?;

        let mut total = 0.0;
        for seg in &self.segments {
            if t <= seg.start {
                break;
            }
            total += seg.hazard_rate * (t.min(seg.end) - seg.start);
        }
        if let Some(last) = self.segments.last() {
            if t > last.end {
                total += last.hazard_rate * (t - last.end);
            }
        }

        Ok(total)
    }

    /// Survival probability `Q(t) = exp(-∫₀ᵗ h(u) du)`.
    pub fn survival_probability(&self, t: f64) -> CurveResult<f64> {
        Ok((-self.cumulative_hazard(t)?).exp())
    }

    /// Default probability `1 - Q(t)`.
    pub fn default_probability(&self, t: f64) -> CurveResult<f64> {
        Ok(1.0 - self.survival_probability(t)?)
    }

    /// Probability of default in `[t1, t2]` given survival to `t1`.
    ///
    /// `(Q(t1) - Q(t2)) / Q(t1)`
    pub fn conditional_default_probability(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if t2 < t1 {
            return Err(CurveError::invalid_value(format!(
                "period end {t2} precedes start {t1}"
            )));
        }
        let q1 = self.survival_probability(t1)?;
        let q2 = self.survival_probability(t2)?;
        if q1 <= 0.0 {
            return Ok(1.0);
        }
        Ok((q1 - q2) / q1)
    }

    /// Unconditional probability of default in `[t1, t2]`.
    pub fn marginal_default_probability(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if t2 < t1 {
            return Err(CurveError::invalid_value(format!(
                "period end {t2} precedes start {t1}"
            )));
        }
        Ok(self.survival_probability(t1)? - self.survival_probability(t2)?)
    }

    /// Flat hazard rate reproducing `Q(t)`: `-ln Q(t) / t`.
    pub fn implied_hazard_rate(&self, t: f64) -> CurveResult<f64> {
        self.check_tenor(t)?;
        if t <= 0.0 {
            return self.hazard_rate_at(0.0);
        }
        Ok(self.cumulative_hazard(t)? / t)
    }

    /// Expected loss fraction to `t`: `(1 - R) · (1 - Q(t))`.
    pub fn expected_loss(&self, t: f64) -> CurveResult<f64> {
        Ok((1.0 - self.recovery_rate) * self.default_probability(t)?)
    }

    /// Risky discount factor `P(t) · [Q(t) + (1 - Q(t)) · R]`.
    pub fn risky_discount_factor(&self, t: f64, discount_curve: &DiscountCurve) -> CurveResult<f64> {
        let q = self.survival_probability(t)?;
        Ok(discount_curve.discount_factor(t) * (q + (1.0 - q) * self.recovery_rate))
    }
}
