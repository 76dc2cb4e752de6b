//! Piecewise-constant hazard segments and survival integration.
//!
//! The bootstrap state is a [`BootstrapContext`]: the finalized segments
//! plus the hazard integral accrued over them. A context is never mutated
//! in place; each solved tenor produces a new, extended context.
//!
//! Within the open segment, survival to local time `t` is
//!
//! ```text
//! S(t) = exp(-h · (t - t0) - auc)
//! ```
//!
//! where `t0` is the segment start and `auc` the accrued integral.

use serde::{Deserialize, Serialize};

/// A constant-hazard interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardSegment {
    /// Segment start in years.
    pub start: f64,
    /// Segment end in years.
    pub end: f64,
    /// Default intensity over the segment.
    pub hazard_rate: f64,
}

impl HazardSegment {
    /// Creates a segment.
    #[must_use]
    pub fn new(start: f64, end: f64, hazard_rate: f64) -> Self {
        Self {
            start,
            end,
            hazard_rate,
        }
    }

    /// Segment length in years.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Hazard integral over the segment.
    #[must_use]
    pub fn integral(&self) -> f64 {
        self.hazard_rate * self.length()
    }

    /// Returns true if `t` lies within the segment.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }
}

/// Finalized segments and their accrued hazard integral.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootstrapContext {
    segments: Vec<HazardSegment>,
    cumulative_hazard: f64,
}

impl BootstrapContext {
    /// Creates an empty context anchored at `t = 0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context with `segment` appended and the integral advanced.
    #[must_use]
    pub fn extended(mut self, segment: HazardSegment) -> Self {
        self.cumulative_hazard += segment.integral();
        self.segments.push(segment);
        self
    }

    /// The finalized segments, in tenor order.
    #[must_use]
    pub fn segments(&self) -> &[HazardSegment] {
        &self.segments
    }

    /// Hazard integral accrued over all finalized segments.
    #[must_use]
    pub fn cumulative_hazard(&self) -> f64 {
        self.cumulative_hazard
    }

    /// End of the last finalized segment (0 when empty).
    #[must_use]
    pub fn last_tenor(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.end)
    }

    /// Number of finalized segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true when no segment has been finalized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Survival probability to the end of the last finalized segment.
    #[must_use]
    pub fn survival(&self) -> f64 {
        (-self.cumulative_hazard).exp()
    }

    /// Integrator positioned at the start of the open segment.
    #[must_use]
    pub fn integrator(&self) -> SurvivalIntegrator {
        SurvivalIntegrator::new(self.last_tenor(), self.cumulative_hazard)
    }
}

/// Survival probabilities within one segment, given the accrued integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurvivalIntegrator {
    origin: f64,
    accrued: f64,
}

impl SurvivalIntegrator {
    /// Creates an integrator for a segment starting at `origin` with
    /// `accrued` hazard integral before it.
    #[must_use]
    pub fn new(origin: f64, accrued: f64) -> Self {
        Self { origin, accrued }
    }

    /// Segment start.
    #[must_use]
    pub fn origin(&self) -> f64 {
        self.origin
    }

    /// Hazard integral accrued before the segment.
    #[must_use]
    pub fn accrued(&self) -> f64 {
        self.accrued
    }

    /// Survival probability to `t` under hazard `h` on this segment.
    #[must_use]
    pub fn survival(&self, hazard_rate: f64, t: f64) -> f64 {
        (-hazard_rate * (t - self.origin) - self.accrued).exp()
    }

    /// Integrator for the next segment once this one closes at `end`.
    #[must_use]
    pub fn advance(&self, hazard_rate: f64, end: f64) -> Self {
        Self {
            origin: end,
            accrued: self.accrued + hazard_rate * (end - self.origin),
        }
    }
}
