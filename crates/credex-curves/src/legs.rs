//! Premium and protection leg valuation.
//!
//! Each segment `[start, end]` is walked on an evenly spaced grid with step
//! close to `1 / premium_frequency`. For each grid interval `(t_{j-1}, t_j)`:
//!
//! ```text
//! annuity    += (1/f) · DF(t_j) · (S(t_{j-1}) + S(t_j)) / 2
//! protection += DF(t_j) · (1 - R) · (S(t_{j-1}) - S(t_j))
//! ```
//!
//! The premium leg is `spread · annuity`. Finalized segments do not depend
//! on the candidate hazard rate, so [`LegValuator`] values them once and
//! only re-walks the open segment per candidate.

use std::ops::{Add, AddAssign};

use crate::curves::DiscountCurve;
use crate::quotes::CdsQuote;
use crate::survival::{BootstrapContext, SurvivalIntegrator};

/// Slack added before truncating the grid point count.
const GRID_ROUNDOFF_GUARD: f64 = 1e-9;

/// Discounted leg values for a set of grid intervals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LegValues {
    /// Survival-weighted discounted accrual per unit of spread.
    pub risky_annuity: f64,
    /// Discounted expected loss payments.
    pub protection: f64,
}

impl LegValues {
    /// Premium leg value at `spread`.
    #[must_use]
    pub fn premium(&self, spread: f64) -> f64 {
        spread * self.risky_annuity
    }

    /// Premium minus protection at `spread`.
    #[must_use]
    pub fn difference(&self, spread: f64) -> f64 {
        self.premium(spread) - self.protection
    }
}

impl Add for LegValues {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            risky_annuity: self.risky_annuity + rhs.risky_annuity,
            protection: self.protection + rhs.protection,
        }
    }
}

impl AddAssign for LegValues {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Evenly spaced grid from `start` to `end` inclusive.
///
/// The point count is `floor((end - start) · premium_frequency + 1)`, with
/// a small guard against round-off and a minimum of two points.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn payment_grid(start: f64, end: f64, premium_frequency: u32) -> Vec<f64> {
    let raw = (end - start) * f64::from(premium_frequency) + 1.0 + GRID_ROUNDOFF_GUARD;
    let count = (raw.floor().max(0.0) as usize).max(2);
    let step = (end - start) / (count - 1) as f64;

    (0..count)
        .map(|k| if k == count - 1 { end } else { start + step * k as f64 })
        .collect()
}

/// Values both legs over `grid` for a constant hazard on one segment.
#[must_use]
pub fn segment_legs(
    curve: &DiscountCurve,
    integrator: &SurvivalIntegrator,
    hazard_rate: f64,
    grid: &[f64],
    premium_frequency: u32,
    recovery_rate: f64,
) -> LegValues {
    let accrual = 1.0 / f64::from(premium_frequency);
    let lgd = 1.0 - recovery_rate;

    let mut values = LegValues::default();
    let mut survival_prev = grid.first().map_or(1.0, |&t| integrator.survival(hazard_rate, t));

    for &t in grid.iter().skip(1) {
        let survival_curr = integrator.survival(hazard_rate, t);
        let df = curve.discount_factor(t);

        values.risky_annuity += accrual * df * 0.5 * (survival_prev + survival_curr);
        values.protection += df * lgd * (survival_prev - survival_curr);

        survival_prev = survival_curr;
    }

    values
}

/// Values the legs of one CDS quote on top of a bootstrap context.
///
/// # Example
///
/// ```rust
/// use credex_curves::{BootstrapContext, CdsQuote, DiscountCurve, LegValuator};
///
/// let curve = DiscountCurve::flat(0.02);
/// let quote = CdsQuote::new(1.0, 0.01).unwrap();
/// let context = BootstrapContext::new();
///
/// let valuator = LegValuator::new(&curve, &context, &quote, 4, 0.4);
///
/// // Premium exceeds protection when the hazard is zero
/// assert!(valuator.residual(0.0) > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct LegValuator<'a> {
    curve: &'a DiscountCurve,
    quote: CdsQuote,
    premium_frequency: u32,
    recovery_rate: f64,
    finalized: LegValues,
    integrator: SurvivalIntegrator,
    open_grid: Vec<f64>,
}

impl<'a> LegValuator<'a> {
    /// Creates a valuator for `quote`, whose open segment runs from the end
    /// of `context` to the quote's tenor.
    #[must_use]
    pub fn new(
        curve: &'a DiscountCurve,
        context: &BootstrapContext,
        quote: &CdsQuote,
        premium_frequency: u32,
        recovery_rate: f64,
    ) -> Self {
        let mut finalized = LegValues::default();
        let mut accrued = 0.0;

        for segment in context.segments() {
            let integrator = SurvivalIntegrator::new(segment.start, accrued);
            let grid = payment_grid(segment.start, segment.end, premium_frequency);
            finalized += segment_legs(
                curve,
                &integrator,
                segment.hazard_rate,
                &grid,
                premium_frequency,
                recovery_rate,
            );
            accrued += segment.integral();
        }

        let integrator = context.integrator();
        let open_grid = payment_grid(integrator.origin(), quote.tenor, premium_frequency);

        Self {
            curve,
            quote: *quote,
            premium_frequency,
            recovery_rate,
            finalized,
            integrator,
            open_grid,
        }
    }

    /// The quote being valued.
    #[must_use]
    pub fn quote(&self) -> &CdsQuote {
        &self.quote
    }

    /// Recovery rate applied to the protection leg.
    #[must_use]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Start and end of the open segment.
    #[must_use]
    pub fn open_segment(&self) -> (f64, f64) {
        (self.integrator.origin(), self.quote.tenor)
    }

    /// Leg values over finalized segments only.
    #[must_use]
    pub fn finalized_legs(&self) -> LegValues {
        self.finalized
    }

    /// Leg values over all segments with `hazard_rate` on the open one.
    #[must_use]
    pub fn legs(&self, hazard_rate: f64) -> LegValues {
        self.finalized
            + segment_legs(
                self.curve,
                &self.integrator,
                hazard_rate,
                &self.open_grid,
                self.premium_frequency,
                self.recovery_rate,
            )
    }

    /// Premium leg value.
    #[must_use]
    pub fn premium_leg(&self, hazard_rate: f64) -> f64 {
        self.legs(hazard_rate).premium(self.quote.spread)
    }

    /// Protection leg value.
    #[must_use]
    pub fn protection_leg(&self, hazard_rate: f64) -> f64 {
        self.legs(hazard_rate).protection
    }

    /// Signed pricing error, premium minus protection.
    #[must_use]
    pub fn residual(&self, hazard_rate: f64) -> f64 {
        self.legs(hazard_rate).difference(self.quote.spread)
    }

    /// Absolute pricing error.
    #[must_use]
    pub fn objective(&self, hazard_rate: f64) -> f64 {
        self.residual(hazard_rate).abs()
    }
}
