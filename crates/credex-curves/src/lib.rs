//! # Credex Curves
//!
//! Hazard-rate term structures bootstrapped from CDS par spreads.
//!
//! This crate provides:
//!
//! - **Discounting**: [`DiscountCurve`] over continuously compounded zero rates
//! - **Quotes**: [`CdsQuote`] tenor/spread pairs
//! - **Legs**: Premium and protection leg valuation on a quarterly-style grid
//! - **Bootstrap**: [`CdsBootstrapper`] solving one hazard rate per tenor
//! - **Credit Curve**: [`HazardCurve`] with survival and default queries
//! - **Repricing**: Post-build checks that the curve reprices its inputs
//!
//! ## Quick Start
//!
//! ```rust
//! use credex_curves::prelude::*;
//!
//! let discount = DiscountCurve::new(vec![1.0, 5.0, 10.0], vec![0.020, 0.025, 0.030]).unwrap();
//! let quotes = CdsQuote::from_arrays(&[1.0, 3.0, 5.0], &[0.0060, 0.0080, 0.0100]).unwrap();
//!
//! let result = CdsBootstrapper::new(discount)
//!     .add_quotes(quotes)
//!     .with_recovery_rate(0.4)
//!     .bootstrap_validated()
//!     .unwrap();
//!
//! assert!(result.is_valid());
//!
//! let curve = result.curve();
//! let s5 = curve.survival_probability(5.0).unwrap();
//! assert!((s5 - curve.survival_probabilities()[2]).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod bootstrap;
pub mod compounding;
pub mod credit_curve;
pub mod curves;
pub mod error;
pub mod legs;
pub mod quotes;
pub mod repricing;
pub mod solver;
pub mod survival;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{bootstrap_hazard_curve, BootstrapConfig, CdsBootstrapper};
    pub use crate::compounding::Compounding;
    pub use crate::credit_curve::HazardCurve;
    pub use crate::curves::DiscountCurve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::quotes::CdsQuote;
    pub use crate::repricing::{BootstrapResult, RepricingCheck, RepricingReport};
    pub use crate::solver::HazardSolverMethod;
    pub use crate::survival::HazardSegment;
}

pub use bootstrap::{bootstrap_hazard_curve, BootstrapConfig, CdsBootstrapper};
pub use compounding::Compounding;
pub use credit_curve::HazardCurve;
pub use curves::DiscountCurve;
pub use error::{CurveError, CurveResult};
pub use legs::{LegValuator, LegValues};
pub use quotes::CdsQuote;
pub use repricing::{BootstrapResult, RepricingCheck, RepricingReport};
pub use solver::{HazardSolution, HazardSolver, HazardSolverMethod};
pub use survival::{BootstrapContext, HazardSegment, SurvivalIntegrator};
