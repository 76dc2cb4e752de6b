//! # Credex Math
//!
//! Numerical building blocks for the Credex credit curve library.
//!
//! This crate provides:
//!
//! - **Interpolation**: Linear interpolation over strictly increasing abscissae
//! - **Extrapolation**: Flat and linear continuation beyond the data range
//! - **Solvers**: Root-finding (Brent, Bisection, Hybrid Newton/Brent) and
//!   bracket expansion
//! - **Optimization**: One-dimensional unconstrained minimisation
//!
//! Nothing in this crate knows about credit or discounting; the curve crate
//! composes these pieces into the hazard-rate bootstrap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod extrapolation;
pub mod interpolation;
pub mod optimization;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::extrapolation::{
        ExtrapolationMethod, Extrapolator, FlatExtrapolator, LinearExtrapolator,
    };
    pub use crate::interpolation::{Interpolator, LinearInterpolator};
    pub use crate::optimization::{
        bracket_minimum, golden_section, MinimizeResult, OptimizationConfig,
    };
    pub use crate::solvers::{
        bisection, brent, expand_bracket, hybrid, hybrid_numerical, SolverConfig,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
