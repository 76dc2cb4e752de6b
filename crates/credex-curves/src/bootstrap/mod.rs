//! Hazard curve bootstrap.
//!
//! Builds a piecewise-constant hazard curve from a CDS spread term
//! structure. Each tenor adds one segment `(previous tenor, tenor]` whose
//! hazard rate equates the premium and protection legs of that tenor's
//! quote, given every segment solved before it.
//!
//! # Example
//!
//! ```rust
//! use credex_curves::bootstrap::bootstrap_hazard_curve;
//!
//! let (hazards, survival) = bootstrap_hazard_curve(
//!     &[1.0, 3.0, 5.0],
//!     &[0.0050, 0.0075, 0.0100],
//!     &[0.5, 10.0],
//!     &[0.02, 0.03],
//!     4,
//!     0.4,
//! )
//! .unwrap();
//!
//! assert_eq!(hazards.len(), 3);
//! assert!(survival[2] < survival[0]);
//! ```

mod sequential;

pub use sequential::{bootstrap_hazard_curve, BootstrapConfig, CdsBootstrapper};
