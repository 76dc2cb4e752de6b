//! Market curves consumed by the bootstrap.
//!
//! - [`DiscountCurve`]: Risk-free zero-rate curve queried for discount factors

mod discount;

pub use discount::DiscountCurve;
