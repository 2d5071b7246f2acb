//! Trait contracts for CAPM estimation.

mod beta_estimator;
mod price_source;

pub use beta_estimator::*;
pub use price_source::*;
