//! CAPM Estimation Core
//!
//! Implementations for the estimation pipeline:
//!
//! - [`resample`]: one price per calendar period
//! - [`returns`]: log returns and calendar alignment
//! - [`beta`]: covariance-ratio and OLS beta estimators
//! - [`expected_return`]: the CAPM formula
//! - [`estimator`]: the end-to-end pipeline
//! - [`report`]: plain-data summary and dataset for presentation layers
//! - [`source`]: in-memory price source

pub mod beta;
pub mod estimator;
pub mod expected_return;
pub mod report;
pub mod resample;
pub mod returns;
pub mod source;

pub use beta::*;
pub use estimator::*;
pub use expected_return::*;
pub use report::*;
pub use resample::*;
pub use returns::*;
pub use source::*;
