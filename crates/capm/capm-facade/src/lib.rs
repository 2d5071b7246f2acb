//! CAPM Estimation Facade
//!
//! Unified re-exports for the CAPM module.
//!
//! This facade provides access to all estimation components:
//! - `returns` - Resampling, log returns and calendar alignment
//! - `beta` - Covariance-ratio and regression beta estimators
//! - `expected_return` - The CAPM formula
//! - `estimator` - End-to-end pipeline (CapmEstimator, CapmAnalysis)
//! - `report` - Summary and dataset table for presentation
//! - `source` - Price source contract and in-memory implementation

// Re-export everything from SPI (traits, errors, types)
pub use capm_spi::*;

// Re-export everything from API (configs)
pub use capm_api::*;

// Re-export everything from Core (implementations)
pub use capm_core::*;
