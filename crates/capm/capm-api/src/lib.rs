//! CAPM Estimation API
//!
//! Configuration types and builders for the estimation pipeline.

mod config;

pub use config::*;
