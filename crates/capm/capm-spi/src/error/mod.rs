//! Error types for CAPM estimation.
//!
//! This module contains error types and the Result alias.

mod capm_error;

pub use capm_error::{CapmError, Result};
