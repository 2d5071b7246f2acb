//! Data models for CAPM estimation.

mod estimate;
mod frequency;
mod price;
mod range;
mod returns;

pub use estimate::*;
pub use frequency::*;
pub use price::*;
pub use range::*;
pub use returns::*;
