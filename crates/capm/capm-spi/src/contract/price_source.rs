//! Price source trait definition.

use crate::error::Result;
use crate::model::{DateRange, PriceSeries};

/// Provider of historical closing prices.
///
/// The estimation pipeline never performs I/O itself; anything that can
/// produce a [`PriceSeries`] (a file, a cache, a market-data vendor) sits
/// behind this trait. Retries and timeouts belong to the implementation.
pub trait PriceSource: Send + Sync {
    /// Price source name.
    fn name(&self) -> &str;

    /// Closing prices for `symbol` restricted to `range`.
    fn fetch(&self, symbol: &str, range: &DateRange) -> Result<PriceSeries>;
}
