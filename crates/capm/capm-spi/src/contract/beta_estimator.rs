//! Beta estimator trait.

use crate::error::Result;
use crate::model::AlignedReturns;

/// Strategy that estimates an asset's beta against its benchmark.
pub trait BetaEstimator: Send + Sync {
    /// Estimator name.
    fn name(&self) -> &str;

    /// Estimate beta from index-aligned returns.
    ///
    /// Implementations must fail rather than return a placeholder when beta
    /// is undefined.
    fn beta(&self, returns: &AlignedReturns) -> Result<f64>;
}
