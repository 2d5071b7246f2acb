//! Beta estimation strategies.
//!
//! With a single regressor the OLS slope equals the covariance ratio, so the
//! two strategies agree up to floating-point evaluation order and serve as a
//! cross-check for each other.

use capm_spi::{AlignedReturns, BetaEstimator, BetaMethod, CapmError, RegressionFit, Result};

/// Fewest aligned returns for a sample covariance (denominator n - 1).
pub const MIN_RETURN_OBSERVATIONS: usize = 2;

/// Benchmark variance at or below this fraction of its mean square is
/// treated as zero.
const DEGENERATE_TOLERANCE: f64 = 1e-14;

/// Relative tolerance within which both strategies must agree.
pub const BETA_AGREEMENT_TOLERANCE: f64 = 1e-9;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn check_inputs(asset: &[f64], benchmark: &[f64]) -> Result<()> {
    if asset.len() != benchmark.len() {
        return Err(CapmError::invalid_parameter(
            "returns",
            format!(
                "asset has {} returns but benchmark has {}",
                asset.len(),
                benchmark.len()
            ),
        ));
    }
    if asset.len() < MIN_RETURN_OBSERVATIONS {
        return Err(CapmError::insufficient(
            "aligned returns",
            MIN_RETURN_OBSERVATIONS,
            asset.len(),
        ));
    }
    Ok(())
}

fn ensure_benchmark_varies(benchmark: &[f64], variance: f64) -> Result<()> {
    let mean_square = benchmark.iter().map(|b| b * b).sum::<f64>() / benchmark.len() as f64;
    if !(variance > DEGENERATE_TOLERANCE * mean_square) {
        return Err(CapmError::DegenerateVariance { variance });
    }
    Ok(())
}

/// Sample covariance matrix of `(asset, benchmark)`.
///
/// `[0][0]` is the asset variance, `[1][1]` the benchmark variance and the
/// off-diagonal entries the covariance.
pub fn covariance_matrix(asset: &[f64], benchmark: &[f64]) -> Result<[[f64; 2]; 2]> {
    check_inputs(asset, benchmark)?;

    let mean_a = mean(asset);
    let mean_b = mean(benchmark);
    let ddof = (asset.len() - 1) as f64;

    let mut s_aa = 0.0;
    let mut s_ab = 0.0;
    let mut s_bb = 0.0;
    for (a, b) in asset.iter().zip(benchmark) {
        let da = a - mean_a;
        let db = b - mean_b;
        s_aa += da * da;
        s_ab += da * db;
        s_bb += db * db;
    }

    let cov = s_ab / ddof;
    Ok([[s_aa / ddof, cov], [cov, s_bb / ddof]])
}

/// Beta as `Cov(asset, benchmark) / Var(benchmark)`.
pub fn covariance_beta(returns: &AlignedReturns) -> Result<f64> {
    let benchmark = returns.benchmark_returns();
    let matrix = covariance_matrix(&returns.asset_returns(), &benchmark)?;
    ensure_benchmark_varies(&benchmark, matrix[1][1])?;
    Ok(matrix[0][1] / matrix[1][1])
}

/// Closed-form OLS fit of asset returns on benchmark returns.
pub fn regression_fit(returns: &AlignedReturns) -> Result<RegressionFit> {
    let y = returns.asset_returns();
    let x = returns.benchmark_returns();
    check_inputs(&y, &x)?;

    let n = x.len();
    let mean_x = mean(&x);
    let mean_y = mean(&y);

    // Centered sums keep the solve stable for returns clustered near their mean.
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (xi, yi) in x.iter().zip(&y) {
        let dx = xi - mean_x;
        sxx += dx * dx;
        sxy += dx * (yi - mean_y);
    }
    ensure_benchmark_varies(&x, sxx / (n - 1) as f64)?;

    let beta = sxy / sxx;
    let alpha = mean_y - beta * mean_x;

    let ss_tot: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
    let ss_res: f64 = x
        .iter()
        .zip(&y)
        .map(|(xi, yi)| (yi - (alpha + beta * xi)).powi(2))
        .sum();
    let r_squared = if ss_tot > 1e-20 { 1.0 - ss_res / ss_tot } else { 1.0 };

    Ok(RegressionFit {
        beta,
        alpha,
        r_squared,
        observations: n,
    })
}

/// Relative difference between two beta estimates.
pub fn relative_difference(a: f64, b: f64) -> f64 {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        0.0
    } else {
        (a - b).abs() / scale
    }
}

/// Covariance-ratio beta estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CovarianceBeta;

impl CovarianceBeta {
    pub fn new() -> Self {
        Self
    }
}

impl BetaEstimator for CovarianceBeta {
    fn name(&self) -> &str {
        "covariance"
    }

    fn beta(&self, returns: &AlignedReturns) -> Result<f64> {
        covariance_beta(returns)
    }
}

/// OLS regression beta estimator. Also yields alpha.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegressionBeta;

impl RegressionBeta {
    pub fn new() -> Self {
        Self
    }

    /// Full regression fit, including alpha and R².
    pub fn fit(&self, returns: &AlignedReturns) -> Result<RegressionFit> {
        regression_fit(returns)
    }
}

impl BetaEstimator for RegressionBeta {
    fn name(&self) -> &str {
        "regression"
    }

    fn beta(&self, returns: &AlignedReturns) -> Result<f64> {
        Ok(regression_fit(returns)?.beta)
    }
}

/// Estimator implementing `method`.
pub fn estimator_for(method: BetaMethod) -> Box<dyn BetaEstimator> {
    match method {
        BetaMethod::Covariance => Box::new(CovarianceBeta::new()),
        BetaMethod::Regression => Box::new(RegressionBeta::new()),
    }
}
