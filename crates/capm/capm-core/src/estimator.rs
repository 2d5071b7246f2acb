//! End-to-end CAPM estimation pipeline.
//!
//! raw prices -> resampled prices -> aligned log returns -> beta/alpha ->
//! expected return. Each run is a pure function of its inputs.

use capm_api::CapmConfig;
use capm_spi::{
    AlignedReturns, BetaMethod, CapmAnalysis, CapmEstimate, DateRange, PriceSeries, PriceSource,
    Result,
};

use crate::beta::{covariance_beta, regression_fit, relative_difference, BETA_AGREEMENT_TOLERANCE};
use crate::expected_return::ExpectedReturnCalculator;
use crate::returns::align;

/// CAPM estimator for one (asset, benchmark) pair at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapmEstimator {
    config: CapmConfig,
}

impl CapmEstimator {
    /// Create an estimator. Fails if the configuration is invalid.
    pub fn new(config: CapmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CapmConfig {
        &self.config
    }

    /// Estimate CAPM parameters for `asset` against `benchmark`.
    pub fn estimate(&self, asset: &PriceSeries, benchmark: &PriceSeries) -> Result<CapmEstimate> {
        Ok(self.analyze(asset, benchmark)?.estimate)
    }

    /// Estimate and keep the intermediate data for presentation.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(asset = asset.symbol(), benchmark = benchmark.symbol())
    )]
    pub fn analyze(&self, asset: &PriceSeries, benchmark: &PriceSeries) -> Result<CapmAnalysis> {
        let returns = align(asset, benchmark, self.config.frequency)?;
        self.analyze_returns(returns)
    }

    /// Clip both series to `range`, then analyze.
    pub fn analyze_range(
        &self,
        asset: &PriceSeries,
        benchmark: &PriceSeries,
        range: &DateRange,
    ) -> Result<CapmAnalysis> {
        self.analyze(&asset.clip(range), &benchmark.clip(range))
    }

    /// Fetch both series from `source`, then analyze.
    pub fn analyze_from_source(
        &self,
        source: &dyn PriceSource,
        asset_symbol: &str,
        benchmark_symbol: &str,
        range: &DateRange,
    ) -> Result<CapmAnalysis> {
        tracing::debug!(
            source = source.name(),
            asset = asset_symbol,
            benchmark = benchmark_symbol,
            "fetching price series"
        );
        let asset = source.fetch(asset_symbol, range)?;
        let benchmark = source.fetch(benchmark_symbol, range)?;
        self.analyze(&asset, &benchmark)
    }

    /// Run the estimation stages on already aligned returns.
    pub fn analyze_returns(&self, returns: AlignedReturns) -> Result<CapmAnalysis> {
        let regression = regression_fit(&returns)?;
        let covariance = covariance_beta(&returns)?;

        let difference = relative_difference(regression.beta, covariance);
        if difference > BETA_AGREEMENT_TOLERANCE {
            tracing::warn!(
                regression_beta = regression.beta,
                covariance_beta = covariance,
                difference,
                "beta estimators disagree"
            );
        }

        let beta = match self.config.beta_method {
            BetaMethod::Regression => regression.beta,
            BetaMethod::Covariance => covariance,
        };

        let estimate = ExpectedReturnCalculator::from_config(&self.config).calculate(
            beta,
            regression.alpha,
            returns.benchmark(),
        )?;

        tracing::debug!(
            observations = returns.len(),
            beta,
            alpha = regression.alpha,
            expected_return = estimate.expected_return(),
            method = %self.config.beta_method,
            "estimated CAPM parameters"
        );

        Ok(CapmAnalysis {
            estimate,
            returns,
            regression,
            covariance_beta: covariance,
            method: self.config.beta_method,
            frequency: self.config.frequency,
        })
    }
}

impl Default for CapmEstimator {
    fn default() -> Self {
        Self {
            config: CapmConfig::default(),
        }
    }
}

/// Estimate with the default configuration except for the risk-free rate.
pub fn estimate_capm(
    asset: &PriceSeries,
    benchmark: &PriceSeries,
    risk_free_rate: f64,
) -> Result<CapmEstimate> {
    CapmEstimator::new(CapmConfig::new(risk_free_rate))?.estimate(asset, benchmark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryPriceSource;
    use capm_spi::{CapmError, Frequency};
    use chrono::NaiveDate;

    fn month_ends(count: usize) -> Vec<NaiveDate> {
        (0..count)
            .map(|i| {
                let year = 2016 + (i / 12) as i32;
                let month = (i % 12) as u32 + 1;
                NaiveDate::from_ymd_opt(year, month, 28).unwrap()
            })
            .collect()
    }

    fn benchmark_prices() -> Vec<f64> {
        vec![
            1940.24, 1932.23, 2059.74, 2065.30, 2096.95, 2098.86, 2173.60, 2170.95, 2168.27,
            2126.15, 2198.81, 2238.83, 2278.87,
        ]
    }

    fn asset_prices() -> Vec<f64> {
        vec![
            124.79, 131.03, 151.45, 145.94, 153.74, 151.78, 160.62, 158.88, 158.85, 153.69,
            162.22, 165.99, 174.52,
        ]
    }

    fn series(symbol: &str, prices: &[f64]) -> PriceSeries {
        PriceSeries::from_parts(symbol, &month_ends(prices.len()), prices).unwrap()
    }

    #[test]
    fn test_estimate_is_consistent() {
        let estimator = CapmEstimator::default();
        let analysis = estimator
            .analyze(&series("IBM", &asset_prices()), &series("^GSPC", &benchmark_prices()))
            .unwrap();

        assert_eq!(analysis.returns.len(), 12);
        assert_eq!(analysis.method, BetaMethod::Regression);
        assert_eq!(analysis.estimate.beta(), analysis.regression.beta);
        assert_eq!(analysis.estimate.alpha(), analysis.regression.alpha);
        assert!(relative_difference(analysis.covariance_beta, analysis.regression.beta) < 1e-9);
        assert_eq!(analysis.estimate.risk_free_rate(), 0.05);
    }

    #[test]
    fn test_covariance_method_reports_covariance_beta() {
        let config = CapmConfig::default().with_beta_method(BetaMethod::Covariance);
        let analysis = CapmEstimator::new(config)
            .unwrap()
            .analyze(&series("IBM", &asset_prices()), &series("^GSPC", &benchmark_prices()))
            .unwrap();
        assert_eq!(analysis.estimate.beta(), analysis.covariance_beta);
        assert_eq!(analysis.estimate.alpha(), analysis.regression.alpha);
    }

    #[test]
    fn test_idempotent() {
        let estimator = CapmEstimator::default();
        let asset = series("IBM", &asset_prices());
        let benchmark = series("^GSPC", &benchmark_prices());
        let first = estimator.estimate(&asset, &benchmark).unwrap();
        let second = estimator.estimate(&asset, &benchmark).unwrap();
        assert_eq!(first.beta().to_bits(), second.beta().to_bits());
        assert_eq!(first.expected_return().to_bits(), second.expected_return().to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CapmConfig::default();
        config.annualization_factor = -1.0;
        assert!(CapmEstimator::new(config).is_err());
    }

    #[test]
    fn test_range_clipping() {
        let estimator = CapmEstimator::default();
        let dates = month_ends(13);
        let range = DateRange::between(dates[0], dates[6]).unwrap();
        let analysis = estimator
            .analyze_range(
                &series("IBM", &asset_prices()),
                &series("^GSPC", &benchmark_prices()),
                &range,
            )
            .unwrap();
        assert_eq!(analysis.returns.len(), 6);
    }

    #[test]
    fn test_from_source() {
        let source = InMemoryPriceSource::new()
            .with_series(series("IBM", &asset_prices()))
            .with_series(series("^GSPC", &benchmark_prices()));
        let estimator = CapmEstimator::default();

        let from_source = estimator
            .analyze_from_source(&source, "IBM", "^GSPC", &DateRange::all())
            .unwrap();
        let direct = estimator
            .analyze(&series("IBM", &asset_prices()), &series("^GSPC", &benchmark_prices()))
            .unwrap();
        assert_eq!(from_source.estimate, direct.estimate);
    }

    #[test]
    fn test_from_source_unknown_symbol() {
        let source = InMemoryPriceSource::new().with_series(series("IBM", &asset_prices()));
        let result = CapmEstimator::default().analyze_from_source(
            &source,
            "IBM",
            "^GSPC",
            &DateRange::all(),
        );
        assert!(matches!(result, Err(CapmError::SourceError(_))));
    }

    #[test]
    fn test_constant_benchmark_growth_is_degenerate() {
        // Both series grow at a constant rate: the benchmark return never varies.
        let asset = series("A", &[100.0, 110.0, 121.0]);
        let benchmark = series("B", &[1000.0, 1050.0, 1102.5]);
        let result = CapmEstimator::default().estimate(&asset, &benchmark);
        assert!(matches!(result, Err(CapmError::DegenerateVariance { .. })));
    }

    #[test]
    fn test_quarterly_frequency() {
        let estimator = CapmEstimator::new(CapmConfig::quarterly()).unwrap();
        let analysis = estimator
            .analyze(&series("IBM", &asset_prices()), &series("^GSPC", &benchmark_prices()))
            .unwrap();
        // 13 months span 5 quarters -> 4 quarterly returns
        assert_eq!(analysis.returns.len(), 4);
        assert_eq!(analysis.frequency, Frequency::Quarterly);
    }

    #[test]
    fn test_estimate_capm_helper() {
        let estimate = estimate_capm(
            &series("IBM", &asset_prices()),
            &series("^GSPC", &benchmark_prices()),
            0.01,
        )
        .unwrap();
        assert_eq!(estimate.risk_free_rate(), 0.01);
    }
}
