//! CAPM expected return.

use capm_api::CapmConfig;
use capm_spi::{CapmError, CapmEstimate, Result, ReturnSeries};

/// Mean periodic benchmark return scaled to one year.
pub fn annualized_market_return(benchmark: &ReturnSeries, annualization_factor: f64) -> Result<f64> {
    if !(annualization_factor.is_finite() && annualization_factor > 0.0) {
        return Err(CapmError::invalid_parameter(
            "annualization_factor",
            "must be positive",
        ));
    }
    let mean = benchmark
        .mean()
        .ok_or_else(|| CapmError::insufficient(benchmark.symbol(), 1, 0))?;
    Ok(mean * annualization_factor)
}

/// Apply the CAPM formula.
///
/// `expected = rf + beta * (market_annualized - rf)`. Alpha is carried along
/// for display and does not enter the formula.
pub fn expected_return(
    beta: f64,
    alpha: f64,
    benchmark: &ReturnSeries,
    risk_free_rate: f64,
    annualization_factor: f64,
) -> Result<CapmEstimate> {
    if !beta.is_finite() {
        return Err(CapmError::invalid_parameter("beta", format!("{} is not finite", beta)));
    }
    if !alpha.is_finite() {
        return Err(CapmError::invalid_parameter("alpha", format!("{} is not finite", alpha)));
    }
    if !risk_free_rate.is_finite() {
        return Err(CapmError::invalid_parameter(
            "risk_free_rate",
            format!("{} is not finite", risk_free_rate),
        ));
    }

    let market_return_annualized = annualized_market_return(benchmark, annualization_factor)?;
    let market_risk_premium = market_return_annualized - risk_free_rate;
    let expected = risk_free_rate + beta * market_risk_premium;

    Ok(CapmEstimate::from_parts(
        beta,
        alpha,
        market_return_annualized,
        market_risk_premium,
        expected,
        risk_free_rate,
    ))
}

/// Expected return calculator bound to a risk-free rate and annualization factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedReturnCalculator {
    risk_free_rate: f64,
    annualization_factor: f64,
}

impl ExpectedReturnCalculator {
    pub fn new(risk_free_rate: f64, annualization_factor: f64) -> Self {
        Self {
            risk_free_rate,
            annualization_factor,
        }
    }

    pub fn from_config(config: &CapmConfig) -> Self {
        Self::new(config.risk_free_rate, config.annualization_factor)
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    pub fn annualization_factor(&self) -> f64 {
        self.annualization_factor
    }

    pub fn calculate(&self, beta: f64, alpha: f64, benchmark: &ReturnSeries) -> Result<CapmEstimate> {
        expected_return(
            beta,
            alpha,
            benchmark,
            self.risk_free_rate,
            self.annualization_factor,
        )
    }
}

impl Default for ExpectedReturnCalculator {
    fn default() -> Self {
        Self::from_config(&CapmConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capm_spi::ReturnPoint;
    use chrono::NaiveDate;

    fn benchmark(values: &[f64]) -> ReturnSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                ReturnPoint::new(NaiveDate::from_ymd_opt(2016, i as u32 + 1, 28).unwrap(), v)
            })
            .collect();
        ReturnSeries::new("^GSPC", points).unwrap()
    }

    #[test]
    fn test_annualized_market_return() {
        let series = benchmark(&[0.01, 0.02, 0.03]);
        let annual = annualized_market_return(&series, 12.0).unwrap();
        assert!((annual - 0.24).abs() < 1e-12);
    }

    #[test]
    fn test_formula_identity_holds_exactly() {
        let series = benchmark(&[0.012, -0.004, 0.009, 0.015]);
        let estimate = expected_return(1.37, 0.001, &series, 0.05, 12.0).unwrap();

        assert_eq!(
            estimate.expected_return(),
            estimate.risk_free_rate()
                + estimate.beta() * (estimate.market_return_annualized() - estimate.risk_free_rate())
        );
        assert_eq!(
            estimate.market_risk_premium(),
            estimate.market_return_annualized() - estimate.risk_free_rate()
        );
    }

    #[test]
    fn test_known_values() {
        // mean 0.01 per month -> 12% a year; premium 7%; expected 5% + 1.5 * 7%
        let series = benchmark(&[0.005, 0.015, 0.01]);
        let estimate = expected_return(1.5, 0.0, &series, 0.05, 12.0).unwrap();
        assert!((estimate.market_return_annualized() - 0.12).abs() < 1e-12);
        assert!((estimate.market_risk_premium() - 0.07).abs() < 1e-12);
        assert!((estimate.expected_return() - 0.155).abs() < 1e-12);
    }

    #[test]
    fn test_zero_beta_returns_risk_free_rate() {
        let series = benchmark(&[0.02, -0.01]);
        let estimate = expected_return(0.0, 0.0, &series, 0.03, 12.0).unwrap();
        assert_eq!(estimate.expected_return(), 0.03);
    }

    #[test]
    fn test_empty_benchmark_fails() {
        let series = ReturnSeries::new("^GSPC", Vec::new()).unwrap();
        let result = expected_return(1.0, 0.0, &series, 0.05, 12.0);
        assert!(matches!(result, Err(CapmError::InsufficientData { .. })));
    }

    #[test]
    fn test_nan_beta_fails() {
        let series = benchmark(&[0.01, 0.02]);
        let result = expected_return(f64::NAN, 0.0, &series, 0.05, 12.0);
        assert!(matches!(result, Err(CapmError::InvalidParameter { .. })));
    }

    #[test]
    fn test_bad_annualization_factor_fails() {
        let series = benchmark(&[0.01, 0.02]);
        assert!(expected_return(1.0, 0.0, &series, 0.05, 0.0).is_err());
        assert!(annualized_market_return(&series, f64::INFINITY).is_err());
    }

    #[test]
    fn test_calculator_uses_config() {
        let config = CapmConfig::quarterly().with_risk_free_rate(0.02);
        let calculator = ExpectedReturnCalculator::from_config(&config);
        assert_eq!(calculator.risk_free_rate(), 0.02);
        assert_eq!(calculator.annualization_factor(), 4.0);

        let series = benchmark(&[0.03, 0.01]);
        let estimate = calculator.calculate(1.0, 0.0, &series).unwrap();
        assert!((estimate.market_return_annualized() - 0.08).abs() < 1e-12);
        assert!((estimate.expected_return() - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_default_calculator() {
        let calculator = ExpectedReturnCalculator::default();
        assert_eq!(calculator.risk_free_rate(), 0.05);
        assert_eq!(calculator.annualization_factor(), 12.0);
    }
}
