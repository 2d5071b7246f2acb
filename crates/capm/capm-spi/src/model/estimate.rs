//! Estimation results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{AlignedReturns, Frequency};
use crate::error::CapmError;

/// Which beta strategy supplies the reported beta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetaMethod {
    /// `Cov(asset, benchmark) / Var(benchmark)`
    Covariance,
    /// Slope of the OLS fit of asset on benchmark returns
    #[default]
    Regression,
}

impl fmt::Display for BetaMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetaMethod::Covariance => write!(f, "covariance"),
            BetaMethod::Regression => write!(f, "regression"),
        }
    }
}

impl FromStr for BetaMethod {
    type Err = CapmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "covariance" | "cov" => Ok(BetaMethod::Covariance),
            "regression" | "ols" => Ok(BetaMethod::Regression),
            other => Err(CapmError::invalid_parameter(
                "beta_method",
                format!("unknown method '{}', use covariance or regression", other),
            )),
        }
    }
}

/// Simple linear regression of asset returns on benchmark returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionFit {
    /// Slope
    pub beta: f64,
    /// Intercept, per period
    pub alpha: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Number of aligned returns used
    pub observations: usize,
}

impl RegressionFit {
    /// Fitted asset return for a given benchmark return.
    pub fn predict(&self, benchmark_return: f64) -> f64 {
        self.beta * benchmark_return + self.alpha
    }
}

/// Result of one CAPM estimation run. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapmEstimate {
    beta: f64,
    alpha: f64,
    market_return_annualized: f64,
    market_risk_premium: f64,
    expected_return: f64,
    risk_free_rate: f64,
}

impl CapmEstimate {
    /// Assemble an estimate from already computed components.
    pub fn from_parts(
        beta: f64,
        alpha: f64,
        market_return_annualized: f64,
        market_risk_premium: f64,
        expected_return: f64,
        risk_free_rate: f64,
    ) -> Self {
        Self {
            beta,
            alpha,
            market_return_annualized,
            market_risk_premium,
            expected_return,
            risk_free_rate,
        }
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn market_return_annualized(&self) -> f64 {
        self.market_return_annualized
    }

    pub fn market_risk_premium(&self) -> f64 {
        self.market_risk_premium
    }

    pub fn expected_return(&self) -> f64 {
        self.expected_return
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }
}

/// Everything a presentation layer needs from one run: the estimate, the
/// returns it was computed from and both beta estimates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapmAnalysis {
    pub estimate: CapmEstimate,
    pub returns: AlignedReturns,
    pub regression: RegressionFit,
    pub covariance_beta: f64,
    pub method: BetaMethod,
    pub frequency: Frequency,
}
