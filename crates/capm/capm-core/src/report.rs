//! Plain-data view of an analysis for presentation layers.

use std::fmt;

use capm_spi::{BetaMethod, CapmAnalysis, Frequency};
use chrono::NaiveDate;
use serde::Serialize;

/// Headline figures, percentages already scaled by 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapmSummary {
    pub expected_return_pct: f64,
    pub beta: f64,
    pub alpha: f64,
    pub market_return_pct: f64,
    pub market_risk_premium_pct: f64,
    pub risk_free_rate_pct: f64,
    pub r_squared: f64,
    pub observations: usize,
    pub method: BetaMethod,
    pub frequency: Frequency,
}

impl fmt::Display for CapmSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expected return:      {:.2}%", self.expected_return_pct)?;
        writeln!(f, "Beta ({}):    {:.4}", self.method, self.beta)?;
        writeln!(f, "Market return:        {:.2}%", self.market_return_pct)?;
        writeln!(f, "Market risk premium:  {:.2}%", self.market_risk_premium_pct)?;
        writeln!(f, "Risk-free rate:       {:.2}%", self.risk_free_rate_pct)?;
        write!(
            f,
            "Observations:         {} {} returns (R^2 {:.4})",
            self.observations, self.frequency, self.r_squared
        )
    }
}

/// One period of the dataset table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub asset_return_pct: f64,
    pub benchmark_return_pct: f64,
    /// Fitted `beta * benchmark + alpha`.
    pub capm_line_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapmReport {
    pub asset: String,
    pub benchmark: String,
    pub summary: CapmSummary,
    pub rows: Vec<ReportRow>,
}

impl CapmReport {
    pub fn from_analysis(analysis: &CapmAnalysis) -> Self {
        let estimate = &analysis.estimate;
        let beta = estimate.beta();
        let alpha = estimate.alpha();

        let summary = CapmSummary {
            expected_return_pct: estimate.expected_return() * 100.0,
            beta,
            alpha,
            market_return_pct: estimate.market_return_annualized() * 100.0,
            market_risk_premium_pct: estimate.market_risk_premium() * 100.0,
            risk_free_rate_pct: estimate.risk_free_rate() * 100.0,
            r_squared: analysis.regression.r_squared,
            observations: analysis.returns.len(),
            method: analysis.method,
            frequency: analysis.frequency,
        };

        let rows = analysis
            .returns
            .asset()
            .points()
            .iter()
            .zip(analysis.returns.benchmark().points())
            .map(|(a, b)| ReportRow {
                date: a.date,
                asset_return_pct: a.value * 100.0,
                benchmark_return_pct: b.value * 100.0,
                capm_line_pct: (beta * b.value + alpha) * 100.0,
            })
            .collect();

        Self {
            asset: analysis.returns.asset().symbol().to_string(),
            benchmark: analysis.returns.benchmark().symbol().to_string(),
            summary,
            rows,
        }
    }

    /// Summary only, without the dataset table.
    pub fn without_rows(mut self) -> Self {
        self.rows.clear();
        self
    }
}
