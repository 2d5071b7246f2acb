//! Log-return series and index-aligned return pairs.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CapmError, Result};

/// A single periodic log return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnPoint {
    /// Period-end date the return is labelled with
    pub date: NaiveDate,
    /// `ln(p[t] / p[t-1])`
    pub value: f64,
}

impl ReturnPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Ordered log returns for one instrument.
///
/// Invariants: dates strictly increasing, every value finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    symbol: String,
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    /// Create a validated return series.
    pub fn new(symbol: impl Into<String>, points: Vec<ReturnPoint>) -> Result<Self> {
        let symbol = symbol.into();
        if points.windows(2).any(|w| w[1].date <= w[0].date) {
            return Err(CapmError::InvalidSeries(format!(
                "{}: return dates must be strictly increasing",
                symbol
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(CapmError::InvalidSeries(format!(
                "{}: non-finite return on {}",
                symbol, bad.date
            )));
        }
        Ok(Self { symbol, points })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Arithmetic mean of the returns, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.iter().map(|p| p.value).sum::<f64>() / self.points.len() as f64)
    }
}

/// Asset and benchmark returns on one shared calendar.
///
/// Invariant: both series have the same length and the same dates in the
/// same order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedReturns {
    asset: ReturnSeries,
    benchmark: ReturnSeries,
}

impl AlignedReturns {
    pub fn new(asset: ReturnSeries, benchmark: ReturnSeries) -> Result<Self> {
        if asset.len() != benchmark.len() {
            return Err(CapmError::InvalidSeries(format!(
                "aligned series differ in length: {} has {}, {} has {}",
                asset.symbol(),
                asset.len(),
                benchmark.symbol(),
                benchmark.len()
            )));
        }
        let same_calendar = asset
            .points()
            .iter()
            .zip(benchmark.points())
            .all(|(a, b)| a.date == b.date);
        if !same_calendar {
            return Err(CapmError::InvalidSeries(format!(
                "{} and {} are not on the same calendar",
                asset.symbol(),
                benchmark.symbol()
            )));
        }
        Ok(Self { asset, benchmark })
    }

    pub fn asset(&self) -> &ReturnSeries {
        &self.asset
    }

    pub fn benchmark(&self) -> &ReturnSeries {
        &self.benchmark
    }

    pub fn asset_returns(&self) -> Vec<f64> {
        self.asset.values()
    }

    pub fn benchmark_returns(&self) -> Vec<f64> {
        self.benchmark.values()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.asset.dates()
    }

    pub fn len(&self) -> usize {
        self.asset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asset.is_empty()
    }
}
