//! Price observations and price series.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DateRange;
use crate::error::{CapmError, Result};

/// A single closing price observation.
///
/// A `NaN` price marks a date with no observation, as produced by a
/// multi-instrument download where one instrument did not trade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date
    pub date: NaiveDate,
    /// Closing price, or NaN when missing
    pub price: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// Create a price point from a Unix timestamp in seconds (UTC date).
    pub fn from_timestamp(timestamp: i64, price: f64) -> Result<Self> {
        let date = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| CapmError::InvalidSeries(format!("timestamp {} out of range", timestamp)))?
            .date_naive();
        Ok(Self::new(date, price))
    }

    /// Whether this point carries a usable price.
    pub fn is_available(&self) -> bool {
        !self.price.is_nan()
    }
}

/// Ordered closing prices for one instrument.
///
/// Invariants: dates strictly increasing (no duplicates); every price is
/// either NaN (missing) or finite and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a validated price series.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self> {
        let symbol = symbol.into();

        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(CapmError::InvalidSeries(format!(
                    "{}: dates must be strictly increasing ({} followed by {})",
                    symbol, pair[0].date, pair[1].date
                )));
            }
        }

        if let Some(bad) = points
            .iter()
            .find(|p| p.is_available() && !(p.price.is_finite() && p.price > 0.0))
        {
            return Err(CapmError::InvalidSeries(format!(
                "{}: price {} on {} must be positive and finite",
                symbol, bad.price, bad.date
            )));
        }

        Ok(Self { symbol, points })
    }

    /// Create a series from parallel date and price slices.
    pub fn from_parts(symbol: impl Into<String>, dates: &[NaiveDate], prices: &[f64]) -> Result<Self> {
        let symbol = symbol.into();
        if dates.len() != prices.len() {
            return Err(CapmError::InvalidSeries(format!(
                "{}: {} dates but {} prices",
                symbol,
                dates.len(),
                prices.len()
            )));
        }
        let points = dates
            .iter()
            .zip(prices.iter())
            .map(|(&date, &price)| PricePoint::new(date, price))
            .collect();
        Self::new(symbol, points)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points with a usable price.
    pub fn available_len(&self) -> usize {
        self.points.iter().filter(|p| p.is_available()).count()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Sub-series restricted to `range`. Invariants carry over.
    pub fn clip(&self, range: &DateRange) -> PriceSeries {
        PriceSeries {
            symbol: self.symbol.clone(),
            points: self
                .points
                .iter()
                .filter(|p| range.contains(p.date))
                .copied()
                .collect(),
        }
    }
}
