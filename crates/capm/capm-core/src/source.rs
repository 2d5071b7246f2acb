//! In-memory price source.

use std::collections::HashMap;

use capm_spi::{CapmError, DateRange, PriceSeries, PriceSource, Result};

/// Price source backed by series already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSource {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series under its own symbol, replacing any previous one.
    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.symbol().to_string(), series);
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.series.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }
}

impl PriceSource for InMemoryPriceSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch(&self, symbol: &str, range: &DateRange) -> Result<PriceSeries> {
        self.series
            .get(symbol)
            .map(|series| series.clip(range))
            .ok_or_else(|| CapmError::SourceError(format!("unknown symbol '{}'", symbol)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(symbol: &str) -> PriceSeries {
        PriceSeries::from_parts(
            symbol,
            &[date(2016, 1, 29), date(2016, 2, 29), date(2016, 3, 31)],
            &[1.0, 2.0, 3.0],
        )
        .unwrap()
    }

    #[test]
    fn test_fetch_known_symbol() {
        let source = InMemoryPriceSource::new().with_series(series("IBM"));
        let fetched = source.fetch("IBM", &DateRange::all()).unwrap();
        assert_eq!(fetched.len(), 3);
    }

    #[test]
    fn test_fetch_clips_to_range() {
        let source = InMemoryPriceSource::new().with_series(series("IBM"));
        let range = DateRange::new(Some(date(2016, 2, 1)), None).unwrap();
        assert_eq!(source.fetch("IBM", &range).unwrap().len(), 2);
    }

    #[test]
    fn test_fetch_unknown_symbol() {
        let source = InMemoryPriceSource::new();
        assert!(matches!(
            source.fetch("IBM", &DateRange::all()),
            Err(CapmError::SourceError(_))
        ));
    }

    #[test]
    fn test_symbols_sorted() {
        let source = InMemoryPriceSource::new()
            .with_series(series("^GSPC"))
            .with_series(series("AAPL"));
        assert_eq!(source.symbols(), vec!["AAPL", "^GSPC"]);
        assert_eq!(source.name(), "memory");
    }
}
