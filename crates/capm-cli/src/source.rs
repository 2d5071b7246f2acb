//! CSV-backed price source.
//!
//! Reads a wide table: a date column followed by one closing-price column per
//! ticker, the layout of a multi-ticker download. Blank cells mark days on
//! which a ticker did not trade.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use capm::{CapmError, DateRange, PriceSeries, PriceSource};
use chrono::NaiveDate;

use crate::error::{CliError, CliResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    name: String,
    dates: Vec<NaiveDate>,
    columns: HashMap<String, Vec<f64>>,
}

impl CsvPriceSource {
    /// Load every column of `path` into memory.
    pub fn open(path: &Path) -> CliResult<Self> {
        let file = File::open(path).map_err(|e| CliError::io(path, e))?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let headers = reader.headers()?.clone();
        let tickers: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();
        if tickers.is_empty() {
            return Err(CliError::NoPriceColumns(PathBuf::from(path)));
        }
        for (index, ticker) in tickers.iter().enumerate() {
            if tickers[..index].contains(ticker) {
                return Err(CliError::DuplicateColumn(ticker.clone()));
            }
        }

        let mut dates = Vec::new();
        let mut values: Vec<Vec<f64>> = vec![Vec::new(); tickers.len()];

        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let row = index + 1;

            let raw_date = record.get(0).unwrap_or_default().trim();
            dates.push(parse_date(raw_date).ok_or_else(|| CliError::InvalidDate {
                row,
                value: raw_date.to_string(),
            })?);

            for (column, ticker) in tickers.iter().enumerate() {
                let raw = record.get(column + 1).unwrap_or_default().trim();
                let price = parse_price(raw).ok_or_else(|| CliError::InvalidPrice {
                    row,
                    column: ticker.clone(),
                    value: raw.to_string(),
                })?;
                values[column].push(price);
            }
        }

        tracing::debug!(
            path = %path.display(),
            rows = dates.len(),
            tickers = tickers.len(),
            "loaded price table"
        );

        Ok(Self {
            name: path.display().to_string(),
            dates,
            columns: tickers.into_iter().zip(values).collect(),
        })
    }

    pub fn tickers(&self) -> Vec<&str> {
        let mut tickers: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        tickers.sort_unstable();
        tickers
    }

    pub fn rows(&self) -> usize {
        self.dates.len()
    }
}

/// Accepts `YYYY-MM-DD` optionally followed by a time part.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

fn parse_price(raw: &str) -> Option<f64> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return Some(f64::NAN);
    }
    raw.parse::<f64>().ok()
}

impl PriceSource for CsvPriceSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, symbol: &str, range: &DateRange) -> capm::Result<PriceSeries> {
        let prices = self.columns.get(symbol).ok_or_else(|| {
            CapmError::SourceError(format!("no column '{}' in {}", symbol, self.name))
        })?;
        Ok(PriceSeries::from_parts(symbol, &self.dates, prices)?.clip(range))
    }
}
