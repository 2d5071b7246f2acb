//! Calendar resampling of raw prices.

use capm_spi::{Frequency, PriceSeries};
use chrono::NaiveDate;

/// Last available price of one calendar period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodPrice {
    /// Ordinal of the period, see [`Frequency::period_index`]
    pub period: i64,
    /// Period-end label
    pub date: NaiveDate,
    pub price: f64,
}

/// Resample to one observation per period: the last available price.
///
/// Missing (NaN) prices are skipped, so a period whose prices are all
/// missing yields no observation at all.
pub fn resample(series: &PriceSeries, frequency: Frequency) -> Vec<PeriodPrice> {
    let mut resampled: Vec<PeriodPrice> = Vec::new();

    for point in series.points().iter().filter(|p| p.is_available()) {
        let period = frequency.period_index(point.date);
        match resampled.last_mut() {
            Some(last) if last.period == period => last.price = point.price,
            _ => resampled.push(PeriodPrice {
                period,
                date: frequency.period_end(point.date),
                price: point.price,
            }),
        }
    }

    resampled
}
