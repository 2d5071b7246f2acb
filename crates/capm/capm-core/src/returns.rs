//! Log returns and asset/benchmark calendar alignment.

use capm_spi::{AlignedReturns, CapmError, Frequency, PriceSeries, Result, ReturnPoint, ReturnSeries};
use chrono::NaiveDate;

use crate::resample::{resample, PeriodPrice};

/// Fewest resampled prices a series needs before differencing.
pub const MIN_PRICE_OBSERVATIONS: usize = 2;

/// Calculate log returns from prices.
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    if prices.len() < 2 {
        return Vec::new();
    }

    prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// Rebuild prices from a starting price and successive log returns.
pub fn reconstruct_prices(first_price: f64, returns: &[f64]) -> Vec<f64> {
    let mut prices = Vec::with_capacity(returns.len() + 1);
    prices.push(first_price);
    let mut current = first_price;
    for r in returns {
        current *= r.exp();
        prices.push(current);
    }
    prices
}

fn require_observations(symbol: &str, got: usize) -> Result<()> {
    if got < MIN_PRICE_OBSERVATIONS {
        return Err(CapmError::insufficient(symbol, MIN_PRICE_OBSERVATIONS, got));
    }
    Ok(())
}

/// Log returns of one series on its own resampled calendar.
///
/// A return exists only between two consecutive periods; the first period
/// and any period following a gap are dropped.
pub fn build_return_series(series: &PriceSeries, frequency: Frequency) -> Result<ReturnSeries> {
    let resampled = resample(series, frequency);
    require_observations(series.symbol(), resampled.len())?;

    let points = resampled
        .windows(2)
        .filter(|w| w[1].period - w[0].period == 1)
        .map(|w| ReturnPoint::new(w[1].date, (w[1].price / w[0].price).ln()))
        .filter(|p| p.value.is_finite())
        .collect();

    ReturnSeries::new(series.symbol(), points)
}

/// One period present in both resampled series.
#[derive(Debug, Clone, Copy)]
struct JoinedPeriod {
    period: i64,
    date: NaiveDate,
    asset: f64,
    benchmark: f64,
}

fn inner_join(asset: &[PeriodPrice], benchmark: &[PeriodPrice]) -> Vec<JoinedPeriod> {
    let mut joined = Vec::with_capacity(asset.len().min(benchmark.len()));
    let (mut i, mut j) = (0, 0);

    while i < asset.len() && j < benchmark.len() {
        let (a, b) = (asset[i], benchmark[j]);
        if a.period < b.period {
            i += 1;
        } else if a.period > b.period {
            j += 1;
        } else {
            joined.push(JoinedPeriod {
                period: a.period,
                date: a.date,
                asset: a.price,
                benchmark: b.price,
            });
            i += 1;
            j += 1;
        }
    }

    joined
}

/// Build index-aligned asset and benchmark log returns.
///
/// Both series are resampled to `frequency`, inner-joined on the period
/// label and differenced. Returns that would span a period missing from
/// either series are dropped rather than forward-filled.
pub fn align(asset: &PriceSeries, benchmark: &PriceSeries, frequency: Frequency) -> Result<AlignedReturns> {
    let asset_prices = resample(asset, frequency);
    let benchmark_prices = resample(benchmark, frequency);

    tracing::debug!(
        asset = asset.symbol(),
        benchmark = benchmark.symbol(),
        %frequency,
        asset_periods = asset_prices.len(),
        benchmark_periods = benchmark_prices.len(),
        "resampled price series"
    );

    require_observations(asset.symbol(), asset_prices.len())?;
    require_observations(benchmark.symbol(), benchmark_prices.len())?;

    let joined = inner_join(&asset_prices, &benchmark_prices);
    if joined.is_empty() {
        return Err(CapmError::MisalignedSeries {
            asset_periods: asset_prices.len(),
            benchmark_periods: benchmark_prices.len(),
        });
    }
    require_observations("aligned prices", joined.len())?;

    let mut asset_points = Vec::with_capacity(joined.len() - 1);
    let mut benchmark_points = Vec::with_capacity(joined.len() - 1);
    for w in joined.windows(2) {
        if w[1].period - w[0].period != 1 {
            continue;
        }
        let asset_return = (w[1].asset / w[0].asset).ln();
        let benchmark_return = (w[1].benchmark / w[0].benchmark).ln();
        if asset_return.is_finite() && benchmark_return.is_finite() {
            asset_points.push(ReturnPoint::new(w[1].date, asset_return));
            benchmark_points.push(ReturnPoint::new(w[1].date, benchmark_return));
        }
    }

    if asset_points.is_empty() {
        return Err(CapmError::insufficient("aligned returns", 1, 0));
    }

    tracing::debug!(
        joined_periods = joined.len(),
        aligned_returns = asset_points.len(),
        "aligned return series"
    );

    AlignedReturns::new(
        ReturnSeries::new(asset.symbol(), asset_points)?,
        ReturnSeries::new(benchmark.symbol(), benchmark_points)?,
    )
}
