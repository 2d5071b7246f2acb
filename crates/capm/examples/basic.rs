//! Basic example demonstrating CAPM estimation
//!
//! Run with: cargo run --example basic -p capm-facade

use capm::{BetaMethod, CapmConfig, CapmEstimator, CapmReport, PriceSeries};
use chrono::NaiveDate;

fn month_ends(year: i32) -> Vec<NaiveDate> {
    (1..=12)
        .map(|m| {
            let (y, next) = if m == 12 { (year + 1, 1) } else { (year, m + 1) };
            NaiveDate::from_ymd_opt(y, next, 1).unwrap().pred_opt().unwrap()
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== capm Basic Example ===\n");

    let dates = month_ends(2016);
    let stock = PriceSeries::from_parts(
        "IBM",
        &dates,
        &[
            124.79, 131.03, 151.45, 145.94, 153.74, 151.78, 160.62, 158.88, 158.85, 153.69,
            162.22, 165.99,
        ],
    )?;
    let market = PriceSeries::from_parts(
        "^GSPC",
        &dates,
        &[
            1940.24, 1932.23, 2059.74, 2065.30, 2096.95, 2098.86, 2173.60, 2170.95, 2168.27,
            2126.15, 2198.81, 2238.83,
        ],
    )?;

    // 1. Default configuration: monthly returns, 5% risk-free rate, OLS beta
    let analysis = CapmEstimator::default().analyze(&stock, &market)?;
    println!("1. Regression estimate");
    println!("{}\n", CapmReport::from_analysis(&analysis).summary);

    // 2. Covariance beta with a lower risk-free rate
    let config = CapmConfig::new(0.02).with_beta_method(BetaMethod::Covariance);
    let estimate = CapmEstimator::new(config)?.estimate(&stock, &market)?;
    println!("2. Covariance beta: {:.4}", estimate.beta());
    println!("   Expected return: {:.2}%", estimate.expected_return() * 100.0);

    // 3. Dataset table behind the CAPM line
    println!("\n3. Monthly returns (%)");
    for row in CapmReport::from_analysis(&analysis).rows.iter().take(3) {
        println!(
            "   {}  asset {:>6.2}  market {:>6.2}  capm {:>6.2}",
            row.date, row.asset_return_pct, row.benchmark_return_pct, row.capm_line_pct
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
