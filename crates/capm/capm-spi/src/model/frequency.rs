//! Resampling frequencies for return series.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CapmError;

/// Calendar frequency that raw prices are resampled to before differencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Weeks ending on Sunday
    Weekly,
    /// Calendar months
    #[default]
    Monthly,
    /// Calendar quarters
    Quarterly,
}

impl Frequency {
    /// Number of periods in one year.
    pub fn periods_per_year(&self) -> f64 {
        match self {
            Frequency::Weekly => 52.0,
            Frequency::Monthly => 12.0,
            Frequency::Quarterly => 4.0,
        }
    }

    /// Label of the period containing `date`: the last calendar day of the period.
    pub fn period_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Weekly => {
                let to_sunday = 6 - u64::from(date.weekday().num_days_from_monday());
                date.checked_add_days(Days::new(to_sunday)).unwrap_or(date)
            }
            Frequency::Monthly => last_day_of_month(date.year(), date.month()).unwrap_or(date),
            Frequency::Quarterly => {
                let quarter_end_month = (date.month0() / 3) * 3 + 3;
                last_day_of_month(date.year(), quarter_end_month).unwrap_or(date)
            }
        }
    }

    /// Ordinal of the period containing `date`.
    ///
    /// Consecutive periods differ by exactly one, which is how gaps in a
    /// resampled calendar are detected.
    pub fn period_index(&self, date: NaiveDate) -> i64 {
        match self {
            // Day 1 of the common era is a Monday, so every Sunday is a multiple of 7.
            Frequency::Weekly => i64::from(self.period_end(date).num_days_from_ce()) / 7,
            Frequency::Monthly => i64::from(date.year()) * 12 + i64::from(date.month0()),
            Frequency::Quarterly => i64::from(date.year()) * 4 + i64::from(date.month0() / 3),
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Frequency {
    type Err = CapmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "w" | "1wk" => Ok(Frequency::Weekly),
            "monthly" | "m" | "1mo" => Ok(Frequency::Monthly),
            "quarterly" | "q" | "3mo" => Ok(Frequency::Quarterly),
            other => Err(CapmError::invalid_parameter(
                "frequency",
                format!("unknown frequency '{}', use weekly, monthly or quarterly", other),
            )),
        }
    }
}
