//! Inclusive date windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CapmError, Result};

/// Inclusive `[start, end]` window. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Window covering every date.
    pub fn all() -> Self {
        Self::default()
    }

    /// Closed window. Fails when `start` is after `end`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(Some(start), Some(end))
    }

    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(CapmError::invalid_parameter(
                    "date_range",
                    format!("start {} is after end {}", s, e),
                ));
            }
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}
