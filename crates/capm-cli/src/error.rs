//! CLI error type.

use std::path::PathBuf;

use capm::CapmError;

/// Error type for the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}, column '{column}': invalid price '{value}'")]
    InvalidPrice {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("No price columns in {0}")]
    NoPriceColumns(PathBuf),

    #[error(transparent)]
    Capm(#[from] CapmError),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;
