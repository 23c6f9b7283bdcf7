//! Error type shared by every step of the pipeline.

use polars::prelude::PolarsError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AnalysisError {
    /// The input file does not exist.
    FileNotFound { path: PathBuf },
    /// I/O failure other than a missing input.
    Io(std::io::Error),
    /// Reading, casting or aggregating the table failed.
    Polars(PolarsError),
    /// A `Date` cell does not match the timestamp format. `row` is 1-based.
    InvalidTimestamp { row: usize, value: String },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => write!(
                f,
                "{} not found. Please ensure the file is in the same directory.",
                path.display()
            ),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Polars(e) => write!(f, "table error: {e}"),
            Self::InvalidTimestamp { row, value } => {
                write!(f, "row {row}: cannot parse date '{value}'")
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Polars(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<PolarsError> for AnalysisError {
    fn from(e: PolarsError) -> Self {
        Self::Polars(e)
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
