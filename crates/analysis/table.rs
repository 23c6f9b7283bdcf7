//! The incident table and its load/clean steps.
//!
//! Each step returns a new table instead of mutating the previous one, so
//! every stage of the pipeline can be built and checked on its own.

use crate::error::{AnalysisError, Result};
use crate::filter::{FilteredView, Selection};
use crate::frequency::Frequency;
use crate::timeline::DatedTable;

use log::{info, warn};
use polars::prelude::*;
use std::fs::File;
use std::io;
use std::path::Path;

pub const PRIMARY_TYPE: &str = "Primary Type";
pub const COMMUNITY_AREA: &str = "Community Area";
pub const DATE: &str = "Date";

/// Value written into `Community Area` where the input had none.
pub const MISSING_AREA: i64 = 0;

#[derive(Debug, Clone)]
pub struct IncidentTable {
    df: DataFrame,
}

impl IncidentTable {
    pub fn new(df: DataFrame) -> Self {
        IncidentTable { df }
    }

    /// Read a delimited file with a header row.
    ///
    /// A missing file is reported as [`AnalysisError::FileNotFound`]; any
    /// other read failure is returned as is.
    pub fn load<P: AsRef<Path>>(path: P, separator: u8) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AnalysisError::FileNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .map_parse_options(|o| o.with_separator(separator))
            .into_reader_with_file_handle(file)
            .finish()?;
        info!(
            "loaded {:?}: {} rows, {} columns",
            path,
            df.height(),
            df.width()
        );
        Ok(IncidentTable { df })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn missing_areas(&self) -> Result<usize> {
        Ok(self.df.column(COMMUNITY_AREA)?.null_count())
    }

    /// Return a copy with `Community Area` as Int64 and nulls replaced by
    /// [`MISSING_AREA`]. Cleaning a clean table is a no-op.
    pub fn clean(&self) -> Result<Self> {
        let missing = self.missing_areas()?;
        if missing > 0 {
            warn!(
                "{} rows without '{}' are counted as area {}",
                missing, COMMUNITY_AREA, MISSING_AREA
            );
        }
        let df = self
            .df
            .clone()
            .lazy()
            .with_column(
                col(COMMUNITY_AREA)
                    .strict_cast(DataType::Int64)
                    .fill_null(lit(MISSING_AREA)),
            )
            .collect()?;
        Ok(IncidentTable { df })
    }

    pub fn crime_types(&self) -> Result<Frequency> {
        Frequency::of(&self.df, PRIMARY_TYPE)
    }

    pub fn community_areas(&self) -> Result<Frequency> {
        Frequency::of(&self.df, COMMUNITY_AREA)
    }

    pub fn select(&self, selection: &Selection) -> Result<FilteredView> {
        FilteredView::new(&self.df, selection)
    }

    /// Parse `Date` into timestamps; see [`DatedTable`].
    pub fn with_timestamps(&self) -> Result<DatedTable> {
        DatedTable::new(&self.df)
    }
}
