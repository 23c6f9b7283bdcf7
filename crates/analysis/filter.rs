use crate::error::Result;
use crate::table::{COMMUNITY_AREA, PRIMARY_TYPE};

use polars::prelude::*;

/// Number of matching rows shown in full.
pub const DETAIL_ROWS: usize = 5;

/// A crime type and a community area that rows must both match.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub crime_type: String,
    pub community_area: i64,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            crime_type: "THEFT".to_string(),
            community_area: 25,
        }
    }
}

impl Selection {
    fn predicate(&self) -> Expr {
        col(PRIMARY_TYPE)
            .eq(lit(self.crime_type.as_str()))
            .and(col(COMMUNITY_AREA).eq(lit(self.community_area)))
    }
}

/// Rows matching a [`Selection`], in table order.
#[derive(Debug, Clone)]
pub struct FilteredView {
    rows: DataFrame,
}

impl FilteredView {
    pub fn new(df: &DataFrame, selection: &Selection) -> Result<Self> {
        let rows = df.clone().lazy().filter(selection.predicate()).collect()?;
        Ok(FilteredView { rows })
    }

    pub fn count(&self) -> usize {
        self.rows.height()
    }

    pub fn rows(&self) -> &DataFrame {
        &self.rows
    }

    /// The first [`DETAIL_ROWS`] matches with every column.
    pub fn detail(&self) -> DataFrame {
        self.rows.head(Some(DETAIL_ROWS))
    }
}
