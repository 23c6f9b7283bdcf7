//! Read-only overview of a freshly loaded table.

use crate::error::Result;

use polars::prelude::*;

pub const PREVIEW_ROWS: usize = 5;
pub const STATISTIC: &str = "statistic";

const STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Name, type and non-null count of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: DataType,
    pub non_null: usize,
}

#[derive(Debug, Clone)]
pub struct Inspection {
    pub head: DataFrame,
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    /// One row per entry of `count, mean, std, min, 25%, 50%, 75%, max`
    /// and one column per numeric input column.
    pub summary: DataFrame,
}

impl Inspection {
    pub fn of(df: &DataFrame) -> Result<Self> {
        let columns = df
            .get_columns()
            .iter()
            .map(|s| ColumnInfo {
                name: s.name().to_string(),
                dtype: s.dtype().clone(),
                non_null: s.len() - s.null_count(),
            })
            .collect();
        Ok(Inspection {
            head: df.head(Some(PREVIEW_ROWS)),
            rows: df.height(),
            columns,
            summary: describe(df)?,
        })
    }
}

/// Summary statistics of every numeric column, nulls ignored. `std` uses one
/// delta degree of freedom and quantiles interpolate linearly.
pub fn describe(df: &DataFrame) -> Result<DataFrame> {
    let mut columns = vec![Series::new(STATISTIC, STATISTICS.as_slice())];
    for s in df.get_columns() {
        if !s.dtype().is_numeric() {
            continue;
        }
        let values = s.cast(&DataType::Float64)?;
        let ca = values.f64()?;
        let count = (ca.len() - ca.null_count()) as f64;
        let stats = [
            Some(count),
            ca.mean(),
            ca.std(1),
            ca.min(),
            ca.quantile(0.25, QuantileInterpolOptions::Linear)?,
            ca.quantile(0.5, QuantileInterpolOptions::Linear)?,
            ca.quantile(0.75, QuantileInterpolOptions::Linear)?,
            ca.max(),
        ];
        columns.push(Series::new(s.name(), stats.as_slice()));
    }
    Ok(DataFrame::new(columns)?)
}
