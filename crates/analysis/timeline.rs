//! Timestamp parsing, the weekday breakdown and the monthly series.

use crate::error::{AnalysisError, Result};
use crate::frequency::{Frequency, COUNT};
use crate::table::DATE;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;

/// Format of the `Date` column, e.g. `01/31/2023 11:05:00 PM`.
pub const DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";
pub const DAY_OF_WEEK: &str = "Day of Week";

/// Parse every `Date` cell. The first null or malformed cell aborts.
pub fn parse_timestamps(df: &DataFrame) -> Result<Vec<NaiveDateTime>> {
    df.column(DATE)?
        .str()?
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let value = value.unwrap_or_default();
            NaiveDateTime::parse_from_str(value, DATE_FORMAT).map_err(|_| {
                AnalysisError::InvalidTimestamp {
                    row: i + 1,
                    value: value.to_string(),
                }
            })
        })
        .collect()
}

/// An incident table whose `Date` column holds parsed timestamps and which
/// carries a `Day of Week` column.
#[derive(Debug, Clone)]
pub struct DatedTable {
    df: DataFrame,
    timestamps: Vec<NaiveDateTime>,
}

impl DatedTable {
    pub fn new(df: &DataFrame) -> Result<Self> {
        let timestamps = parse_timestamps(df)?;
        let dates = DatetimeChunked::from_naive_datetime(
            DATE,
            timestamps.iter().copied(),
            TimeUnit::Microseconds,
        )
        .into_series();
        let weekdays: Vec<String> = timestamps
            .iter()
            .map(|ts| ts.format("%A").to_string())
            .collect();

        let mut df = df.clone();
        df.with_column(dates)?;
        df.with_column(Series::new(DAY_OF_WEEK, weekdays))?;
        Ok(DatedTable { df, timestamps })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn weekdays(&self) -> Result<Frequency> {
        Frequency::of(&self.df, DAY_OF_WEEK)
    }

    /// Order rows by timestamp. Rows sharing a timestamp keep table order.
    pub fn index_by_date(&self) -> Result<TimeIndexedTable> {
        let df = self
            .df
            .sort([DATE], SortMultipleOptions::default().with_maintain_order(true))?;
        let mut index = self.timestamps.clone();
        index.sort();
        Ok(TimeIndexedTable { df, index })
    }
}

/// Rows keyed and ordered by their timestamp.
#[derive(Debug, Clone)]
pub struct TimeIndexedTable {
    df: DataFrame,
    index: Vec<NaiveDateTime>,
}

impl TimeIndexedTable {
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Row counts per calendar month from the first to the last timestamp,
    /// months without rows included.
    pub fn monthly_counts(&self) -> Result<Vec<MonthlyCount>> {
        let (Some(first), Some(last)) = (self.index.first(), self.index.last()) else {
            return Ok(vec![]);
        };

        let per_month = self
            .df
            .clone()
            .lazy()
            .group_by_dynamic(
                col(DATE),
                Vec::<Expr>::new(),
                DynamicGroupOptions {
                    every: Duration::parse("1mo"),
                    period: Duration::parse("1mo"),
                    offset: Duration::parse("0ns"),
                    label: Label::Left,
                    closed_window: ClosedWindow::Left,
                    start_by: StartBy::WindowBound,
                    ..Default::default()
                },
            )
            .agg([len().alias(COUNT)]);

        let months = month_starts(first.date(), last.date());
        let range = DataFrame::new(vec![DatetimeChunked::from_naive_datetime(
            DATE,
            months.iter().map(|m| m.and_time(NaiveTime::MIN)),
            TimeUnit::Microseconds,
        )
        .into_series()])?;
        let filled = range
            .lazy()
            .left_join(per_month, col(DATE), col(DATE))
            .sort([DATE], SortMultipleOptions::default())
            .select([col(COUNT).cast(DataType::UInt64).fill_null(lit(0u64))])
            .collect()?;

        let buckets = months
            .iter()
            .zip(filled.column(COUNT)?.u64()?.into_iter())
            .filter_map(|(start, count)| {
                let next = start.checked_add_months(Months::new(1))?;
                Some(MonthlyCount {
                    month_end: next - Days::new(1),
                    count: count.unwrap_or_default() as usize,
                })
            })
            .collect();
        Ok(buckets)
    }
}

/// First day of every month from `first` to `last`, both included.
fn month_starts(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let mut months = vec![];
    let mut month = first.with_day(1).unwrap_or(first);
    while month <= last {
        months.push(month);
        match month.checked_add_months(Months::new(1)) {
            Some(next) => month = next,
            None => break,
        }
    }
    months
}

/// Incidents in one calendar month, labelled by the month's last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyCount {
    pub month_end: NaiveDate,
    pub count: usize,
}

impl MonthlyCount {
    /// `YYYY-MM`
    pub fn month(&self) -> String {
        self.month_end.format("%Y-%m").to_string()
    }
}
