use crate::error::Result;

use polars::prelude::*;

/// Name of the count column in a [`Frequency`] frame.
pub const COUNT: &str = "count";

/// Row counts per distinct value of one column, most frequent first.
///
/// Groups with equal counts keep the order in which their value was first
/// seen in the table.
#[derive(Debug, Clone)]
pub struct Frequency {
    column: String,
    counts: DataFrame,
}

impl Frequency {
    pub fn of(df: &DataFrame, column: &str) -> Result<Self> {
        let counts = df
            .clone()
            .lazy()
            .group_by_stable([col(column)])
            .agg([len().alias(COUNT)])
            .sort(
                [COUNT],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_maintain_order(true),
            )
            .collect()?;
        Ok(Frequency {
            column: column.to_string(),
            counts,
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// All groups, two columns: the grouped value and [`COUNT`].
    pub fn frame(&self) -> &DataFrame {
        &self.counts
    }

    pub fn groups(&self) -> usize {
        self.counts.height()
    }

    pub fn top(&self, n: usize) -> DataFrame {
        self.counts.head(Some(n))
    }

    /// Sum of all group counts, equal to the height of the source table.
    pub fn total(&self) -> Result<u64> {
        let counts = self.counts.column(COUNT)?.cast(&DataType::UInt64)?;
        Ok(counts.u64()?.sum().unwrap_or(0))
    }

    /// Groups as `(value, count)` with the value rendered as text.
    pub fn entries(&self) -> Result<Vec<(String, u64)>> {
        let labels = self.counts.column(&self.column)?.cast(&DataType::String)?;
        let counts = self.counts.column(COUNT)?.cast(&DataType::UInt64)?;
        let entries = labels
            .str()?
            .into_iter()
            .zip(counts.u64()?.into_iter())
            .map(|(label, count)| {
                (
                    label.unwrap_or("null").to_string(),
                    count.unwrap_or_default(),
                )
            })
            .collect();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(df: &DataFrame, column: &str) -> Vec<(String, u64)> {
        Frequency::of(df, column).unwrap().entries().unwrap()
    }

    #[test]
    fn test_counts_descending() {
        let df = df!("Primary Type" => &["A", "A", "B"]).unwrap();
        assert_eq!(
            entries(&df, "Primary Type"),
            vec![("A".to_string(), 2), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let df = df!("t" => &["C", "B", "A", "B", "C", "A", "D"]).unwrap();
        let labels: Vec<String> = entries(&df, "t").into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, &["C", "B", "A", "D"]);
    }

    #[test]
    fn test_total_matches_row_count() {
        let values: Vec<i64> = (0..50).map(|i| i % 13).collect();
        let df = df!("Community Area" => &values).unwrap();
        let freq = Frequency::of(&df, "Community Area").unwrap();
        assert_eq!(freq.groups(), 13);
        assert_eq!(freq.total().unwrap(), 50);
    }

    #[test]
    fn test_top_is_sorted_and_limited() {
        let values: Vec<i64> = (0..12)
            .flat_map(|area| std::iter::repeat(area).take(area as usize + 1))
            .collect();
        let df = df!("Community Area" => &values).unwrap();
        let freq = Frequency::of(&df, "Community Area").unwrap();

        let top = freq.top(10);
        assert_eq!(top.height(), 10);
        let counts: Vec<u32> = top
            .column(COUNT)
            .unwrap()
            .cast(&DataType::UInt32)
            .unwrap()
            .u32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(counts[0], 12);
        assert_eq!(freq.entries().unwrap()[0].0, "11");
    }

    #[test]
    fn test_empty_table() {
        let df = df!("t" => Vec::<String>::new()).unwrap();
        let freq = Frequency::of(&df, "t").unwrap();
        assert_eq!(freq.groups(), 0);
        assert_eq!(freq.total().unwrap(), 0);
    }
}
