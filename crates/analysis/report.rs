//! Console report: one section per pipeline step, written to any `Write`.

use crate::error::Result;
use crate::filter::Selection;
use crate::frequency::Frequency;
use crate::inspect::Inspection;
use crate::settings::Settings;
use crate::table::{IncidentTable, COMMUNITY_AREA};
use crate::timeline::{DatedTable, TimeIndexedTable};

use log::info;
use std::io::Write;

/// Load the input and write every section of the report to `out`.
pub fn run<W: Write>(settings: &Settings, out: &mut W) -> Result<()> {
    let raw = IncidentTable::load(&settings.input, settings.separator)?;
    writeln!(
        out,
        "Data loaded successfully from '{}'",
        settings.input.display()
    )?;
    writeln!(out, "--- End Data Loading ---")?;

    if settings.inspect {
        write_inspection(out, &Inspection::of(raw.frame())?)?;
    }
    let table = write_cleaning(out, &raw)?;
    write_crime_types(out, &table, settings.top)?;
    write_community_areas(out, &table, settings.top)?;
    write_selection(out, &table, &settings.selection)?;
    let dated = write_weekdays(out, &table)?;
    write_monthly_trend(out, &dated.index_by_date()?)?;

    writeln!(out, "\n--- End of Crime Data Analysis Script ---")?;
    info!("report complete");
    Ok(())
}

pub fn write_inspection<W: Write>(out: &mut W, inspection: &Inspection) -> Result<()> {
    writeln!(out, "\n--- Initial Data Inspection ---")?;
    writeln!(out, "\nFirst {} rows of the dataset:", inspection.head.height())?;
    writeln!(out, "{}", inspection.head)?;

    writeln!(
        out,
        "\nDataset information (column names, data types, non-null counts):"
    )?;
    writeln!(
        out,
        "{} entries, {} columns",
        inspection.rows,
        inspection.columns.len()
    )?;
    let width = inspection
        .columns
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0)
        .max("Column".len());
    writeln!(out, " #   {:<width$}  Non-Null Count  Dtype", "Column")?;
    for (i, column) in inspection.columns.iter().enumerate() {
        writeln!(
            out,
            " {:<3} {:<width$}  {:<14}  {}",
            i,
            column.name,
            format!("{} non-null", column.non_null),
            column.dtype
        )?;
    }

    writeln!(out, "\nSummary statistics for numerical columns:")?;
    writeln!(out, "{}", inspection.summary)?;
    writeln!(out, "--- End Initial Data Inspection ---")?;
    Ok(())
}

/// Fill missing areas and report the null count before and after.
pub fn write_cleaning<W: Write>(out: &mut W, raw: &IncidentTable) -> Result<IncidentTable> {
    writeln!(
        out,
        "\n--- Data Cleaning: Handling Missing Community Area Values ---"
    )?;
    writeln!(
        out,
        "Number of missing values in '{}' column before cleaning: {}",
        COMMUNITY_AREA,
        raw.missing_areas()?
    )?;
    let cleaned = raw.clean()?;
    writeln!(
        out,
        "Number of missing values in '{}' column after filling with 0: {}",
        COMMUNITY_AREA,
        cleaned.missing_areas()?
    )?;
    writeln!(out, "--- End Data Cleaning: Missing Community Area Values ---")?;
    Ok(cleaned)
}

pub fn write_crime_types<W: Write>(out: &mut W, table: &IncidentTable, top: usize) -> Result<()> {
    writeln!(
        out,
        "\n--- Task A: Top {} Most Frequent Crime Types ---",
        top
    )?;
    writeln!(
        out,
        "Displaying the top {} most frequent 'Primary Type' crimes in the dataset:\n",
        top
    )?;
    write_frequency(out, &table.crime_types()?, Some(top))?;
    writeln!(out, "--- End Top {} Crime Types ---", top)?;
    Ok(())
}

pub fn write_community_areas<W: Write>(
    out: &mut W,
    table: &IncidentTable,
    top: usize,
) -> Result<()> {
    writeln!(
        out,
        "\n--- Task B: Top {} Community Areas with Highest Crime Counts ---",
        top
    )?;
    writeln!(
        out,
        "Displaying the top {} community areas with the highest number of reported crimes:\n",
        top
    )?;
    write_frequency(out, &table.community_areas()?, Some(top))?;
    writeln!(out, "--- End Top {} Community Areas ---", top)?;
    Ok(())
}

pub fn write_selection<W: Write>(
    out: &mut W,
    table: &IncidentTable,
    selection: &Selection,
) -> Result<()> {
    let Selection {
        crime_type,
        community_area,
    } = selection;
    writeln!(
        out,
        "\n--- Task C: Analyzing '{}' Crimes in Community Area {} ---",
        crime_type, community_area
    )?;
    let view = table.select(selection)?;
    writeln!(
        out,
        "Number of '{}' crimes reported in Community Area {}: {}",
        crime_type,
        community_area,
        view.count()
    )?;
    writeln!(
        out,
        "Details of the first few '{}' crimes in Community Area {}:\n",
        crime_type, community_area
    )?;
    writeln!(out, "{}", view.detail())?;
    writeln!(
        out,
        "--- End Analysis of '{}' Crimes in Community Area {} ---",
        crime_type, community_area
    )?;
    Ok(())
}

/// Parse timestamps, report incidents per weekday and hand the dated table on.
pub fn write_weekdays<W: Write>(out: &mut W, table: &IncidentTable) -> Result<DatedTable> {
    writeln!(out, "\n--- Task D: Analyzing Crimes by Day of the Week ---")?;
    let dated = table.with_timestamps()?;
    writeln!(out, "Frequency of crimes by day of the week:\n")?;
    write_frequency(out, &dated.weekdays()?, None)?;
    writeln!(out, "--- End Analysis of Crimes by Day of the Week ---")?;
    Ok(dated)
}

pub fn write_monthly_trend<W: Write>(out: &mut W, indexed: &TimeIndexedTable) -> Result<()> {
    writeln!(out, "\n--- Task E: Crimes Over Time (Monthly Trend) ---")?;
    let buckets = indexed.monthly_counts()?;

    writeln!(out, "\nMonthly Crime Counts:")?;
    writeln!(out, "Date")?;
    for bucket in &buckets {
        writeln!(out, "{}    {}", bucket.month_end, bucket.count)?;
    }

    writeln!(out, "\nMonthly Crime Counts (Formatted):")?;
    for bucket in &buckets {
        writeln!(out, "{}: {} crimes", bucket.month(), bucket.count)?;
    }
    Ok(())
}

/// Column name, then one `value  count` line per group.
fn write_frequency<W: Write>(out: &mut W, freq: &Frequency, limit: Option<usize>) -> Result<()> {
    let entries = freq.entries()?;
    let shown = &entries[..limit.unwrap_or(entries.len()).min(entries.len())];
    let width = shown.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    writeln!(out, "{}", freq.column())?;
    for (label, count) in shown {
        writeln!(out, "{:<width$}    {}", label, count)?;
    }
    Ok(())
}
