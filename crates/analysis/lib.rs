//! Descriptive statistics over a crime incident table.
//!
//! The pipeline loads a delimited file into an [`IncidentTable`], fills in
//! missing community areas and then derives five independent views: crime
//! type counts, community area counts, a filtered detail listing, a weekday
//! breakdown and a monthly series. [`report::run`] prints all of them.

pub mod error;
pub mod filter;
pub mod frequency;
pub mod inspect;
pub mod report;
pub mod settings;
pub mod table;
pub mod timeline;

#[cfg(test)]
mod testing;

pub use error::{AnalysisError, Result};
pub use filter::{FilteredView, Selection};
pub use frequency::Frequency;
pub use inspect::Inspection;
pub use settings::Settings;
pub use table::IncidentTable;
pub use timeline::{DatedTable, MonthlyCount, TimeIndexedTable};
