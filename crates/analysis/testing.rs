//! Fixtures shared by the unit tests.

use csv::Writer;
use std::path::Path;

/// Write a header and rows to `filename` as comma separated values.
pub fn write_csv<P: AsRef<Path>>(filename: P, header: &[&str], data: &[&[&str]]) {
    let mut wtr = Writer::from_path(filename).unwrap();
    wtr.write_record(header).unwrap();
    for record in data {
        wtr.write_record(*record).unwrap();
    }
    wtr.flush().unwrap();
}
