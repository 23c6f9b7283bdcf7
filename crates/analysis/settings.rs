use crate::filter::Selection;

use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "crimes.csv";
pub const DEFAULT_TOP: usize = 10;

/// Everything one run of the report needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub separator: u8,
    pub selection: Selection,
    /// Size of the crime type and community area listings.
    pub top: usize,
    pub inspect: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input: PathBuf::from(DEFAULT_INPUT),
            separator: b',',
            selection: Selection::default(),
            top: DEFAULT_TOP,
            inspect: true,
        }
    }
}
