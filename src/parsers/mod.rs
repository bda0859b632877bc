//! Input reading and normalization.
//!
//! Turns an uploaded delimited file into a [`PartsTable`](crate::model::PartsTable)
//! whose vendor price columns hold numbers.

mod delimited;
mod normalizer;

pub use delimited::{read_parts_file, read_parts_str, read_parts_table, DEFAULT_DELIMITER};
pub use normalizer::{normalize, parse_currency};
