//! IO utilities for parsing uploaded tabular input.

pub mod delimited;

pub use delimited::{read_delimited_records, read_delimited_records_with_delimiter};
