//! Delimited-text reader: a raw byte buffer becomes a `RawRecordSet` with
//! header-derived column names.
//!
//! This is the only file parsing the core performs; geospatial formats are
//! read by external collaborators which hand over an already-built record
//! set. Any parse failure is surfaced as a `DataFormat` error carrying the
//! underlying message, with no partial recovery.

use crate::data_handling::{RawRecordSet, RawValue};
use crate::error::{PredictError, Result};

/// Parse comma-delimited bytes into a record set.
pub fn read_delimited_records(bytes: &[u8]) -> Result<RawRecordSet> {
    read_delimited_records_with_delimiter(bytes, b',')
}

/// Parse delimited bytes with an explicit delimiter.
pub fn read_delimited_records_with_delimiter(bytes: &[u8], delimiter: u8) -> Result<RawRecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| PredictError::DataFormat(format!("failed to read header row: {}", e)))?;
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
    if columns.is_empty() {
        return Err(PredictError::DataFormat("empty header row".to_string()));
    }

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            PredictError::DataFormat(format!("failed to read row {}: {}", row_idx + 1, e))
        })?;
        if record.len() != columns.len() {
            return Err(PredictError::DataFormat(format!(
                "row {} has {} fields, expected {}",
                row_idx + 1,
                record.len(),
                columns.len()
            )));
        }
        rows.push(record.iter().map(RawValue::from_field).collect());
    }

    log::debug!("parsed {} rows x {} columns", rows.len(), columns.len());
    RawRecordSet::new(columns, rows)
}
