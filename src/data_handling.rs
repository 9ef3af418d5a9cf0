//! Data structures for raw record sets and numeric feature matrices.
//!
//! `RawRecordSet` is the in-memory form of an uploaded table or a parsed
//! geospatial feature collection: named columns, row-major cells, and an
//! optional point geometry per row. `FeatureMatrix` is the purely numeric
//! table a classifier consumes, with named columns in a fixed order.

use std::fmt;

use anyhow::{anyhow, Result as AnyResult};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{PredictError, Result};

/// A raw scalar cell as read from a delimited file or a feature collection.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Null,
}

impl RawValue {
    /// Classify a delimited-text field: empty cells are null, numeric text
    /// becomes a number, anything else stays text.
    pub fn from_field(field: &str) -> RawValue {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return RawValue::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => RawValue::Number(v),
            Err(_) => RawValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Interpret the cell as a class label.
    pub fn as_label(&self) -> Option<i32> {
        match self {
            RawValue::Number(v) if v.fract() == 0.0 => Some(*v as i32),
            RawValue::Text(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RawValue::Text(s) => f.write_str(s),
            // Integral numbers render without a trailing ".0" so category
            // levels derived from numeric codes match their text form.
            RawValue::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            RawValue::Number(v) => write!(f, "{}", v),
            RawValue::Null => Ok(()),
        }
    }
}

/// Point coordinates carried through prediction unchanged. Coordinate
/// reference handling is the reader's concern, not this crate's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

/// An ordered collection of rows with named columns and optional per-row
/// geometry. Immutable once constructed; result assembly works on clones.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecordSet {
    columns: Vec<String>,
    rows: Vec<Vec<RawValue>>,
    geometry: Option<Vec<GeoPoint>>,
}

impl RawRecordSet {
    /// Build a record set, checking that every row has exactly one cell per
    /// column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<RawValue>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(PredictError::DataFormat(format!(
                    "row {} has {} cells, expected {}",
                    i + 1,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(RawRecordSet {
            columns,
            rows,
            geometry: None,
        })
    }

    /// Attach one geometry point per row.
    pub fn with_geometry(mut self, geometry: Vec<GeoPoint>) -> Result<Self> {
        if geometry.len() != self.rows.len() {
            return Err(PredictError::DataFormat(format!(
                "geometry has {} points for {} rows",
                geometry.len(),
                self.rows.len()
            )));
        }
        self.geometry = Some(geometry);
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn geometry(&self) -> Option<&[GeoPoint]> {
        self.geometry.as_deref()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn value(&self, row: usize, col: usize) -> &RawValue {
        &self.rows[row][col]
    }

    pub fn row(&self, row: usize) -> &[RawValue] {
        &self.rows[row]
    }

    /// All cells of a named column, top to bottom.
    pub fn column(&self, name: &str) -> AnyResult<Vec<&RawValue>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| anyhow!("column '{}' not found", name))?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Subset rows by index, keeping columns and per-row geometry aligned.
    pub fn select_rows(&self, indices: &[usize]) -> RawRecordSet {
        RawRecordSet {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            geometry: self
                .geometry
                .as_ref()
                .map(|points| indices.iter().map(|&i| points[i]).collect()),
        }
    }

    /// A copy of this record set with one appended column. Used for result
    /// tables; the receiver is left untouched.
    pub fn with_column(&self, name: &str, values: Vec<RawValue>) -> Result<RawRecordSet> {
        if values.len() != self.rows.len() {
            return Err(PredictError::DataFormat(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        let mut out = self.clone();
        out.columns.push(name.to_string());
        for (row, value) in out.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(out)
    }
}

/// A purely numeric table whose column set and order match what a model
/// expects.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl FeatureMatrix {
    /// Assemble a matrix from equal-length column vectors.
    pub fn from_columns(names: Vec<String>, columns: Vec<Vec<f64>>) -> FeatureMatrix {
        assert_eq!(names.len(), columns.len(), "one name per column required");
        let nrows = columns.first().map(|c| c.len()).unwrap_or(0);
        for col in &columns {
            assert_eq!(col.len(), nrows, "ragged feature columns");
        }
        let mut values = Array2::zeros((nrows, names.len()));
        for (c, col) in columns.iter().enumerate() {
            for (r, &v) in col.iter().enumerate() {
                values[(r, c)] = v;
            }
        }
        FeatureMatrix { columns: names, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.values.ncols()
    }

    pub fn row(&self, row: usize) -> ArrayView1<f64> {
        self.values.row(row)
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of a named column.
    pub fn column_values(&self, name: &str) -> AnyResult<Vec<f64>> {
        let idx = self
            .column_position(name)
            .ok_or_else(|| anyhow!("feature column '{}' not found", name))?;
        Ok(self.values.column(idx).to_vec())
    }

    /// Reindex to exactly the given column order: columns absent here are
    /// filled with 0, columns not in `order` are dropped.
    pub fn reindex(&self, order: &[String]) -> FeatureMatrix {
        let nrows = self.n_rows();
        let mut values = Array2::zeros((nrows, order.len()));
        for (target, name) in order.iter().enumerate() {
            if let Some(source) = self.column_position(name) {
                for r in 0..nrows {
                    values[(r, target)] = self.values[(r, source)];
                }
            }
        }
        FeatureMatrix {
            columns: order.to_vec(),
            values,
        }
    }
}
