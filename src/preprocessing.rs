//! Raw-table preprocessing: from a `RawRecordSet` to the numeric feature
//! matrix a model expects.
//!
//! The transform never mutates its input. Identifier columns are dropped
//! when present, configured categorical columns are one-hot encoded keeping
//! every observed level (no reference-category drop), the label column is
//! split off when present, and the encoded columns are reindexed to the
//! persisted training feature order when the contract carries one. Output is
//! deterministic and reproducible for identical input content.

use std::collections::BTreeMap;

use crate::contract::FeatureContract;
use crate::data_handling::{FeatureMatrix, RawRecordSet, RawValue};
use crate::error::{PredictError, Result};

/// Transform a record set into `(FeatureMatrix, labels)` under a contract.
///
/// Labels are `None` when the contract's target column is absent; callers on
/// the evaluation path enforce its presence beforehand via validation.
pub fn transform(
    records: &RawRecordSet,
    contract: &FeatureContract,
) -> Result<(FeatureMatrix, Option<Vec<i32>>)> {
    let labels = split_labels(records, contract)?;

    let mut numeric_names: Vec<String> = Vec::new();
    let mut numeric_cols: Vec<Vec<f64>> = Vec::new();

    for (idx, name) in records.columns().iter().enumerate() {
        if name == &contract.target_column
            || contract.is_dropped(name)
            || contract.is_categorical(name)
        {
            continue;
        }
        if !contract.required_columns.iter().any(|c| c == name) {
            // Extra columns are ignored, never parsed.
            log::debug!("ignoring column '{}' outside the feature contract", name);
            continue;
        }
        numeric_names.push(name.clone());
        numeric_cols.push(numeric_column(records, idx, name)?);
    }

    let mut names = numeric_names;
    let mut cols = numeric_cols;
    for cat in &contract.categorical_columns {
        if let Some(idx) = records.column_index(cat) {
            let (level_names, level_cols) = encode_one_hot(records, idx, cat);
            names.extend(level_names);
            cols.extend(level_cols);
        }
    }

    let mut matrix = FeatureMatrix::from_columns(names, cols);
    match &contract.training_feature_order {
        Some(order) => matrix = matrix.reindex(order),
        None => log::warn!(
            "no training feature order available; using encoded column order as-is"
        ),
    }

    Ok((matrix, labels))
}

fn split_labels(records: &RawRecordSet, contract: &FeatureContract) -> Result<Option<Vec<i32>>> {
    let Some(idx) = records.column_index(&contract.target_column) else {
        return Ok(None);
    };
    let mut labels = Vec::with_capacity(records.n_rows());
    for row in 0..records.n_rows() {
        let value = records.value(row, idx);
        let label = value.as_label().ok_or_else(|| {
            PredictError::DataFormat(format!(
                "label '{}' at row {} is not an integer class",
                value,
                row + 1
            ))
        })?;
        labels.push(label);
    }
    Ok(Some(labels))
}

/// Read a numeric feature column. Null cells are filled with 0, consistent
/// with the zero-fill reindex convention; non-numeric text is a hard error.
fn numeric_column(records: &RawRecordSet, idx: usize, name: &str) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(records.n_rows());
    let mut nulls = 0usize;
    for row in 0..records.n_rows() {
        let v = match records.value(row, idx) {
            RawValue::Number(v) => *v,
            RawValue::Null => {
                nulls += 1;
                0.0
            }
            RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                PredictError::DataFormat(format!(
                    "non-numeric value '{}' in column '{}' at row {}",
                    s,
                    name,
                    row + 1
                ))
            })?,
        };
        values.push(v);
    }
    if nulls > 0 {
        log::warn!("column '{}': {} null cells filled with 0", name, nulls);
    }
    Ok(values)
}

/// One-hot encode a categorical column into `column_level` indicators, one
/// per observed level, levels in lexicographic order. Null cells set no
/// indicator.
fn encode_one_hot(
    records: &RawRecordSet,
    idx: usize,
    name: &str,
) -> (Vec<String>, Vec<Vec<f64>>) {
    let n = records.n_rows();
    let mut level_rows: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for row in 0..n {
        let value = records.value(row, idx);
        if value.is_null() {
            continue;
        }
        level_rows.entry(value.to_string()).or_default().push(row);
    }

    let mut names = Vec::with_capacity(level_rows.len());
    let mut cols = Vec::with_capacity(level_rows.len());
    for (level, rows) in level_rows {
        let mut col = vec![0.0; n];
        for row in rows {
            col[row] = 1.0;
        }
        names.push(format!("{}_{}", name, level));
        cols.push(col);
    }
    (names, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_row_records() -> RawRecordSet {
        RawRecordSet::new(
            vec!["Pendiente".to_string(), "Tipo_Via".to_string()],
            vec![
                vec![
                    RawValue::Number(12.0),
                    RawValue::Text("Camino".to_string()),
                ],
                vec![
                    RawValue::Number(3.5),
                    RawValue::Text("Carretera".to_string()),
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn one_hot_keeps_every_level() {
        let records = two_row_records();
        let idx = records.column_index("Tipo_Via").unwrap();
        let (names, cols) = encode_one_hot(&records, idx, "Tipo_Via");
        assert_eq!(names, vec!["Tipo_Via_Camino", "Tipo_Via_Carretera"]);
        assert_eq!(cols[0], vec![1.0, 0.0]);
        assert_eq!(cols[1], vec![0.0, 1.0]);
    }

    #[test]
    fn null_category_sets_no_indicator() {
        let records = RawRecordSet::new(
            vec!["Tipo_Via".to_string()],
            vec![
                vec![RawValue::Text("Camino".to_string())],
                vec![RawValue::Null],
            ],
        )
        .unwrap();
        let (names, cols) = encode_one_hot(&records, 0, "Tipo_Via");
        assert_eq!(names, vec!["Tipo_Via_Camino"]);
        assert_eq!(cols[0], vec![1.0, 0.0]);
    }
}
