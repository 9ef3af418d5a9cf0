//! Prediction orchestration: validate, preprocess, invoke one or more
//! models, and assemble result tables.
//!
//! The predictor is stateless across calls; the only shared state is the
//! registry's artifact cache. Each call runs synchronously to completion.

use std::sync::Arc;

use crate::config::ModelKind;
use crate::contract::FeatureContract;
use crate::data_handling::{FeatureMatrix, RawRecordSet, RawValue};
use crate::error::{PredictError, Result};
use crate::preprocessing;
use crate::registry::ModelRegistry;
use crate::report;

/// Ground-truth column name in result tables.
pub const ACTUAL_COLUMN: &str = "Real";
/// Predicted-class column name in result tables.
pub const PREDICTED_COLUMN: &str = "Predicción";
/// Positive-class probability column name in result tables.
pub const PROBABILITY_COLUMN: &str = "Probabilidad";

/// Tabular probabilities are stored as fractions in [0, 1] rounded to four
/// decimals; comparative tables use 2-decimal percentages instead, never
/// both in one table.
pub fn round_probability(p: f64) -> f64 {
    (p * 10_000.0).round() / 10_000.0
}

/// One model's predictions over a record set, aligned row-by-row with the
/// original records (geometry included).
#[derive(Debug)]
pub struct PredictionResult {
    records: RawRecordSet,
    pub model: ModelKind,
    /// Ground truth, when the label column was present in the input.
    pub actual: Option<Vec<i32>>,
    /// Predicted class per row, 0 or 1.
    pub predicted: Vec<i32>,
    /// Positive-class probability per row, rounded to 4 decimals.
    pub probability: Vec<f64>,
}

impl PredictionResult {
    pub fn records(&self) -> &RawRecordSet {
        &self.records
    }

    pub fn n_rows(&self) -> usize {
        self.predicted.len()
    }

    /// The original records with appended result columns: `Real` (when
    /// ground truth is present), `Predicción`, and `Probabilidad`.
    pub fn to_table(&self) -> Result<RawRecordSet> {
        let mut table = self.records.clone();
        if let Some(actual) = &self.actual {
            table = table.with_column(
                ACTUAL_COLUMN,
                actual.iter().map(|&v| RawValue::Number(v as f64)).collect(),
            )?;
        }
        table = table.with_column(
            PREDICTED_COLUMN,
            self.predicted
                .iter()
                .map(|&v| RawValue::Number(v as f64))
                .collect(),
        )?;
        table.with_column(
            PROBABILITY_COLUMN,
            self.probability.iter().map(|&p| RawValue::Number(p)).collect(),
        )
    }
}

/// Outcome of one model inside a multi-model comparison. A failed model
/// never suppresses the others' results.
#[derive(Debug)]
pub struct ModelOutcome {
    pub model: ModelKind,
    pub outcome: Result<PredictionResult>,
}

/// N aligned prediction results over the same record set, one per requested
/// model.
#[derive(Debug)]
pub struct ComparisonResult {
    records: RawRecordSet,
    pub outcomes: Vec<ModelOutcome>,
}

impl ComparisonResult {
    pub fn records(&self) -> &RawRecordSet {
        &self.records
    }

    fn successful(&self) -> Vec<&PredictionResult> {
        self.outcomes
            .iter()
            .filter_map(|o| o.outcome.as_ref().ok())
            .collect()
    }

    /// Rows where every successfully evaluated model's positive-class
    /// probability reaches `tau` (domain [0, 1]), with original columns and
    /// geometry preserved. Empty when no model succeeded.
    pub fn threshold_agreement(&self, tau: f64) -> RawRecordSet {
        let successful = self.successful();
        if successful.is_empty() {
            return self.records.select_rows(&[]);
        }
        let indices: Vec<usize> = (0..self.records.n_rows())
            .filter(|&row| successful.iter().all(|r| r.probability[row] >= tau))
            .collect();
        self.records.select_rows(&indices)
    }

    /// Comparative display table: one percentage column per successful
    /// model, rounded to 2 decimals. Fractions never appear here.
    pub fn to_table(&self) -> Result<RawRecordSet> {
        let mut table = self.records.clone();
        for result in self.successful() {
            table = table.with_column(
                &format!("{} (%)", result.model),
                result
                    .probability
                    .iter()
                    .map(|&p| RawValue::Number(report::percent(p)))
                    .collect(),
            )?;
        }
        Ok(table)
    }
}

/// Orchestrates validation, preprocessing, model invocation, and result
/// assembly for one or many models against the same input.
pub struct Predictor {
    registry: Arc<ModelRegistry>,
}

impl Predictor {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Predictor { registry }
    }

    /// Evaluation path: the label column is required and carried into the
    /// result for ground-truth comparison.
    pub fn predict(&self, records: &RawRecordSet, kind: ModelKind) -> Result<PredictionResult> {
        self.run(records, kind, true)
    }

    /// Geospatial path: predicts from feature attributes, label column
    /// optional, geometry preserved unchanged in the result.
    pub fn predict_from_gdf(
        &self,
        records: &RawRecordSet,
        kind: ModelKind,
    ) -> Result<PredictionResult> {
        self.run(records, kind, false)
    }

    fn run(
        &self,
        records: &RawRecordSet,
        kind: ModelKind,
        require_label: bool,
    ) -> Result<PredictionResult> {
        let contract = self.registry.contract_for(kind);
        validate(records, &contract, require_label)?;
        let (matrix, labels) = preprocessing::transform(records, &contract)?;
        self.infer(records, kind, &matrix, labels)
    }

    fn infer(
        &self,
        records: &RawRecordSet,
        kind: ModelKind,
        matrix: &FeatureMatrix,
        labels: Option<Vec<i32>>,
    ) -> Result<PredictionResult> {
        let model = self.registry.get_or_load(kind)?;
        let predicted = model.predict(matrix)?;
        let probability: Vec<f64> = model
            .predict_proba(matrix)?
            .into_iter()
            .map(round_probability)
            .collect();
        log::debug!(
            "model '{}' scored {} records ({} predicted sites)",
            kind,
            records.n_rows(),
            predicted.iter().filter(|&&c| c == 1).count()
        );
        Ok(PredictionResult {
            records: records.clone(),
            model: kind,
            actual: labels,
            predicted,
            probability,
        })
    }

    /// Multi-model comparison: runs the single-model path independently per
    /// requested kind over the same rows, reusing one preprocessed matrix
    /// across models whose contracts are equal. Per-model failures are
    /// reported in place without affecting the other models.
    pub fn compare(&self, records: &RawRecordSet, kinds: &[ModelKind]) -> ComparisonResult {
        let mut prepared: Vec<(Arc<FeatureContract>, FeatureMatrix, Option<Vec<i32>>)> =
            Vec::new();
        let mut outcomes = Vec::with_capacity(kinds.len());

        for &kind in kinds {
            let outcome = self.compare_one(records, kind, &mut prepared);
            outcomes.push(ModelOutcome {
                model: kind,
                outcome,
            });
        }

        ComparisonResult {
            records: records.clone(),
            outcomes,
        }
    }

    fn compare_one(
        &self,
        records: &RawRecordSet,
        kind: ModelKind,
        prepared: &mut Vec<(Arc<FeatureContract>, FeatureMatrix, Option<Vec<i32>>)>,
    ) -> Result<PredictionResult> {
        let contract = self.registry.contract_for(kind);
        validate(records, &contract, false)?;

        if let Some((_, matrix, labels)) = prepared.iter().find(|(c, _, _)| **c == *contract) {
            return self.infer(records, kind, matrix, labels.clone());
        }

        let (matrix, labels) = preprocessing::transform(records, &contract)?;
        let result = self.infer(records, kind, &matrix, labels.clone());
        prepared.push((contract, matrix, labels));
        result
    }
}

fn validate(
    records: &RawRecordSet,
    contract: &FeatureContract,
    require_label: bool,
) -> Result<()> {
    let missing = if require_label {
        contract.missing_columns_labeled(records.columns())
    } else {
        contract.missing_columns(records.columns())
    };
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PredictError::SchemaValidation { missing })
    }
}
