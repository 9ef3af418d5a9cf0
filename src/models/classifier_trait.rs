use std::fmt::Debug;

use crate::data_handling::FeatureMatrix;
use crate::error::{PredictError, Result};

/// Contract for a pre-trained binary site classifier.
///
/// Implementations are immutable once deserialized and safe to share across
/// threads for read-only inference. Training is out of scope: artifacts are
/// fitted elsewhere and only applied here.
pub trait SiteClassifier: Send + Sync + Debug {
    /// Human readable model name, matching its registry kind.
    fn name(&self) -> &str;

    /// Width of the feature vector this model was trained on.
    fn n_features(&self) -> usize;

    /// Positive-class probability per row, each in [0, 1].
    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<f64>>;

    /// Predicted class per row: 1 (confirmed site) iff the positive-class
    /// probability reaches 0.5.
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<i32>> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| i32::from(p >= 0.5))
            .collect())
    }
}

/// Shape guard shared by implementations: the matrix width must equal the
/// model's training feature count.
pub(crate) fn check_shape(name: &str, expected: usize, x: &FeatureMatrix) -> Result<()> {
    if x.n_cols() != expected {
        return Err(PredictError::PredictionComputation {
            model: name.to_string(),
            records: x.n_rows(),
            detail: format!(
                "feature matrix has {} columns, model expects {}",
                x.n_cols(),
                expected
            ),
        });
    }
    Ok(())
}
