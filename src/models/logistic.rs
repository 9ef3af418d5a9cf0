use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::data_handling::FeatureMatrix;
use crate::error::Result;
use crate::models::classifier_trait::{check_shape, SiteClassifier};

/// MaxEnt / logistic classifier: a linear-then-sigmoid scoring function over
/// the training feature order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    /// Linear score before the sigmoid.
    pub fn decision_function(&self, row: ArrayView1<f64>) -> f64 {
        self.coefficients
            .iter()
            .zip(row.iter())
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept
    }

    pub(crate) fn probability(&self, row: ArrayView1<f64>) -> f64 {
        sigmoid(self.decision_function(row))
    }
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl SiteClassifier for LogisticModel {
    fn name(&self) -> &str {
        "maxent"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<f64>> {
        check_shape(self.name(), self.n_features(), x)?;
        Ok((0..x.n_rows()).map(|r| self.probability(x.row(r))).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_midpoint_and_saturation() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(20.0) > 0.999);
        assert!(sigmoid(-20.0) < 0.001);
    }

    #[test]
    fn probability_matches_hand_computation() {
        let model = LogisticModel {
            coefficients: vec![2.0, -1.0],
            intercept: 0.5,
        };
        let x = FeatureMatrix::from_columns(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![1.0], vec![1.5]],
        );
        // score = 2*1 - 1*1.5 + 0.5 = 1.0
        let probs = model.predict_proba(&x).unwrap();
        assert!((probs[0] - sigmoid(1.0)).abs() < 1e-12);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let model = LogisticModel {
            coefficients: vec![1.0, 1.0, 1.0],
            intercept: 0.0,
        };
        let x = FeatureMatrix::from_columns(vec!["a".to_string()], vec![vec![1.0]]);
        assert!(model.predict_proba(&x).is_err());
    }
}
