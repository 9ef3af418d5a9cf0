use serde::{Deserialize, Serialize};

use crate::data_handling::FeatureMatrix;
use crate::error::Result;
use crate::models::classifier_trait::{check_shape, SiteClassifier};
use crate::models::logistic::LogisticModel;

/// Bagged ensemble of logistic members. The positive-class probability is
/// the (optionally weighted) mean of the member probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleModel {
    pub members: Vec<LogisticModel>,
    /// Per-member weights; uniform when absent.
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

impl EnsembleModel {
    /// Structural integrity check applied at artifact load time.
    pub fn integrity(&self) -> std::result::Result<(), String> {
        if self.members.is_empty() {
            return Err("ensemble has no members".to_string());
        }
        let width = self.members[0].coefficients.len();
        if self.members.iter().any(|m| m.coefficients.len() != width) {
            return Err("ensemble members disagree on feature count".to_string());
        }
        if let Some(weights) = &self.weights {
            if weights.len() != self.members.len() {
                return Err(format!(
                    "{} weights for {} members",
                    weights.len(),
                    self.members.len()
                ));
            }
            if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err("ensemble weights must be finite and non-negative".to_string());
            }
            if weights.iter().sum::<f64>() <= 0.0 {
                return Err("ensemble weights sum to zero".to_string());
            }
        }
        Ok(())
    }
}

impl SiteClassifier for EnsembleModel {
    fn name(&self) -> &str {
        "ensemble"
    }

    fn n_features(&self) -> usize {
        self.members.first().map_or(0, |m| m.coefficients.len())
    }

    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<f64>> {
        check_shape(self.name(), self.n_features(), x)?;
        let total: f64 = match &self.weights {
            Some(w) => w.iter().sum(),
            None => self.members.len() as f64,
        };
        let probs = (0..x.n_rows())
            .map(|r| {
                let row = x.row(r);
                let weighted: f64 = self
                    .members
                    .iter()
                    .enumerate()
                    .map(|(i, m)| {
                        let w = self.weights.as_ref().map_or(1.0, |w| w[i]);
                        w * m.probability(row)
                    })
                    .sum();
                weighted / total
            })
            .collect();
        Ok(probs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(coefficients: Vec<f64>, intercept: f64) -> LogisticModel {
        LogisticModel {
            coefficients,
            intercept,
        }
    }

    #[test]
    fn uniform_mean_of_members() {
        let ensemble = EnsembleModel {
            members: vec![member(vec![0.0], 10.0), member(vec![0.0], -10.0)],
            weights: None,
        };
        let x = FeatureMatrix::from_columns(vec!["a".to_string()], vec![vec![0.0]]);
        let probs = ensemble.predict_proba(&x).unwrap();
        // sigmoid(10) + sigmoid(-10) averages to ~0.5
        assert!((probs[0] - 0.5).abs() < 1e-3, "got {}", probs[0]);
    }

    #[test]
    fn integrity_rejects_ragged_members() {
        let ensemble = EnsembleModel {
            members: vec![member(vec![1.0], 0.0), member(vec![1.0, 2.0], 0.0)],
            weights: None,
        };
        assert!(ensemble.integrity().is_err());
    }

    #[test]
    fn integrity_rejects_mismatched_weights() {
        let ensemble = EnsembleModel {
            members: vec![member(vec![1.0], 0.0)],
            weights: Some(vec![0.5, 0.5]),
        };
        assert!(ensemble.integrity().is_err());
    }
}
