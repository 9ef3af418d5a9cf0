use ndarray::ArrayView1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data_handling::FeatureMatrix;
use crate::error::{PredictError, Result};
use crate::models::classifier_trait::{check_shape, SiteClassifier};

/// One node of an arena-encoded decision tree. `left`/`right` index into the
/// owning tree's node vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        probability: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk from the root to a leaf. Returns `None` for a malformed tree
    /// (dangling index or a cycle); node count bounds the walk.
    pub fn score(&self, row: ArrayView1<f64>) -> Option<f64> {
        let mut node = 0usize;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(node)? {
                TreeNode::Leaf { probability } => return Some(*probability),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = *row.get(*feature)?;
                    node = if value <= *threshold { *left } else { *right };
                }
            }
        }
        None
    }
}

/// Random forest: the positive-class probability is the mean of the leaf
/// probabilities across trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestModel {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForestModel {
    /// Structural integrity check applied at artifact load time.
    pub fn integrity(&self) -> std::result::Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(format!("tree {} has no nodes", t));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if let TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= self.n_features {
                        return Err(format!(
                            "tree {} node {} splits on feature {} of {}",
                            t, n, feature, self.n_features
                        ));
                    }
                    if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                        return Err(format!("tree {} node {} has a dangling child", t, n));
                    }
                }
            }
        }
        Ok(())
    }

    fn score_row(&self, row: ArrayView1<f64>, records: usize) -> Result<f64> {
        let mut sum = 0.0;
        for tree in &self.trees {
            let leaf = tree.score(row).ok_or_else(|| PredictError::PredictionComputation {
                model: "random_forest".to_string(),
                records,
                detail: "malformed tree encountered during scoring".to_string(),
            })?;
            sum += leaf;
        }
        Ok(sum / self.trees.len() as f64)
    }
}

impl SiteClassifier for RandomForestModel {
    fn name(&self) -> &str {
        "random_forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<f64>> {
        check_shape(self.name(), self.n_features, x)?;
        let records = x.n_rows();
        // Rows are independent; order is preserved by the indexed collect.
        (0..records)
            .into_par_iter()
            .map(|r| self.score_row(x.row(r), records))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { probability: low },
                TreeNode::Leaf { probability: high },
            ],
        }
    }

    #[test]
    fn forest_averages_tree_leaves() {
        let forest = RandomForestModel {
            n_features: 1,
            trees: vec![stump(0, 0.5, 0.2, 0.8), stump(0, 0.5, 0.4, 1.0)],
        };
        let x = FeatureMatrix::from_columns(vec!["f".to_string()], vec![vec![0.0, 1.0]]);
        let probs = forest.predict_proba(&x).unwrap();
        assert!((probs[0] - 0.3).abs() < 1e-12, "left side: {}", probs[0]);
        assert!((probs[1] - 0.9).abs() < 1e-12, "right side: {}", probs[1]);
    }

    #[test]
    fn integrity_rejects_dangling_child() {
        let forest = RandomForestModel {
            n_features: 1,
            trees: vec![DecisionTree {
                nodes: vec![TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 5,
                    right: 6,
                }],
            }],
        };
        assert!(forest.integrity().is_err());
    }

    #[test]
    fn cyclic_tree_fails_instead_of_hanging() {
        let forest = RandomForestModel {
            n_features: 1,
            trees: vec![DecisionTree {
                nodes: vec![TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 0,
                    right: 0,
                }],
            }],
        };
        let x = FeatureMatrix::from_columns(vec!["f".to_string()], vec![vec![1.0]]);
        assert!(forest.predict_proba(&x).is_err());
    }
}
