//! Feature contracts: the fixed, named column sets each model family was
//! trained on.
//!
//! A contract is loaded once as process-wide read-only configuration and
//! never re-derived per call. It declares which raw columns a valid input
//! must contain, which are categorical (one-hot encoded), which are
//! identifier columns dropped outright, the target/label column, and the
//! exact post-encoding column order used at training time when that order
//! has been persisted alongside the artifacts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Column roles for one model family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureContract {
    /// Raw feature columns a valid input must contain.
    pub required_columns: Vec<String>,
    /// Raw columns one-hot encoded into `column_value` indicator columns.
    pub categorical_columns: Vec<String>,
    /// Identifier columns removed when present; absence is not an error.
    pub dropped_columns: Vec<String>,
    /// Ground-truth label column. Required on the evaluation path only.
    pub target_column: String,
    /// Post-encoding column order used at training time, when persisted.
    pub training_feature_order: Option<Vec<String>>,
}

impl FeatureContract {
    /// The shipped confirmed-site schema all three model variants were
    /// trained against.
    pub fn confirmed_site() -> Self {
        FeatureContract {
            required_columns: vec![
                "DistMinas".to_string(),
                "Minas1000m".to_string(),
                "TipoCultivo".to_string(),
                "Dist_NoComb".to_string(),
                "Dens_NoComb".to_string(),
                "Num_PrediosURT".to_string(),
                "Tipo_Cobertura".to_string(),
                "Tipo_Relieve".to_string(),
                "Pendiente".to_string(),
                "Aspecto".to_string(),
                "Dist_Via".to_string(),
                "Tipo_Via".to_string(),
                "Dist_EventoCombatiente".to_string(),
                "Dens_EventoCombatiente".to_string(),
            ],
            categorical_columns: vec![
                "TipoCultivo".to_string(),
                "Tipo_Cobertura".to_string(),
                "Tipo_Relieve".to_string(),
                "Tipo_Via".to_string(),
            ],
            dropped_columns: vec!["fid".to_string(), "FID_Mina".to_string()],
            target_column: "tipo_punto".to_string(),
            training_feature_order: None,
        }
    }

    /// Attach a persisted training feature order to this contract.
    pub fn with_training_order(mut self, order: Vec<String>) -> Self {
        self.training_feature_order = Some(order);
        self
    }

    /// True iff every required feature column is present. Extra columns are
    /// ignored; callers must treat `false` as a hard stop before
    /// preprocessing.
    pub fn validate<S: AsRef<str>>(&self, columns: &[S]) -> bool {
        self.missing_columns(columns).is_empty()
    }

    /// Required feature columns absent from `columns`, in contract order.
    pub fn missing_columns<S: AsRef<str>>(&self, columns: &[S]) -> Vec<String> {
        let present: HashSet<&str> = columns.iter().map(|c| c.as_ref()).collect();
        self.required_columns
            .iter()
            .filter(|c| !present.contains(c.as_str()))
            .cloned()
            .collect()
    }

    /// As [`missing_columns`](Self::missing_columns), additionally requiring
    /// the target column. Used by the evaluation path, where predictions are
    /// compared against ground truth.
    pub fn missing_columns_labeled<S: AsRef<str>>(&self, columns: &[S]) -> Vec<String> {
        let mut missing = self.missing_columns(columns);
        if !columns.iter().any(|c| c.as_ref() == self.target_column) {
            missing.push(self.target_column.clone());
        }
        missing
    }

    pub fn is_categorical(&self, column: &str) -> bool {
        self.categorical_columns.iter().any(|c| c == column)
    }

    pub fn is_dropped(&self, column: &str) -> bool {
        self.dropped_columns.iter().any(|c| c == column)
    }
}

/// Display name for a predicted class.
pub fn class_name(class: i32) -> &'static str {
    match class {
        0 => "Fondo",
        1 => "Presencia",
        _ => "Desconocido",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_cover_both_classes() {
        assert_eq!(class_name(0), "Fondo");
        assert_eq!(class_name(1), "Presencia");
        assert_eq!(class_name(7), "Desconocido");
    }

    #[test]
    fn dropped_ids_are_not_required() {
        let contract = FeatureContract::confirmed_site();
        assert!(!contract.required_columns.contains(&"fid".to_string()));
        assert!(!contract.required_columns.contains(&"FID_Mina".to_string()));
    }
}
