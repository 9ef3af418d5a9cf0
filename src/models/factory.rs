use serde::{Deserialize, Serialize};

use crate::models::classifier_trait::SiteClassifier;
use crate::models::ensemble::EnsembleModel;
use crate::models::logistic::LogisticModel;
use crate::models::random_forest::RandomForestModel;

/// On-disk artifact payload, tagged by model family.
///
/// The file format is JSON; the `family` tag selects the parameter struct.
/// Artifacts are fitted elsewhere and are read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ArtifactSpec {
    Maxent(LogisticModel),
    Ensemble(EnsembleModel),
    RandomForest(RandomForestModel),
}

impl ArtifactSpec {
    /// Deserialize an artifact from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Structural integrity check. A violation means the artifact file is
    /// corrupt; the registry maps it to a load failure naming the path.
    pub fn integrity(&self) -> Result<(), String> {
        match self {
            ArtifactSpec::Maxent(model) => {
                if model.coefficients.is_empty() {
                    return Err("logistic model has no coefficients".to_string());
                }
                Ok(())
            }
            ArtifactSpec::Ensemble(model) => model.integrity(),
            ArtifactSpec::RandomForest(model) => model.integrity(),
        }
    }
}

/// Build a boxed classifier from a deserialized artifact.
pub fn build_model(spec: ArtifactSpec) -> Box<dyn SiteClassifier> {
    match spec {
        ArtifactSpec::Maxent(model) => Box::new(model),
        ArtifactSpec::Ensemble(model) => Box::new(model),
        ArtifactSpec::RandomForest(model) => Box::new(model),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maxent_artifact_round_trips() {
        let json = r#"{"family":"maxent","coefficients":[0.5,-0.25],"intercept":0.1}"#;
        let spec = ArtifactSpec::from_slice(json.as_bytes()).unwrap();
        assert!(spec.integrity().is_ok());
        let model = build_model(spec);
        assert_eq!(model.name(), "maxent");
        assert_eq!(model.n_features(), 2);
    }

    #[test]
    fn unknown_family_is_rejected() {
        let json = r#"{"family":"svm","coefficients":[1.0]}"#;
        assert!(ArtifactSpec::from_slice(json.as_bytes()).is_err());
    }

    #[test]
    fn empty_coefficients_fail_integrity() {
        let json = r#"{"family":"maxent","coefficients":[],"intercept":0.0}"#;
        let spec = ArtifactSpec::from_slice(json.as_bytes()).unwrap();
        assert!(spec.integrity().is_err());
    }
}
