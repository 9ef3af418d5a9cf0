use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The classifier variants shipped with the tool.
///
/// Each variant names one pre-trained artifact in the model directory; the
/// kind doubles as the stable storage name (`maxent.json` etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Maxent,
    Ensemble,
    RandomForest,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Maxent, ModelKind::Ensemble, ModelKind::RandomForest];

    /// Stable artifact file stem for this variant.
    pub fn artifact_stem(&self) -> &'static str {
        match self {
            ModelKind::Maxent => "maxent",
            ModelKind::Ensemble => "ensemble",
            ModelKind::RandomForest => "random_forest",
        }
    }

    /// Artifact file name inside the model directory.
    pub fn artifact_file(&self) -> String {
        format!("{}.json", self.artifact_stem())
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.artifact_stem())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "maxent" | "logistic" => Ok(ModelKind::Maxent),
            "ensemble" => Ok(ModelKind::Ensemble),
            "random_forest" | "forest" => Ok(ModelKind::RandomForest),
            _ => Err(format!(
                "Unknown model kind: {}. Expected one of maxent, ensemble, random_forest",
                s
            )),
        }
    }
}

/// File name of the optional training-feature-order file co-located with the
/// model artifacts (one encoded column name per line, in training order).
pub const FEATURE_ORDER_FILE: &str = "feature_order.txt";
