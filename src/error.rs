use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Failures surfaced by the prediction core.
///
/// None of these are recovered silently: every variant propagates to the
/// caller, which decides user-facing presentation.
#[derive(Debug)]
pub enum PredictError {
    /// Input bytes could not be parsed into a tabular structure. Carries the
    /// original parse failure message verbatim.
    DataFormat(String),
    /// Parsed table lacks required columns per the feature contract.
    SchemaValidation { missing: Vec<String> },
    /// Model artifact missing or corrupt at its expected location.
    ModelLoad { path: PathBuf, detail: String },
    /// Failure during numeric inference, e.g. a shape mismatch after
    /// reindexing.
    PredictionComputation {
        model: String,
        records: usize,
        detail: String,
    },
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PredictError::DataFormat(msg) => write!(f, "failed to parse tabular input: {}", msg),
            PredictError::SchemaValidation { missing } => {
                write!(f, "missing required columns: {}", missing.join(", "))
            }
            PredictError::ModelLoad { path, detail } => {
                write!(
                    f,
                    "failed to load model artifact {}: {}",
                    path.display(),
                    detail
                )
            }
            PredictError::PredictionComputation {
                model,
                records,
                detail,
            } => write!(
                f,
                "prediction failed for model '{}' over {} records: {}",
                model, records, detail
            ),
        }
    }
}

impl Error for PredictError {}

pub type Result<T> = std::result::Result<T, PredictError>;
