//! Model registry: resolves a model kind to a ready classifier, loading the
//! artifact from disk on first request and caching it for the process
//! lifetime.
//!
//! The check-load-populate sequence runs under a mutex so concurrent first
//! access never duplicates a load or observes a partially initialized
//! artifact. Loaded models are immutable and shared as `Arc`s.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::{ModelKind, FEATURE_ORDER_FILE};
use crate::contract::FeatureContract;
use crate::error::{PredictError, Result};
use crate::models::{build_model, ArtifactSpec, SiteClassifier};

pub struct ModelRegistry {
    model_dir: PathBuf,
    contract: Arc<FeatureContract>,
    cache: Mutex<HashMap<ModelKind, Arc<dyn SiteClassifier>>>,
}

impl ModelRegistry {
    /// Open a registry over a directory of serialized artifacts. The
    /// optional training-feature-order file is read once here; its absence
    /// degrades preprocessing to encoded-column order.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        let model_dir = model_dir.into();
        let mut contract = FeatureContract::confirmed_site();
        match read_feature_order(&model_dir.join(FEATURE_ORDER_FILE)) {
            Some(order) => {
                log::debug!("training feature order loaded: {} columns", order.len());
                contract = contract.with_training_order(order);
            }
            None => log::warn!(
                "no {} in {}; encoded column order will be used",
                FEATURE_ORDER_FILE,
                model_dir.display()
            ),
        }
        ModelRegistry {
            model_dir,
            contract: Arc::new(contract),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Expected artifact location for a model kind.
    pub fn artifact_path(&self, kind: ModelKind) -> PathBuf {
        self.model_dir.join(kind.artifact_file())
    }

    /// The feature contract a model family was trained against. All shipped
    /// variants share the confirmed-site schema.
    pub fn contract_for(&self, _kind: ModelKind) -> Arc<FeatureContract> {
        Arc::clone(&self.contract)
    }

    /// Deserialize an artifact from disk, bypassing the cache.
    pub fn load(&self, kind: ModelKind) -> Result<Arc<dyn SiteClassifier>> {
        let path = self.artifact_path(kind);
        let bytes = fs::read(&path).map_err(|e| PredictError::ModelLoad {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        let spec = ArtifactSpec::from_slice(&bytes).map_err(|e| PredictError::ModelLoad {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        spec.integrity().map_err(|detail| PredictError::ModelLoad {
            path: path.clone(),
            detail,
        })?;
        log::debug!("loaded model '{}' from {}", kind, path.display());
        Ok(Arc::from(build_model(spec)))
    }

    /// Cached load; idempotent and safe under concurrent first access.
    pub fn get_or_load(&self, kind: ModelKind) -> Result<Arc<dyn SiteClassifier>> {
        let mut cache = self.cache.lock().expect("registry cache poisoned");
        if let Some(model) = cache.get(&kind) {
            return Ok(Arc::clone(model));
        }
        let model = self.load(kind)?;
        cache.insert(kind, Arc::clone(&model));
        Ok(model)
    }
}

fn read_feature_order(path: &Path) -> Option<Vec<String>> {
    let text = fs::read_to_string(path).ok()?;
    let order: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if order.is_empty() {
        None
    } else {
        Some(order)
    }
}
