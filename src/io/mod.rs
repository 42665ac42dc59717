//! Model artifact persistence
//!
//! The best outcome of a sweep is serialized to JSON together with enough
//! metadata to know where it came from: configuration name, metrics, the
//! backend that trained it, and a timestamp.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::experiment::ExperimentState;
use crate::vqc::{ClassifierState, VariationalClassifier};

/// Serialized model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedModel {
    /// Name of the winning configuration
    pub config_name: String,
    /// Training accuracy at save time
    pub accuracy: f64,
    /// Ranking metric at save time
    pub roc_auc: f64,
    /// Backend the model was trained on (informational)
    pub backend: String,
    /// When the artifact was written
    pub saved_at: DateTime<Utc>,
    /// The classifier itself
    pub classifier: ClassifierState,
}

/// Persist the best model of `state` to `path`
///
/// Returns `Ok(true)` when an artifact was written and `Ok(false)` when the
/// state holds no best model — the empty case is a no-op by design, and the
/// caller owns the user-visible notice.
pub fn save_best_model(state: &ExperimentState, path: &Path) -> Result<bool> {
    let Some(best) = state.best() else {
        return Ok(false);
    };

    let artifact = SavedModel {
        config_name: best.config.name().to_string(),
        accuracy: best.accuracy,
        roc_auc: best.roc_auc,
        backend: best.backend.clone(),
        saved_at: Utc::now(),
        classifier: best.model.to_state(),
    };

    let json = serde_json::to_string_pretty(&artifact)
        .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?;
    fs::write(path, json)?;
    Ok(true)
}

/// Load a previously saved artifact
pub fn load_model(path: &Path) -> Result<(SavedModel, VariationalClassifier)> {
    let content = fs::read_to_string(path)?;
    let artifact: SavedModel = serde_json::from_str(&content)
        .map_err(|e| Error::Serialization(format!("JSON deserialization failed: {e}")))?;
    let classifier = VariationalClassifier::from_state(artifact.classifier.clone());
    Ok((artifact, classifier))
}
