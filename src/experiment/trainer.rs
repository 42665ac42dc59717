//! The real trainer: backend selection, circuit fitting, training-set
//! evaluation.

use std::sync::Arc;

use ndarray::ArrayView2;

use super::{CircuitConfig, TrainOutcome, Trainer};
use crate::backend::BackendRegistry;
use crate::cli::logging::{log, LogLevel};
use crate::error::{Error, Result};
use crate::eval::{accuracy_score, roc_auc_score};
use crate::optim::Spsa;
use crate::vqc::VariationalClassifier;

/// Trains a [`VariationalClassifier`] per configuration on a least-busy
/// backend.
///
/// Metrics are computed on the training data itself; no held-out partition
/// is consulted inside the sweep.
pub struct VqcTrainer<'a> {
    registry: &'a BackendRegistry,
    max_iter: usize,
    seed: u64,
    level: LogLevel,
}

impl<'a> VqcTrainer<'a> {
    pub fn new(registry: &'a BackendRegistry, max_iter: usize, seed: u64, level: LogLevel) -> Self {
        Self {
            registry,
            max_iter,
            seed,
            level,
        }
    }
}

impl Trainer for VqcTrainer<'_> {
    fn train(
        &self,
        x: ArrayView2<'_, f64>,
        y: &[u8],
        config: &CircuitConfig,
    ) -> Result<TrainOutcome> {
        log(
            self.level,
            LogLevel::Normal,
            &format!("\nTraining model with config: {}", config.name()),
        );

        // Structural check comes before any backend is touched
        if config.num_qubits() != x.ncols() {
            return Err(Error::ConfigurationMismatch {
                expected: config.num_qubits(),
                actual: x.ncols(),
            });
        }

        let backend = self.registry.least_busy(config.num_qubits())?;
        log(
            self.level,
            LogLevel::Normal,
            &format!("Using backend: {}", backend.name()),
        );

        // The session guard holds the backend's job slot for the duration of
        // the fit and releases it on drop, error paths included.
        let _session = self.registry.open_session(backend);

        let mut model = VariationalClassifier::new(config.plan(), self.seed);
        model.fit(x, y, &Spsa::new(self.max_iter, self.seed));

        let y_pred = model.predict(x);
        let y_prob = model.predict_proba(x);

        let accuracy = accuracy_score(y, &y_pred);
        let roc_auc = roc_auc_score(y, y_prob.as_slice().unwrap_or(&[]));

        log(
            self.level,
            LogLevel::Normal,
            &format!("Training Accuracy: {accuracy:.4}"),
        );
        log(
            self.level,
            LogLevel::Normal,
            &format!("Training ROC-AUC: {roc_auc:.4}"),
        );

        Ok(TrainOutcome {
            model: Arc::new(model),
            accuracy,
            roc_auc,
            config: config.clone(),
            backend: backend.name().to_string(),
        })
    }
}
