//! The experiment core: configuration catalog, result state, and the
//! sequential sweep with running-best tracking.
//!
//! The sweep is deliberately simple: one configuration trained to completion
//! at a time, results recorded in catalog order, and the best pointer
//! replaced only on a strictly greater ranking metric — so the first
//! configuration to reach the maximum wins ties. The first training failure
//! aborts the whole run; nothing is retried or skipped.

mod report;
mod trainer;

pub use report::render_report;
pub use trainer::VqcTrainer;

use std::sync::Arc;

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::circuit::{Ansatz, CircuitPlan, Entanglement, FeatureMap};
use crate::error::Result;
use crate::vqc::VariationalClassifier;

/// One named, immutable experiment configuration
///
/// All fields are fixed at construction; the catalog guarantees unique names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitConfig {
    name: String,
    feature_map: FeatureMap,
    ansatz: Ansatz,
    fm_reps: usize,
    ansatz_reps: usize,
    entanglement: Entanglement,
    num_qubits: usize,
}

impl CircuitConfig {
    /// A fully specified configuration; every field is required
    pub fn new(
        name: impl Into<String>,
        feature_map: FeatureMap,
        ansatz: Ansatz,
        fm_reps: usize,
        ansatz_reps: usize,
        entanglement: Entanglement,
        num_qubits: usize,
    ) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "configuration name must be non-empty");
        assert!(num_qubits > 0, "configuration needs at least one qubit");
        assert!(fm_reps > 0, "feature map needs at least one repetition");
        Self {
            name,
            feature_map,
            ansatz,
            fm_reps,
            ansatz_reps,
            entanglement,
            num_qubits,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The executable circuit structure for this configuration
    pub fn plan(&self) -> CircuitPlan {
        CircuitPlan {
            feature_map: self.feature_map,
            fm_reps: self.fm_reps,
            ansatz: self.ansatz,
            ansatz_reps: self.ansatz_reps,
            entanglement: self.entanglement,
            num_qubits: self.num_qubits,
        }
    }
}

/// The fixed configuration catalog, in evaluation order
pub fn catalog(num_qubits: usize) -> Vec<CircuitConfig> {
    vec![
        CircuitConfig::new(
            "ZZFeatureMap + RealAmplitudes (reps=1)",
            FeatureMap::ZzFeatureMap,
            Ansatz::RealAmplitudes,
            1,
            1,
            Entanglement::Full,
            num_qubits,
        ),
        CircuitConfig::new(
            "ZZFeatureMap + RealAmplitudes (reps=2)",
            FeatureMap::ZzFeatureMap,
            Ansatz::RealAmplitudes,
            1,
            2,
            Entanglement::Full,
            num_qubits,
        ),
        CircuitConfig::new(
            "ZZFeatureMap + EfficientSU2",
            FeatureMap::ZzFeatureMap,
            Ansatz::EfficientSu2,
            1,
            1,
            Entanglement::Full,
            num_qubits,
        ),
        CircuitConfig::new(
            "EfficientSU2 + RealAmplitudes",
            FeatureMap::EfficientSu2,
            Ansatz::RealAmplitudes,
            1,
            1,
            Entanglement::Full,
            num_qubits,
        ),
    ]
}

/// Immutable outcome of training one configuration
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    /// Fitted model handle, shared with persistence
    pub model: Arc<VariationalClassifier>,
    /// Fraction of training labels predicted correctly, in [0, 1]
    pub accuracy: f64,
    /// Ranking metric (ROC-AUC on training data), in [0, 1]
    pub roc_auc: f64,
    /// The originating configuration
    pub config: CircuitConfig,
    /// Informational: which execution target trained this model
    pub backend: String,
}

/// Results keyed by configuration name, in insertion order, plus the running
/// best pointer.
///
/// Invariant: `best` points at the earliest recorded outcome whose roc_auc
/// equals the maximum over all recorded outcomes, or is `None` when empty.
#[derive(Debug, Clone, Default)]
pub struct ExperimentState {
    runs: Vec<TrainOutcome>,
    best: Option<usize>,
}

impl ExperimentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome and update the running best
    ///
    /// Strictly-greater comparison: a later outcome tying the current best
    /// score does not replace it.
    pub fn record(&mut self, outcome: TrainOutcome) {
        let improves = match self.best {
            None => true,
            Some(i) => outcome.roc_auc > self.runs[i].roc_auc,
        };
        self.runs.push(outcome);
        if improves {
            self.best = Some(self.runs.len() - 1);
        }
    }

    /// All recorded outcomes, in insertion order
    pub fn runs(&self) -> &[TrainOutcome] {
        &self.runs
    }

    /// Look up an outcome by configuration name
    pub fn get(&self, name: &str) -> Option<&TrainOutcome> {
        self.runs.iter().find(|r| r.config.name() == name)
    }

    /// The running best outcome, if any was recorded
    pub fn best(&self) -> Option<&TrainOutcome> {
        self.best.map(|i| &self.runs[i])
    }

    /// Ranking metric of the running best
    pub fn best_score(&self) -> Option<f64> {
        self.best().map(|r| r.roc_auc)
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }
}

/// Anything that can turn a configuration plus training data into an outcome
pub trait Trainer {
    fn train(
        &self,
        x: ArrayView2<'_, f64>,
        y: &[u8],
        config: &CircuitConfig,
    ) -> Result<TrainOutcome>;
}

/// Evaluate every catalog entry in order, recording each outcome
///
/// Blocking and strictly sequential. The first error aborts the run and
/// propagates; already-recorded outcomes are dropped with it.
pub fn run_experiment<T: Trainer>(
    trainer: &T,
    x: ArrayView2<'_, f64>,
    y: &[u8],
    configs: &[CircuitConfig],
) -> Result<ExperimentState> {
    let mut state = ExperimentState::new();
    for config in configs {
        let outcome = trainer.train(x, y, config)?;
        state.record(outcome);
    }
    Ok(state)
}
