//! Integration tests for the experiment sweep: ordering, tie-breaks, empty
//! catalogs, and persistence of the winner.

use std::sync::Arc;

use ndarray::{array, Array2, ArrayView2};
use tempfile::TempDir;

use detectar::backend::{Backend, BackendRegistry};
use detectar::circuit::{Ansatz, Entanglement, FeatureMap};
use detectar::cli::LogLevel;
use detectar::experiment::{
    catalog, render_report, run_experiment, CircuitConfig, ExperimentState, TrainOutcome, Trainer,
    VqcTrainer,
};
use detectar::io::{load_model, save_best_model};
use detectar::vqc::VariationalClassifier;
use detectar::{Error, Result};

/// Trainer with canned ranking scores, keyed by configuration name
struct ScriptedTrainer {
    scores: Vec<(&'static str, f64)>,
}

impl Trainer for ScriptedTrainer {
    fn train(
        &self,
        _x: ArrayView2<'_, f64>,
        _y: &[u8],
        config: &CircuitConfig,
    ) -> Result<TrainOutcome> {
        let score = self
            .scores
            .iter()
            .find(|(n, _)| *n == config.name())
            .map(|(_, s)| *s)
            .expect("scripted score exists for every catalog entry");
        Ok(TrainOutcome {
            model: Arc::new(VariationalClassifier::new(config.plan(), 0)),
            accuracy: score,
            roc_auc: score,
            config: config.clone(),
            backend: "scripted".to_string(),
        })
    }
}

fn named_configs(names: &[&str]) -> Vec<CircuitConfig> {
    names
        .iter()
        .map(|n| {
            CircuitConfig::new(
                *n,
                FeatureMap::ZzFeatureMap,
                Ansatz::RealAmplitudes,
                1,
                1,
                Entanglement::Linear,
                2,
            )
        })
        .collect()
}

#[test]
fn test_first_configuration_wins_score_ties() {
    // Catalog [A=0.70, B=0.95, C=0.95] -> best is B, not C
    let trainer = ScriptedTrainer {
        scores: vec![("A", 0.70), ("B", 0.95), ("C", 0.95)],
    };
    let x = Array2::zeros((4, 2));
    let state = run_experiment(&trainer, x.view(), &[0, 1, 0, 1], &named_configs(&["A", "B", "C"]))
        .unwrap();

    assert_eq!(state.best().unwrap().config.name(), "B");
    assert_eq!(state.best_score(), Some(0.95));

    // Reporter recomputes the best independently and must agree
    let report = render_report(&state);
    assert!(report.contains("Best model: B"));
    assert!(report.contains("Best ROC-AUC: 0.9500"));
}

#[test]
fn test_empty_catalog_reports_and_saves_without_crashing() {
    let trainer = ScriptedTrainer { scores: vec![] };
    let x = Array2::zeros((2, 2));
    let state = run_experiment(&trainer, x.view(), &[0, 1], &[]).unwrap();

    let report = render_report(&state);
    assert!(report.contains("No results recorded."));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("best_model.json");
    let saved = save_best_model(&state, &path).unwrap();
    assert!(!saved);
    assert!(!path.exists());
}

#[test]
fn test_save_is_noop_iff_best_absent() {
    let dir = TempDir::new().unwrap();

    // Empty state: no artifact
    let empty = ExperimentState::new();
    assert!(!save_best_model(&empty, &dir.path().join("a.json")).unwrap());

    // Any recorded outcome means a best exists and the artifact is written
    let trainer = ScriptedTrainer {
        scores: vec![("only", 0.0)],
    };
    let x = Array2::zeros((2, 2));
    let state = run_experiment(&trainer, x.view(), &[0, 1], &named_configs(&["only"])).unwrap();
    let path = dir.path().join("b.json");
    assert!(save_best_model(&state, &path).unwrap());
    assert_eq!(load_model(&path).unwrap().0.config_name, "only");
}

#[test]
fn test_real_trainer_full_catalog_sweep_is_deterministic() {
    // Tiny two-qubit sweep over the real catalog entries
    let x = array![
        [0.2, 0.4],
        [0.9, -0.3],
        [-0.7, 0.5],
        [0.1, 0.1],
        [0.6, -0.6],
        [-0.2, 0.8]
    ];
    let y = vec![0u8, 1, 0, 1, 0, 1];

    let sweep = || {
        let registry = BackendRegistry::with_default_simulators();
        let trainer = VqcTrainer::new(&registry, 5, 42, LogLevel::Quiet);
        run_experiment(&trainer, x.view(), &y, &catalog(2)).unwrap()
    };

    let first = sweep();
    let second = sweep();

    assert_eq!(first.len(), 4);
    for (a, b) in first.runs().iter().zip(second.runs().iter()) {
        assert_eq!(a.config.name(), b.config.name());
        assert_eq!(a.accuracy, b.accuracy);
        assert_eq!(a.roc_auc, b.roc_auc);
        assert!((0.0..=1.0).contains(&a.accuracy));
        assert!((0.0..=1.0).contains(&a.roc_auc));
    }
    assert_eq!(
        first.best().unwrap().config.name(),
        second.best().unwrap().config.name()
    );
}

#[test]
fn test_mismatched_catalog_aborts_whole_run() {
    // Ten-qubit catalog against two-column data: the first configuration
    // fails with ConfigurationMismatch and nothing is recorded
    let registry = BackendRegistry::with_default_simulators();
    let trainer = VqcTrainer::new(&registry, 5, 42, LogLevel::Quiet);
    let x = Array2::zeros((4, 2));

    let err = run_experiment(&trainer, x.view(), &[0, 1, 0, 1], &catalog(10)).unwrap_err();
    assert!(matches!(
        err,
        Error::ConfigurationMismatch {
            expected: 10,
            actual: 2
        }
    ));
}

#[test]
fn test_backendless_registry_fails_the_run() {
    let registry = BackendRegistry::new();
    let trainer = VqcTrainer::new(&registry, 5, 42, LogLevel::Quiet);
    let x = Array2::zeros((4, 2));

    let err = run_experiment(&trainer, x.view(), &[0, 1, 0, 1], &catalog(2)).unwrap_err();
    assert!(matches!(err, Error::BackendUnavailable(_)));
}

#[test]
fn test_sweep_releases_all_sessions() {
    let mut registry = BackendRegistry::new();
    registry.register(Backend::new("solo", 16, true));
    let trainer = VqcTrainer::new(&registry, 2, 1, LogLevel::Quiet);

    let x = array![[0.2, 0.4], [0.9, -0.3], [-0.7, 0.5], [0.1, 0.1]];
    let y = vec![0u8, 1, 0, 1];
    run_experiment(&trainer, x.view(), &y, &catalog(2)).unwrap();

    assert_eq!(registry.backends()[0].pending_jobs(), 0);
}
