//! Variational classifier
//!
//! Wraps a [`CircuitSampler`] with a trainable parameter vector. `fit`
//! minimizes binary cross-entropy of the circuit's positive-class
//! probability; prediction thresholds that probability at 0.5.

use ndarray::{Array1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::circuit::CircuitPlan;
use crate::optim::Spsa;
use crate::sim::CircuitSampler;

/// Probability clamp so the cross-entropy stays finite
const EPS: f64 = 1e-10;

/// A fitted (or fittable) variational classifier
#[derive(Debug, Clone)]
pub struct VariationalClassifier {
    sampler: CircuitSampler,
    params: Array1<f64>,
}

/// Serializable snapshot of a classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierState {
    pub plan: CircuitPlan,
    pub params: Vec<f64>,
}

impl VariationalClassifier {
    /// Untrained classifier with parameters drawn uniformly from [-pi, pi]
    pub fn new(plan: CircuitPlan, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let params = (0..plan.num_parameters())
            .map(|_| rng.random_range(-std::f64::consts::PI..std::f64::consts::PI))
            .collect();
        Self {
            sampler: CircuitSampler::new(plan),
            params,
        }
    }

    pub fn plan(&self) -> &CircuitPlan {
        self.sampler.plan()
    }

    pub fn params(&self) -> &Array1<f64> {
        &self.params
    }

    /// Fit against training data by minimizing binary cross-entropy
    ///
    /// Returns the final training loss. The optimizer's iteration budget is
    /// the only stopping criterion.
    pub fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[u8], optimizer: &Spsa) -> f64 {
        let sampler = self.sampler.clone();
        let loss = |params: &Array1<f64>| {
            let p = params.as_slice().unwrap_or(&[]);
            let mut total = 0.0;
            for (row, &label) in x.rows().into_iter().zip(y.iter()) {
                let prob = sampler
                    .positive_probability(row, p)
                    .clamp(EPS, 1.0 - EPS);
                total -= if label == 1 {
                    prob.ln()
                } else {
                    (1.0 - prob).ln()
                };
            }
            total / y.len().max(1) as f64
        };

        let (best, best_loss) = optimizer.minimize(self.params.clone(), loss);
        self.params = best;
        best_loss
    }

    /// Positive-class probability per row
    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        let p = self.params.as_slice().unwrap_or(&[]);
        x.rows()
            .into_iter()
            .map(|row| self.sampler.positive_probability(row, p))
            .collect()
    }

    /// Hard labels at the 0.5 threshold
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Vec<u8> {
        self.predict_proba(x)
            .iter()
            .map(|&p| u8::from(p >= 0.5))
            .collect()
    }

    /// Snapshot for persistence
    pub fn to_state(&self) -> ClassifierState {
        ClassifierState {
            plan: self.sampler.plan().clone(),
            params: self.params.to_vec(),
        }
    }

    /// Rebuild from a persisted snapshot
    pub fn from_state(state: ClassifierState) -> Self {
        Self {
            sampler: CircuitSampler::new(state.plan),
            params: Array1::from_vec(state.params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Ansatz, Entanglement, FeatureMap};
    use ndarray::array;

    fn toy_plan() -> CircuitPlan {
        CircuitPlan {
            feature_map: FeatureMap::ZzFeatureMap,
            fm_reps: 1,
            ansatz: Ansatz::RealAmplitudes,
            ansatz_reps: 1,
            entanglement: Entanglement::Linear,
            num_qubits: 2,
        }
    }

    #[test]
    fn test_new_parameter_count_matches_plan() {
        let clf = VariationalClassifier::new(toy_plan(), 42);
        assert_eq!(clf.params().len(), toy_plan().num_parameters());
    }

    #[test]
    fn test_same_seed_same_initial_params() {
        let a = VariationalClassifier::new(toy_plan(), 42);
        let b = VariationalClassifier::new(toy_plan(), 42);
        assert_eq!(a.params(), b.params());
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        let clf = VariationalClassifier::new(toy_plan(), 1);
        let x = array![[0.1, 0.9], [-0.5, 0.3], [1.2, -1.2]];
        for p in clf.predict_proba(x.view()) {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_predict_thresholds_proba() {
        let clf = VariationalClassifier::new(toy_plan(), 1);
        let x = array![[0.1, 0.9], [-0.5, 0.3]];
        let probs = clf.predict_proba(x.view());
        let labels = clf.predict(x.view());
        for (p, l) in probs.iter().zip(labels.iter()) {
            assert_eq!(*l, u8::from(*p >= 0.5));
        }
    }

    #[test]
    fn test_fit_does_not_worsen_loss() {
        let mut clf = VariationalClassifier::new(toy_plan(), 5);
        let x = array![[0.2, 0.4], [0.9, -0.3], [-0.7, 0.5], [0.1, 0.1]];
        let y = vec![0, 1, 0, 1];

        let sampler = CircuitSampler::new(toy_plan());
        let start_params = clf.params().clone();
        let start_loss = {
            let p = start_params.as_slice().unwrap();
            let mut total = 0.0;
            for (row, &label) in x.rows().into_iter().zip(y.iter()) {
                let prob = sampler.positive_probability(row, p).clamp(EPS, 1.0 - EPS);
                total -= if label == 1 { prob.ln() } else { (1.0 - prob).ln() };
            }
            total / y.len() as f64
        };

        let final_loss = clf.fit(x.view(), &y, &Spsa::new(15, 9));
        assert!(final_loss <= start_loss + 1e-12);
    }

    #[test]
    fn test_fit_is_deterministic_under_fixed_seed() {
        let x = array![[0.2, 0.4], [0.9, -0.3], [-0.7, 0.5]];
        let y = vec![0, 1, 0];

        let run = || {
            let mut clf = VariationalClassifier::new(toy_plan(), 11);
            clf.fit(x.view(), &y, &Spsa::new(10, 11));
            clf.params().clone()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_state_roundtrip_preserves_predictions() {
        let clf = VariationalClassifier::new(toy_plan(), 3);
        let x = array![[0.3, -0.2], [0.8, 0.8]];

        let json = serde_json::to_string(&clf.to_state()).unwrap();
        let restored = VariationalClassifier::from_state(serde_json::from_str(&json).unwrap());

        assert_eq!(clf.predict_proba(x.view()), restored.predict_proba(x.view()));
    }
}
