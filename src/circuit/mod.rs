//! Parameterized circuit structure: feature maps, ansätze, and their
//! composition into a single executable plan.
//!
//! A [`CircuitPlan`] is pure structure — which rotation layers exist, how
//! qubits are entangled, how many trainable parameters the ansatz carries.
//! Execution lives in [`crate::sim`].

use serde::{Deserialize, Serialize};

/// Entanglement topology for two-qubit layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entanglement {
    /// Every qubit pair (i, j) with i < j
    Full,
    /// Nearest neighbours (i, i+1)
    Linear,
    /// Nearest neighbours plus a closing (n-1, 0) pair
    Circular,
}

impl Entanglement {
    /// Ordered control/target pairs for `num_qubits` under this topology
    pub fn pairs(&self, num_qubits: usize) -> Vec<(usize, usize)> {
        match self {
            Entanglement::Full => (0..num_qubits)
                .flat_map(|i| (i + 1..num_qubits).map(move |j| (i, j)))
                .collect(),
            Entanglement::Linear => (0..num_qubits.saturating_sub(1))
                .map(|i| (i, i + 1))
                .collect(),
            Entanglement::Circular => {
                let mut pairs = Entanglement::Linear.pairs(num_qubits);
                if num_qubits > 2 {
                    pairs.push((num_qubits - 1, 0));
                }
                pairs
            }
        }
    }
}

/// Data-encoding layer choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureMap {
    /// Hadamard layer followed by single- and two-qubit phase rotations
    /// driven by feature values
    ZzFeatureMap,
    /// RY/RZ rotation layers with entangling gates, angles driven by
    /// feature values cycled across the rotation slots
    EfficientSu2,
}

/// Trainable variational-form choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ansatz {
    /// Alternating RY rotation and entangling layers; real amplitudes only
    RealAmplitudes,
    /// Alternating RY+RZ rotation and entangling layers
    EfficientSu2,
}

impl Ansatz {
    /// Trainable parameter count for `num_qubits` and `reps` repetitions
    ///
    /// Both forms carry `reps + 1` rotation layers; EfficientSU2 rotates
    /// around two axes per layer.
    pub fn num_parameters(&self, num_qubits: usize, reps: usize) -> usize {
        match self {
            Ansatz::RealAmplitudes => num_qubits * (reps + 1),
            Ansatz::EfficientSu2 => 2 * num_qubits * (reps + 1),
        }
    }
}

/// Composed circuit: one feature map followed by one ansatz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitPlan {
    pub feature_map: FeatureMap,
    pub fm_reps: usize,
    pub ansatz: Ansatz,
    pub ansatz_reps: usize,
    pub entanglement: Entanglement,
    pub num_qubits: usize,
}

impl CircuitPlan {
    /// Width of the circuit (equals the expected feature count)
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Trainable parameter count of the ansatz portion
    pub fn num_parameters(&self) -> usize {
        self.ansatz.num_parameters(self.num_qubits, self.ansatz_reps)
    }

    /// Entangling pairs shared by the feature map and ansatz layers
    pub fn entangler_pairs(&self) -> Vec<(usize, usize)> {
        self.entanglement.pairs(self.num_qubits)
    }
}
