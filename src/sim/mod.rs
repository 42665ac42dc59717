//! Dense statevector execution of a [`CircuitPlan`]
//!
//! Amplitudes are held as parallel real/imaginary `Vec<f64>` buffers; gate
//! kernels walk basis-state indices directly. Capacity is bounded by
//! `2^num_qubits` amplitudes, which is fine for the ten-qubit circuits the
//! experiment catalog uses.
//!
//! The positive-class probability read out by [`CircuitSampler`] is the total
//! probability of odd-parity basis states, the usual parity observable for a
//! two-class sampler network.

use ndarray::ArrayView1;

use crate::circuit::{Ansatz, CircuitPlan, FeatureMap};

const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Dense statevector over `2^num_qubits` amplitudes
#[derive(Debug, Clone)]
pub struct Statevector {
    re: Vec<f64>,
    im: Vec<f64>,
    num_qubits: usize,
}

impl Statevector {
    /// All-zeros basis state |0...0>
    pub fn new(num_qubits: usize) -> Self {
        let dim = 1 << num_qubits;
        let mut re = vec![0.0; dim];
        re[0] = 1.0;
        Self {
            re,
            im: vec![0.0; dim],
            num_qubits,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Apply a real-valued 2x2 gate [[m00, m01], [m10, m11]] on `qubit`
    fn apply_real(&mut self, qubit: usize, m00: f64, m01: f64, m10: f64, m11: f64) {
        let mask = 1 << qubit;
        for i in 0..self.re.len() {
            if i & mask == 0 {
                let j = i | mask;
                let (ar, ai) = (self.re[i], self.im[i]);
                let (br, bi) = (self.re[j], self.im[j]);
                self.re[i] = m00 * ar + m01 * br;
                self.im[i] = m00 * ai + m01 * bi;
                self.re[j] = m10 * ar + m11 * br;
                self.im[j] = m10 * ai + m11 * bi;
            }
        }
    }

    /// Hadamard
    pub fn h(&mut self, qubit: usize) {
        self.apply_real(
            qubit,
            FRAC_1_SQRT_2,
            FRAC_1_SQRT_2,
            FRAC_1_SQRT_2,
            -FRAC_1_SQRT_2,
        );
    }

    /// Rotation around Y by `theta`
    pub fn ry(&mut self, qubit: usize, theta: f64) {
        let (sin, cos) = (theta / 2.0).sin_cos();
        self.apply_real(qubit, cos, -sin, sin, cos);
    }

    /// Rotation around Z by `theta`: diag(e^{-i t/2}, e^{i t/2})
    pub fn rz(&mut self, qubit: usize, theta: f64) {
        let (sin, cos) = (theta / 2.0).sin_cos();
        let mask = 1 << qubit;
        for i in 0..self.re.len() {
            let (r, im) = (self.re[i], self.im[i]);
            if i & mask == 0 {
                self.re[i] = r * cos + im * sin;
                self.im[i] = im * cos - r * sin;
            } else {
                self.re[i] = r * cos - im * sin;
                self.im[i] = im * cos + r * sin;
            }
        }
    }

    /// Phase gate: |1> picks up e^{i theta}
    pub fn phase(&mut self, qubit: usize, theta: f64) {
        let (sin, cos) = theta.sin_cos();
        let mask = 1 << qubit;
        for i in 0..self.re.len() {
            if i & mask != 0 {
                let (r, im) = (self.re[i], self.im[i]);
                self.re[i] = r * cos - im * sin;
                self.im[i] = im * cos + r * sin;
            }
        }
    }

    /// Controlled-X with `control` and `target`
    pub fn cx(&mut self, control: usize, target: usize) {
        let cmask = 1 << control;
        let tmask = 1 << target;
        for i in 0..self.re.len() {
            if i & cmask != 0 && i & tmask == 0 {
                let j = i | tmask;
                self.re.swap(i, j);
                self.im.swap(i, j);
            }
        }
    }

    /// Probability of measuring basis state `index`
    pub fn probability(&self, index: usize) -> f64 {
        self.re[index] * self.re[index] + self.im[index] * self.im[index]
    }

    /// Total probability of basis states with odd population parity
    pub fn odd_parity_probability(&self) -> f64 {
        (0..self.re.len())
            .filter(|i| i.count_ones() % 2 == 1)
            .map(|i| self.probability(i))
            .sum()
    }
}

/// Executes a [`CircuitPlan`] against one feature row and a parameter vector
#[derive(Debug, Clone)]
pub struct CircuitSampler {
    plan: CircuitPlan,
}

impl CircuitSampler {
    pub fn new(plan: CircuitPlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &CircuitPlan {
        &self.plan
    }

    /// Positive-class probability for one sample
    ///
    /// `features.len()` must equal the plan's qubit count and `params.len()`
    /// its parameter count; both are enforced upstream when the trainer
    /// validates the configuration against the prepared feature width.
    pub fn positive_probability(&self, features: ArrayView1<'_, f64>, params: &[f64]) -> f64 {
        debug_assert_eq!(features.len(), self.plan.num_qubits());
        debug_assert_eq!(params.len(), self.plan.num_parameters());

        let mut sv = Statevector::new(self.plan.num_qubits());
        self.apply_feature_map(&mut sv, features);
        self.apply_ansatz(&mut sv, params);
        sv.odd_parity_probability()
    }

    fn apply_feature_map(&self, sv: &mut Statevector, x: ArrayView1<'_, f64>) {
        let n = self.plan.num_qubits();
        let pairs = self.plan.entangler_pairs();

        match self.plan.feature_map {
            FeatureMap::ZzFeatureMap => {
                use std::f64::consts::PI;
                for _ in 0..self.plan.fm_reps {
                    for q in 0..n {
                        sv.h(q);
                    }
                    for q in 0..n {
                        sv.phase(q, 2.0 * x[q]);
                    }
                    for &(i, j) in &pairs {
                        sv.cx(i, j);
                        sv.phase(j, 2.0 * (PI - x[i]) * (PI - x[j]));
                        sv.cx(i, j);
                    }
                }
            }
            FeatureMap::EfficientSu2 => {
                // Feature values are cycled across the rotation slots
                let mut slot = 0usize;
                for layer in 0..=self.plan.fm_reps {
                    for q in 0..n {
                        sv.ry(q, x[slot % x.len()]);
                        slot += 1;
                    }
                    for q in 0..n {
                        sv.rz(q, x[slot % x.len()]);
                        slot += 1;
                    }
                    if layer < self.plan.fm_reps {
                        for &(i, j) in &pairs {
                            sv.cx(i, j);
                        }
                    }
                }
            }
        }
    }

    fn apply_ansatz(&self, sv: &mut Statevector, params: &[f64]) {
        let n = self.plan.num_qubits();
        let pairs = self.plan.entangler_pairs();
        let mut p = params.iter().copied();
        // Parameter counts are checked by the caller; the iterator cannot
        // run dry inside the layer walk below.
        let mut next = move || p.next().unwrap_or(0.0);

        match self.plan.ansatz {
            Ansatz::RealAmplitudes => {
                for layer in 0..=self.plan.ansatz_reps {
                    for q in 0..n {
                        sv.ry(q, next());
                    }
                    if layer < self.plan.ansatz_reps {
                        for &(i, j) in &pairs {
                            sv.cx(i, j);
                        }
                    }
                }
            }
            Ansatz::EfficientSu2 => {
                for layer in 0..=self.plan.ansatz_reps {
                    for q in 0..n {
                        sv.ry(q, next());
                    }
                    for q in 0..n {
                        sv.rz(q, next());
                    }
                    if layer < self.plan.ansatz_reps {
                        for &(i, j) in &pairs {
                            sv.cx(i, j);
                        }
                    }
                }
            }
        }
    }
}
