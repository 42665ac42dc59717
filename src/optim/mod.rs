//! Gradient-free optimization for the variational fit
//!
//! The classifier's loss surface is only reachable through circuit
//! evaluation, so fitting uses SPSA (simultaneous perturbation stochastic
//! approximation): two loss evaluations per step regardless of dimension,
//! under a fixed maximum-iteration budget. Perturbation directions come from
//! a seeded `StdRng`, so a fixed seed reproduces the full parameter
//! trajectory.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// SPSA optimizer with standard decaying gain schedules
#[derive(Debug, Clone)]
pub struct Spsa {
    /// Maximum iteration budget (the only "timeout" in the pipeline)
    pub max_iter: usize,
    /// Initial step-size gain
    pub a: f64,
    /// Initial perturbation magnitude
    pub c: f64,
    /// Seed for the perturbation directions
    pub seed: u64,
}

impl Spsa {
    /// Standard gains with the given iteration budget and seed
    pub fn new(max_iter: usize, seed: u64) -> Self {
        Self {
            max_iter,
            a: 0.2,
            c: 0.1,
            seed,
        }
    }

    /// Minimize `loss` starting from `initial`, returning the best parameter
    /// vector seen and its loss value.
    pub fn minimize<F>(&self, initial: Array1<f64>, mut loss: F) -> (Array1<f64>, f64)
    where
        F: FnMut(&Array1<f64>) -> f64,
    {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut theta = initial;
        let mut best = theta.clone();
        let mut best_loss = loss(&theta);

        // Spall's recommended exponents
        let alpha = 0.602;
        let gamma = 0.101;
        let stability = 0.1 * self.max_iter as f64;

        for k in 0..self.max_iter {
            let ak = self.a / (k as f64 + 1.0 + stability).powf(alpha);
            let ck = self.c / (k as f64 + 1.0).powf(gamma);

            // Rademacher perturbation direction
            let delta: Array1<f64> = (0..theta.len())
                .map(|_| if rng.random::<bool>() { 1.0 } else { -1.0 })
                .collect();

            let plus = &theta + &(ck * &delta);
            let minus = &theta - &(ck * &delta);
            let diff = loss(&plus) - loss(&minus);

            let gradient = delta.mapv(|d| diff / (2.0 * ck * d));
            theta = &theta - &(ak * &gradient);

            let current = loss(&theta);
            if current < best_loss {
                best_loss = current;
                best.assign(&theta);
            }
        }

        (best, best_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_minimizes_quadratic_bowl() {
        let spsa = Spsa::new(200, 7);
        let (best, best_loss) = spsa.minimize(array![2.0, -3.0], |p| p.dot(p));
        assert!(best_loss < 1.0, "loss {best_loss} at {best:?}");
    }

    #[test]
    fn test_never_returns_worse_than_start() {
        let spsa = Spsa::new(10, 1);
        let start = array![1.0, 1.0];
        let start_loss = start.dot(&start);
        let (_, best_loss) = spsa.minimize(start, |p| p.dot(p));
        assert!(best_loss <= start_loss);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let run = || Spsa::new(50, 42).minimize(array![0.5, -0.5, 1.5], |p| p.dot(p));
        let (a, la) = run();
        let (b, lb) = run();
        assert_eq!(a, b);
        assert_eq!(la, lb);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let loss = |p: &Array1<f64>| p.dot(p);
        let (a, _) = Spsa::new(20, 1).minimize(array![1.0, 2.0], loss);
        let (b, _) = Spsa::new(20, 2).minimize(array![1.0, 2.0], loss);
        assert_ne!(a, b);
    }

    #[test]
    fn test_zero_budget_returns_start() {
        let spsa = Spsa::new(0, 3);
        let (best, best_loss) = spsa.minimize(array![4.0], |p| p.dot(p));
        assert_eq!(best, array![4.0]);
        assert_eq!(best_loss, 16.0);
    }
}
