//! Class balancing by random oversampling
//!
//! Duplicates minority-class rows, sampled with replacement from a seeded
//! RNG, until both classes have equal counts. Resampled rows are appended
//! after the originals, so the original row order is preserved.

use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Oversample the minority class until the classes are balanced
pub fn oversample(x: &Array2<f64>, y: &[u8], seed: u64) -> (Array2<f64>, Vec<u8>) {
    let positives: Vec<usize> = (0..y.len()).filter(|&i| y[i] == 1).collect();
    let negatives: Vec<usize> = (0..y.len()).filter(|&i| y[i] == 0).collect();

    // Already balanced, or degenerate single-class input: nothing to add
    if positives.is_empty() || negatives.is_empty() || positives.len() == negatives.len() {
        return (x.clone(), y.to_vec());
    }

    let (minority, deficit) = if positives.len() < negatives.len() {
        (&positives, negatives.len() - positives.len())
    } else {
        (&negatives, positives.len() - negatives.len())
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let mut out_x = x.clone();
    let mut out_y = y.to_vec();
    for _ in 0..deficit {
        let idx = minority[rng.random_range(0..minority.len())];
        out_x
            .push(Axis(0), x.row(idx))
            .expect("row width matches source matrix");
        out_y.push(y[idx]);
    }

    (out_x, out_y)
}
