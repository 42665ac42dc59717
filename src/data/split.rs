//! Stratified train/test split with a seeded shuffle

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};

/// The four arrays produced by [`stratified_split`]
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Vec<u8>,
    pub y_test: Vec<u8>,
}

fn take_rows(x: &Array2<f64>, indices: &[usize]) -> Array2<f64> {
    let mut out = Array2::zeros((indices.len(), x.ncols()));
    for (row, &i) in indices.iter().enumerate() {
        out.row_mut(row).assign(&x.row(i));
    }
    out
}

/// Split rows into train/test keeping the class proportions of `y`
///
/// Per class, indices are shuffled with a class-offset seed and
/// `round(test_size * class_count)` of them go to the test side. Train
/// indices keep ascending order, so the split is fully reproducible.
pub fn stratified_split(
    x: &Array2<f64>,
    y: &[u8],
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    if !(0.0..1.0).contains(&test_size) || test_size <= 0.0 {
        return Err(Error::DataLoad(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }
    if x.nrows() != y.len() {
        return Err(Error::DataLoad(format!(
            "feature rows ({}) and labels ({}) disagree",
            x.nrows(),
            y.len()
        )));
    }

    let mut train_idx = Vec::new();
    let mut test_idx = Vec::new();

    for class in [0u8, 1u8] {
        let mut members: Vec<usize> = (0..y.len()).filter(|&i| y[i] == class).collect();
        if members.is_empty() {
            continue;
        }
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(class as u64));
        members.shuffle(&mut rng);

        let n_test = ((members.len() as f64) * test_size).round() as usize;
        let n_test = n_test.min(members.len());
        test_idx.extend_from_slice(&members[..n_test]);
        train_idx.extend_from_slice(&members[n_test..]);
    }

    train_idx.sort_unstable();
    test_idx.sort_unstable();

    Ok(TrainTestSplit {
        x_train: take_rows(x, &train_idx),
        x_test: take_rows(x, &test_idx),
        y_train: train_idx.iter().map(|&i| y[i]).collect(),
        y_test: test_idx.iter().map(|&i| y[i]).collect(),
    })
}
