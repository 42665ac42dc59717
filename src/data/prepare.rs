//! Feature scaling and dimensionality reduction
//!
//! Standard scaling (zero mean, unit variance per column) followed by PCA
//! onto the leading principal components. The eigendecomposition uses cyclic
//! Jacobi rotations on the covariance matrix, which is deterministic — no
//! randomized solver, so the reduction itself needs no seed.

use ndarray::{Array1, Array2};

use crate::error::{Error, Result};

/// Zero-mean, unit-variance scaling per column
///
/// Constant columns are centered and left at zero rather than divided by a
/// zero standard deviation.
pub fn standard_scale(x: &Array2<f64>) -> Array2<f64> {
    let mut out = x.clone();
    for mut col in out.columns_mut().into_iter() {
        let m = col.mean().unwrap_or(0.0);
        col.mapv_inplace(|v| v - m);
    }

    for mut col in out.columns_mut().into_iter() {
        let var = col.iter().map(|v| v * v).sum::<f64>() / col.len().max(1) as f64;
        let std = var.sqrt();
        if std > 1e-12 {
            col.mapv_inplace(|v| v / std);
        }
    }
    out
}

/// Symmetric eigendecomposition by cyclic Jacobi rotations
///
/// Returns (eigenvalues, eigenvectors-as-columns), unsorted.
fn jacobi_eigen(mut a: Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let d = a.nrows();
    let mut v = Array2::eye(d);
    let max_sweeps = 100;
    let tol = 1e-12;

    for _ in 0..max_sweeps {
        let off: f64 = (0..d)
            .flat_map(|p| (p + 1..d).map(move |q| (p, q)))
            .map(|(p, q)| a[[p, q]] * a[[p, q]])
            .sum();
        if off < tol {
            break;
        }

        for p in 0..d {
            for q in p + 1..d {
                if a[[p, q]].abs() < 1e-15 {
                    continue;
                }
                let tau = (a[[q, q]] - a[[p, p]]) / (2.0 * a[[p, q]]);
                let t = tau.signum() / (tau.abs() + (1.0 + tau * tau).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;

                for k in 0..d {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..d {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..d {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues = Array1::from_iter((0..d).map(|i| a[[i, i]]));
    (eigenvalues, v)
}

/// Scale then project onto the `n_components` leading principal components
///
/// Component signs are normalized so the largest-magnitude loading of each
/// component is positive, keeping the projection deterministic.
pub fn prepare_features(x: &Array2<f64>, n_components: usize) -> Result<Array2<f64>> {
    let d = x.ncols();
    if n_components == 0 || n_components > d {
        return Err(Error::DataLoad(format!(
            "cannot reduce {d} features to {n_components} components"
        )));
    }

    let scaled = standard_scale(x);
    let n = scaled.nrows().max(2) as f64;
    let cov = scaled.t().dot(&scaled) / (n - 1.0);

    let (eigenvalues, eigenvectors) = jacobi_eigen(cov);

    // Leading components by eigenvalue, descending; index breaks ties
    let mut order: Vec<usize> = (0..d).collect();
    order.sort_by(|&i, &j| {
        eigenvalues[j]
            .partial_cmp(&eigenvalues[i])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(i.cmp(&j))
    });

    let mut components = Array2::zeros((d, n_components));
    for (out_col, &eig_col) in order.iter().take(n_components).enumerate() {
        let mut col = eigenvectors.column(eig_col).to_owned();
        let max_idx = col
            .iter()
            .enumerate()
            .max_by(|a, b| {
                a.1.abs()
                    .partial_cmp(&b.1.abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
            .unwrap_or(0);
        if col[max_idx] < 0.0 {
            col.mapv_inplace(|v| -v);
        }
        components.column_mut(out_col).assign(&col);
    }

    Ok(scaled.dot(&components))
}
