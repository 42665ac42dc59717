//! # detectar
//!
//! Experiment runner for binary fraud classification with variational
//! circuit classifiers. The pipeline loads two tabular inputs, joins and
//! encodes them, reduces dimensionality, balances the classes, then sweeps a
//! fixed catalog of circuit configurations — training each one on a
//! least-busy simulated backend and ranking the results by ROC-AUC.
//!
//! The interesting part is deliberately small: a sequential sweep with a
//! running best that only a strictly greater ranking metric may replace, so
//! the first configuration to reach the maximum wins ties.
//!
//! ```no_run
//! use detectar::backend::BackendRegistry;
//! use detectar::cli::LogLevel;
//! use detectar::experiment::{catalog, render_report, run_experiment, VqcTrainer};
//! use ndarray::Array2;
//!
//! # fn main() -> detectar::Result<()> {
//! let x: Array2<f64> = Array2::zeros((20, 10));
//! let y = vec![0u8; 20];
//!
//! let registry = BackendRegistry::with_default_simulators();
//! let trainer = VqcTrainer::new(&registry, 40, 42, LogLevel::Quiet);
//! let state = run_experiment(&trainer, x.view(), &y, &catalog(10))?;
//! println!("{}", render_report(&state));
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod circuit;
pub mod cli;
pub mod data;
mod error;
pub mod eval;
pub mod experiment;
pub mod io;
pub mod optim;
pub mod sim;
pub mod vqc;

pub use error::{Error, Result};
