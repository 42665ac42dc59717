//! Data preparation: CSV ingestion, imputation and encoding, scaling and
//! PCA, class balancing, and the stratified split.
//!
//! Every randomized step takes an explicit seed; nothing reads process-wide
//! random state.

mod balance;
mod loader;
mod prepare;
mod split;

pub use balance::oversample;
pub use loader::load_dataset;
pub use prepare::{prepare_features, standard_scale};
pub use split::{stratified_split, TrainTestSplit};
