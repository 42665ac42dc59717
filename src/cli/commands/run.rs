//! Run command: the full experiment pipeline
//!
//! Load and preprocess → scale and reduce → balance → split → sweep the
//! catalog → report → save the best model.

use crate::backend::BackendRegistry;
use crate::cli::logging::{log, LogLevel};
use crate::cli::RunArgs;
use crate::data::{load_dataset, oversample, prepare_features, stratified_split};
use crate::error::Result;
use crate::experiment::{catalog, render_report, run_experiment, VqcTrainer};
use crate::io::save_best_model;

pub fn run_experiment_command(args: RunArgs, level: LogLevel) -> Result<()> {
    log(level, LogLevel::Normal, "Loading and preprocessing data...");
    let (x, y) = load_dataset(&args.transactions, &args.identity, args.sample_size, args.seed)?;
    log(
        level,
        LogLevel::Verbose,
        &format!("  Loaded {} rows, {} raw features", x.nrows(), x.ncols()),
    );

    let x = prepare_features(&x, args.components)?;
    let (x, y) = oversample(&x, &y, args.seed);
    let split = stratified_split(&x, &y, args.test_size, args.seed)?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "\nTraining data shape: ({}, {})",
            split.x_train.nrows(),
            split.x_train.ncols()
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Test data shape: ({}, {})",
            split.x_test.nrows(),
            split.x_test.ncols()
        ),
    );

    let registry = BackendRegistry::with_default_simulators();
    let trainer = VqcTrainer::new(&registry, args.max_iter, args.seed, level);
    let configs = catalog(args.components);

    let state = run_experiment(&trainer, split.x_train.view(), &split.y_train, &configs)?;

    log(level, LogLevel::Normal, &render_report(&state));

    if save_best_model(&state, &args.output)? {
        log(
            level,
            LogLevel::Normal,
            &format!("\nBest model saved to {}", args.output.display()),
        );
    } else {
        log(
            level,
            LogLevel::Normal,
            "No model to save. Please run the experiment first.",
        );
    }

    Ok(())
}
