//! detectar CLI
//!
//! # Usage
//!
//! ```bash
//! # Full experiment sweep (paths can also come from the environment:
//! # TRAIN_TRANSACTION_PATH, TRAIN_IDENTITY_PATH)
//! detectar run --transactions data/train_transaction.csv \
//!              --identity data/train_identity.csv
//!
//! # Smaller, reproducible run
//! detectar run --sample-size 200 --components 4 --seed 7
//!
//! # Show what would be evaluated
//! detectar catalog
//! ```

use clap::Parser;
use detectar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
