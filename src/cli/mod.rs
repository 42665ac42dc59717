//! CLI module for detectar
//!
//! Command-line definition plus the command handlers.

mod commands;
pub mod logging;

pub use commands::run_command;
pub use logging::LogLevel;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Variational classifier experiment runner for tabular fraud detection
#[derive(Parser, Debug)]
#[command(name = "detectar", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose progress output
    #[arg(long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        if self.quiet {
            LogLevel::Quiet
        } else if self.verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full experiment sweep and save the best model
    Run(RunArgs),
    /// Print the configuration catalog and exit
    Catalog(CatalogArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Transaction table path
    #[arg(
        long,
        env = "TRAIN_TRANSACTION_PATH",
        default_value = "data/train_transaction.csv"
    )]
    pub transactions: PathBuf,

    /// Identity table path
    #[arg(
        long,
        env = "TRAIN_IDENTITY_PATH",
        default_value = "data/train_identity.csv"
    )]
    pub identity: PathBuf,

    /// Maximum number of rows to keep from the joined table
    #[arg(long, default_value = "1000")]
    pub sample_size: usize,

    /// Principal components to reduce to (also the circuit width)
    #[arg(long, default_value = "10")]
    pub components: usize,

    /// Held-out fraction for the train/test split
    #[arg(long, default_value = "0.2")]
    pub test_size: f64,

    /// Seed threaded through every randomized step
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Optimizer iteration budget per configuration
    #[arg(long, default_value = "40")]
    pub max_iter: usize,

    /// Output path for the best model artifact
    #[arg(short, long, default_value = "best_model.json")]
    pub output: PathBuf,
}

/// Arguments for the catalog command
#[derive(Parser, Debug, Clone)]
pub struct CatalogArgs {
    /// Circuit width the catalog entries are instantiated at
    #[arg(long, default_value = "10")]
    pub components: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["detectar", "run"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.sample_size, 1000);
        assert_eq!(args.components, 10);
        assert_eq!(args.seed, 42);
        assert_eq!(args.max_iter, 40);
        assert_eq!(args.output, PathBuf::from("best_model.json"));
        assert_eq!(args.test_size, 0.2);
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from([
            "detectar",
            "run",
            "--transactions",
            "tx.csv",
            "--identity",
            "id.csv",
            "--seed",
            "7",
            "--components",
            "4",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.transactions, PathBuf::from("tx.csv"));
        assert_eq!(args.seed, 7);
        assert_eq!(args.components, 4);
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["detectar", "run", "--quiet", "--verbose"]).is_err());
    }

    #[test]
    fn test_log_level_mapping() {
        let quiet = Cli::try_parse_from(["detectar", "--quiet", "catalog"]).unwrap();
        assert_eq!(quiet.log_level(), LogLevel::Quiet);
        let normal = Cli::try_parse_from(["detectar", "catalog"]).unwrap();
        assert_eq!(normal.log_level(), LogLevel::Normal);
    }
}
