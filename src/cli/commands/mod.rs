//! Command dispatch

mod catalog;
mod run;

use super::{Cli, Command};
use crate::error::Result;

/// Execute the parsed command
pub fn run_command(cli: Cli) -> Result<()> {
    let level = cli.log_level();
    match cli.command {
        Command::Run(args) => run::run_experiment_command(args, level),
        Command::Catalog(args) => catalog::run_catalog(args, level),
    }
}
