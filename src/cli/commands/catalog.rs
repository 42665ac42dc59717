//! Catalog command: list the configurations a run would evaluate

use crate::cli::logging::LogLevel;
use crate::cli::CatalogArgs;
use crate::error::Result;
use crate::experiment::{catalog, CircuitConfig};

/// The listing itself is the command's output, so `--quiet` does not
/// suppress it; `--verbose` adds the parameter count per entry.
fn render_catalog(configs: &[CircuitConfig], num_qubits: usize, verbose: bool) -> String {
    let mut out = format!("{} configurations ({} qubits):\n", configs.len(), num_qubits);
    for (i, config) in configs.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, config.name()));
        if verbose {
            out.push_str(&format!(
                "     parameters: {}\n",
                config.plan().num_parameters()
            ));
        }
    }
    out
}

pub fn run_catalog(args: CatalogArgs, level: LogLevel) -> Result<()> {
    let configs = catalog(args.components);
    print!(
        "{}",
        render_catalog(&configs, args.components, level == LogLevel::Verbose)
    );
    Ok(())
}
