//! Comparison report rendering
//!
//! One fixed-width line per recorded outcome in insertion order, then the
//! best entry. The best line recomputes the maximum from the stored mapping
//! instead of trusting the running pointer; the two must agree, and the
//! consistency is covered by tests.

use super::{ExperimentState, TrainOutcome};

const RULE_WIDTH: usize = 80;

/// The best outcome recomputed independently of the running pointer:
/// maximum roc_auc, earliest on ties.
fn recomputed_best(state: &ExperimentState) -> Option<&TrainOutcome> {
    let mut best: Option<&TrainOutcome> = None;
    for run in state.runs() {
        match best {
            None => best = Some(run),
            Some(b) if run.roc_auc > b.roc_auc => best = Some(run),
            Some(_) => {}
        }
    }
    best
}

/// Render the model-comparison table
///
/// An empty state renders a "no results" notice rather than failing; the
/// caller decides whether that situation is worth an error.
pub fn render_report(state: &ExperimentState) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\nMODEL COMPARISON\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');

    if state.is_empty() {
        out.push_str("No results recorded.\n");
        return out;
    }

    out.push_str(&format!(
        "{:<50} {:<15} {:<15} {:<15}\n",
        "Model", "Accuracy", "ROC-AUC", "Backend"
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for run in state.runs() {
        out.push_str(&format!(
            "{:<50} {:<15.4} {:<15.4} {:<15}\n",
            run.config.name(),
            run.accuracy,
            run.roc_auc,
            run.backend
        ));
    }

    // recomputed_best is Some: the state is non-empty here
    if let Some(best) = recomputed_best(state) {
        out.push_str(&format!("\nBest model: {}\n", best.config.name()));
        out.push_str(&format!("Best ROC-AUC: {:.4}\n", best.roc_auc));
    }

    out
}
