//! Evaluation metrics for the binary classifier
//!
//! Two scalars drive the experiment: accuracy on the predicted labels and
//! ROC-AUC on the predicted positive-class probabilities. ROC-AUC is the
//! ranking metric the runner selects the best configuration by.

/// Fraction of predictions equal to the true labels, in [0, 1]
///
/// Empty input is defined as 0.0.
pub fn accuracy_score(y_true: &[u8], y_pred: &[u8]) -> f64 {
    assert_eq!(
        y_true.len(),
        y_pred.len(),
        "predictions and targets must have same length"
    );
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / y_true.len() as f64
}

/// Area under the ROC curve from true labels and positive-class scores
///
/// Computed with the Mann-Whitney formulation using midranks, so tied scores
/// contribute half a concordance. Degenerate input with only one class
/// present has no defined ranking and returns 0.5.
pub fn roc_auc_score(y_true: &[u8], y_score: &[f64]) -> f64 {
    assert_eq!(
        y_true.len(),
        y_score.len(),
        "scores and targets must have same length"
    );

    let n_pos = y_true.iter().filter(|&&y| y == 1).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return 0.5;
    }

    // Midranks over the scores (1-based)
    let mut order: Vec<usize> = (0..y_score.len()).collect();
    order.sort_by(|&a, &b| {
        y_score[a]
            .partial_cmp(&y_score[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; y_score.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && y_score[order[j + 1]] == y_score[order[i]] {
            j += 1;
        }
        let midrank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = midrank;
        }
        i = j + 1;
    }

    let rank_sum_pos: f64 = y_true
        .iter()
        .zip(ranks.iter())
        .filter(|(&y, _)| y == 1)
        .map(|(_, &r)| r)
        .sum();

    let u = rank_sum_pos - (n_pos * (n_pos + 1)) as f64 / 2.0;
    u / (n_pos * n_neg) as f64
}
