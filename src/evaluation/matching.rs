use std::collections::HashSet;

use crate::text::{set_similarity, word_set};

/// Outcome of greedy title matching between ground truth and predictions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskMatching {
    pub true_positives: usize,
    /// `(predicted_index, ground_truth_index)` for every match, in predicted order
    pub pairs: Vec<(usize, usize)>,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Match predicted titles to ground-truth titles by word-set overlap
///
/// Each predicted title, in order, claims the first still-unmatched
/// ground-truth title whose Jaccard similarity strictly exceeds
/// `threshold`. Matching is one-to-one and never revisited. An empty list
/// on either side yields all-zero metrics.
pub fn match_tasks<G, P>(ground_truth: &[G], predicted: &[P], threshold: f64) -> TaskMatching
where
    G: AsRef<str>,
    P: AsRef<str>,
{
    if ground_truth.is_empty() || predicted.is_empty() {
        return TaskMatching::default();
    }

    let gt_words: Vec<HashSet<String>> = ground_truth
        .iter()
        .map(|t| word_set(t.as_ref()))
        .collect();
    let mut matched_gt = vec![false; ground_truth.len()];
    let mut pairs = Vec::new();

    for (i, title) in predicted.iter().enumerate() {
        let words = word_set(title.as_ref());

        let hit = gt_words
            .iter()
            .enumerate()
            .filter(|(j, _)| !matched_gt[*j])
            .find(|(_, gt)| set_similarity(&words, gt) > threshold)
            .map(|(j, _)| j);

        if let Some(j) = hit {
            matched_gt[j] = true;
            pairs.push((i, j));
        }
    }

    let true_positives = pairs.len();
    let precision = true_positives as f64 / predicted.len() as f64;
    let recall = true_positives as f64 / ground_truth.len() as f64;

    TaskMatching {
        true_positives,
        pairs,
        precision,
        recall,
        f1: f1_score(precision, recall),
    }
}

/// Harmonic mean of precision and recall, 0 when both are 0
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_partial_overlap_matches() {
        let m = match_tasks(&["draft the proposal document"], &["Draft project proposal"], 0.3);

        assert_eq!(m.true_positives, 1);
        assert_eq!(m.pairs, vec![(0, 0)]);
        assert_eq!(m.precision, 1.0);
        assert_eq!(m.recall, 1.0);
        assert_eq!(m.f1, 1.0);
    }

    #[test]
    fn test_empty_predictions_yield_zero() {
        let none: [&str; 0] = [];
        let m = match_tasks(&["send the budget"], &none, 0.3);

        assert_eq!((m.precision, m.recall, m.f1), (0.0, 0.0, 0.0));
        let m = match_tasks(&none, &["send the budget"], 0.3);
        assert_eq!((m.precision, m.recall, m.f1), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_matching_is_one_to_one_and_greedy() {
        // both predictions resemble the first ground-truth title
        let gt = ["send budget report", "book offsite venue"];
        let pred = ["send budget report", "send the budget report", "book venue"];
        let m = match_tasks(&gt, &pred, 0.3);

        assert_eq!(m.pairs, vec![(0, 0), (2, 1)]);
        assert!((m.precision - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.recall, 1.0);
        assert!((m.f1 - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_strict() {
        // {a, b} vs {a, c}: similarity 1/3
        let m = match_tasks(&["a b"], &["a c"], 1.0 / 3.0);
        assert_eq!(m.true_positives, 0);
        let m = match_tasks(&["a b"], &["a c"], 0.3);
        assert_eq!(m.true_positives, 1);
    }

    #[test]
    fn test_metrics_are_bounded() {
        let gt = ["alpha beta", "gamma", "delta epsilon zeta"];
        let pred = ["alpha", "beta gamma", "zeta", "omega", "alpha beta"];
        let m = match_tasks(&gt, &pred, 0.3);

        for value in [m.precision, m.recall, m.f1] {
            assert!((0.0..=1.0).contains(&value));
        }
        assert!(m.true_positives <= gt.len().min(pred.len()));
    }

    #[test]
    fn test_f1_score() {
        assert_eq!(f1_score(0.0, 0.0), 0.0);
        assert_eq!(f1_score(1.0, 0.0), 0.0);
        assert_eq!(f1_score(0.5, 0.5), 0.5);
    }
}
