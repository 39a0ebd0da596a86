use crate::text::normalize;

/// Owner agreement: both normalized names non-empty and one contains the other
pub fn owners_agree(ground_truth: &str, predicted: &str) -> bool {
    let gt = normalize(ground_truth);
    let pred = normalize(predicted);
    !gt.is_empty() && !pred.is_empty() && (gt.contains(&pred) || pred.contains(&gt))
}

/// Priority agreement: both normalized labels non-empty and equal
pub fn priorities_agree(ground_truth: &str, predicted: &str) -> bool {
    let gt = normalize(ground_truth);
    !gt.is_empty() && gt == normalize(predicted)
}

/// Owner accuracy by list position
///
/// Index `i` of the ground truth is compared with index `i` of the
/// predictions over the shorter length, whether or not those entries were
/// matched as the same task. See `pair_accuracy` for the matched variant.
pub fn owner_accuracy<G: AsRef<str>, P: AsRef<str>>(ground_truth: &[G], predicted: &[P]) -> f64 {
    positional_accuracy(ground_truth, predicted, owners_agree)
}

/// Priority accuracy by list position, with the same caveat as `owner_accuracy`
pub fn priority_accuracy<G: AsRef<str>, P: AsRef<str>>(ground_truth: &[G], predicted: &[P]) -> f64 {
    positional_accuracy(ground_truth, predicted, priorities_agree)
}

fn positional_accuracy<G, P>(ground_truth: &[G], predicted: &[P], agree: fn(&str, &str) -> bool) -> f64
where
    G: AsRef<str>,
    P: AsRef<str>,
{
    let total = ground_truth.len().min(predicted.len());
    if total == 0 {
        return 0.0;
    }

    let correct = ground_truth
        .iter()
        .zip(predicted)
        .filter(|(gt, pred)| agree(gt.as_ref(), pred.as_ref()))
        .count();

    correct as f64 / total as f64
}

/// Accuracy over title-matched `(predicted_index, ground_truth_index)` pairs
///
/// Returns 0.0 when there are no pairs.
pub fn pair_accuracy<G, P>(
    ground_truth: &[G],
    predicted: &[P],
    pairs: &[(usize, usize)],
    agree: fn(&str, &str) -> bool,
) -> f64
where
    G: AsRef<str>,
    P: AsRef<str>,
{
    if pairs.is_empty() {
        return 0.0;
    }

    let correct = pairs
        .iter()
        .filter_map(|&(p, g)| Some((ground_truth.get(g)?, predicted.get(p)?)))
        .filter(|(gt, pred)| agree(gt.as_ref(), pred.as_ref()))
        .count();

    correct as f64 / pairs.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_containment() {
        assert!(owners_agree("Alice Smith", "alice"));
        assert!(owners_agree("Bob", "Bob Jones."));
        assert!(!owners_agree("Alice", "Bob"));
        assert!(!owners_agree("", "Bob"));
        assert!(!owners_agree("???", "Bob"));
    }

    #[test]
    fn test_priority_equality() {
        assert!(priorities_agree("High", "high"));
        assert!(!priorities_agree("High", "Highest"));
        assert!(!priorities_agree("", ""));
    }

    #[test]
    fn test_owner_accuracy_is_positional() {
        // same people, different order: positions disagree
        let gt = ["Alice", "Bob"];
        let pred = ["Bob", "Alice"];
        assert_eq!(owner_accuracy(&gt, &pred), 0.0);

        let pred = ["alice smith", "Carol", "Bob"];
        assert_eq!(owner_accuracy(&gt, &pred), 0.5);
    }

    #[test]
    fn test_accuracy_empty_lists() {
        let none: [&str; 0] = [];
        assert_eq!(owner_accuracy(&["Alice"], &none), 0.0);
        assert_eq!(priority_accuracy(&none, &["High"]), 0.0);
    }

    #[test]
    fn test_priority_accuracy_over_shorter_list() {
        let gt = ["High", "Low", "Medium"];
        let pred = ["high", "Medium"];
        assert_eq!(priority_accuracy(&gt, &pred), 0.5);
    }

    #[test]
    fn test_pair_accuracy_uses_matched_indices() {
        let gt = ["Alice", "Bob"];
        let pred = ["Bob", "Alice"];
        let pairs = [(0, 1), (1, 0)];

        assert_eq!(pair_accuracy(&gt, &pred, &pairs, owners_agree), 1.0);
        assert_eq!(pair_accuracy(&gt, &pred, &[], owners_agree), 0.0);
    }
}
