use tracing::{debug, info};

use crate::models::Task;
use crate::text::TextNormalization;

/// Configuration for owner/deadline validation
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Confidence multiplier applied when a named owner is not on the roster
    pub owner_penalty: f64,
    /// Canonicalization applied to owner and participant names before matching
    pub owner_normalization: TextNormalization,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            owner_penalty: 0.7,
            owner_normalization: TextNormalization::Loose,
        }
    }
}

/// Stage 1: annotate tasks with owner and deadline validity
///
/// A named owner is valid when it and some participant contain one another
/// after normalization. Invalid owners attenuate confidence by the penalty;
/// `TBD` owners are marked invalid without a penalty. No task is dropped.
pub fn validate_tasks(tasks: &[Task], participants: &[String], config: &ValidationConfig) -> Vec<Task> {
    let roster: Vec<String> = participants
        .iter()
        .map(|p| config.owner_normalization.apply(p))
        .filter(|p| !p.is_empty())
        .collect();

    let validated: Vec<Task> = tasks
        .iter()
        .map(|task| {
            let mut validated = task.clone();

            if task.has_owner() {
                let owner_valid = owner_on_roster(&task.owner, &roster, config.owner_normalization);
                if !owner_valid {
                    debug!(
                        "Owner {:?} of {:?} not among participants, confidence {:.2} -> {:.2}",
                        task.owner,
                        task.title,
                        task.confidence,
                        task.confidence * config.owner_penalty
                    );
                    validated.confidence = task.confidence * config.owner_penalty;
                }
                validated.owner_valid = Some(owner_valid);
            } else {
                validated.owner_valid = Some(false);
            }

            validated.deadline_valid = Some(task.has_deadline());
            validated
        })
        .collect();

    info!(
        "Stage 1: {} tasks validated, {} with a rostered owner, {} with a deadline",
        validated.len(),
        validated.iter().filter(|t| t.owner_valid == Some(true)).count(),
        validated.iter().filter(|t| t.deadline_valid == Some(true)).count()
    );

    validated
}

/// Whether an owner appears in an already-normalized roster
fn owner_on_roster(owner: &str, roster: &[String], normalization: TextNormalization) -> bool {
    let owner = normalization.apply(owner);
    if owner.is_empty() {
        return false;
    }
    roster
        .iter()
        .any(|p| p.contains(owner.as_str()) || owner.contains(p.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TBD;

    fn task(title: &str, owner: &str, confidence: f64) -> Task {
        Task {
            owner: owner.to_string(),
            confidence,
            ..Task::new(title)
        }
    }

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_tbd_owner_is_invalid_without_penalty() {
        let tasks = vec![task("Book venue", TBD, 0.9)];
        let validated = validate_tasks(&tasks, &roster(&["Alice"]), &ValidationConfig::default());

        assert_eq!(validated[0].owner_valid, Some(false));
        assert_eq!(validated[0].confidence, 0.9);
    }

    #[test]
    fn test_owner_matching_is_containment_both_ways() {
        let tasks = vec![
            task("a", "alice", 0.8),
            task("b", "Bob Jones (PM)", 0.8),
            task("c", "Carol", 0.8),
        ];
        let validated = validate_tasks(
            &tasks,
            &roster(&["Alice Smith", "Bob Jones"]),
            &ValidationConfig::default(),
        );

        assert_eq!(validated[0].owner_valid, Some(true));
        assert_eq!(validated[0].confidence, 0.8);
        assert_eq!(validated[1].owner_valid, Some(true));
        assert_eq!(validated[2].owner_valid, Some(false));
        assert_eq!(validated[2].confidence, 0.8 * 0.7);
    }

    #[test]
    fn test_empty_roster_invalidates_named_owners() {
        let tasks = vec![task("a", "Alice", 1.0)];
        let validated = validate_tasks(&tasks, &[], &ValidationConfig::default());

        assert_eq!(validated[0].owner_valid, Some(false));
        assert_eq!(validated[0].confidence, 0.7);
    }

    #[test]
    fn test_blank_participants_do_not_match_everyone() {
        let tasks = vec![task("a", "Zed", 1.0)];
        let validated = validate_tasks(&tasks, &roster(&["", "   "]), &ValidationConfig::default());

        assert_eq!(validated[0].owner_valid, Some(false));
    }

    #[test]
    fn test_deadline_flag_and_no_drops() {
        let mut with_deadline = Task::new("Send notes");
        with_deadline.deadline = "Friday".to_string();
        let tasks = vec![with_deadline, Task::new("Call vendor")];

        let validated = validate_tasks(&tasks, &[], &ValidationConfig::default());

        assert_eq!(validated.len(), 2);
        assert_eq!(validated[0].deadline_valid, Some(true));
        assert_eq!(validated[1].deadline_valid, Some(false));
    }

    #[test]
    fn test_confidence_never_increases_and_input_untouched() {
        let tasks = vec![task("a", "Alice", 0.5), task("b", "Mallory", 0.5), task("c", TBD, 0.5)];
        let validated = validate_tasks(&tasks, &roster(&["Alice"]), &ValidationConfig::default());

        for (before, after) in tasks.iter().zip(&validated) {
            assert!(after.confidence <= before.confidence);
        }
        assert!(tasks.iter().all(|t| t.owner_valid.is_none()));
    }

    #[test]
    fn test_strict_normalization_ignores_punctuation() {
        let config = ValidationConfig {
            owner_normalization: TextNormalization::Strict,
            ..ValidationConfig::default()
        };
        let tasks = vec![task("a", "O'Brien", 1.0)];
        let validated = validate_tasks(&tasks, &roster(&["Sean OBrien"]), &config);

        assert_eq!(validated[0].owner_valid, Some(true));
    }
}
