use serde::{Deserialize, Serialize};

use super::lenient;
use super::task::Task;

/// The fields of a predicted task that evaluation compares
///
/// Missing fields read as empty strings, so a prediction without a priority
/// never counts as matching one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictedTask {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub owner: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub priority: String,
}

impl PredictedTask {
    pub fn new(title: &str, owner: &str, priority: &str) -> Self {
        Self {
            title: title.to_string(),
            owner: owner.to_string(),
            priority: priority.to_string(),
        }
    }
}

impl From<&Task> for PredictedTask {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            owner: task.owner.clone(),
            priority: task.priority.to_string(),
        }
    }
}

/// Raw lists kept alongside the metrics for auditing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDetails {
    pub ground_truth_titles: Vec<String>,
    pub predicted_titles: Vec<String>,
    pub ground_truth_owners: Vec<String>,
    pub predicted_owners: Vec<String>,
}

/// Metrics for one meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub transcript_id: String,
    pub ground_truth_tasks: usize,
    pub predicted_tasks: usize,
    pub task_precision: f64,
    pub task_recall: f64,
    pub task_f1: f64,
    /// Owner agreement by list position (index i against index i)
    pub owner_accuracy: f64,
    /// Priority agreement by list position (index i against index i)
    pub priority_accuracy: f64,
    /// Owner agreement over title-matched pairs only
    pub matched_owner_accuracy: f64,
    /// Priority agreement over title-matched pairs only
    pub matched_priority_accuracy: f64,
    pub details: EvaluationDetails,
}

/// Run-wide means over every successfully evaluated meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub avg_task_f1: f64,
    pub avg_task_precision: f64,
    pub avg_task_recall: f64,
    pub avg_owner_accuracy: f64,
    pub avg_priority_accuracy: f64,
    pub avg_matched_owner_accuracy: f64,
    pub avg_matched_priority_accuracy: f64,
    pub total_meetings_evaluated: usize,
}

impl AggregateMetrics {
    pub fn meets_f1_target(&self, target: f64) -> bool {
        self.avg_task_f1 >= target
    }

    pub fn meets_owner_target(&self, target: f64) -> bool {
        self.avg_owner_accuracy >= target
    }
}

/// Output of a full evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Evaluated meetings in reference order
    pub meetings: Vec<EvaluationResult>,
    /// `None` when no meeting could be evaluated
    pub overall: Option<AggregateMetrics>,
    /// Meetings with ground truth but no located predictions
    pub skipped: Vec<String>,
    pub generated_at: String,
}

impl EvaluationReport {
    /// Result for one meeting, if it was evaluated
    pub fn meeting(&self, transcript_id: &str) -> Option<&EvaluationResult> {
        self.meetings.iter().find(|r| r.transcript_id == transcript_id)
    }
}
