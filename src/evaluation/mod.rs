pub mod accuracy;
pub mod matching;

pub use accuracy::*;
pub use matching::*;

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::EvaluationError;
use crate::models::{
    AggregateMetrics, EvaluationDetails, EvaluationReport, EvaluationResult, GroundTruthRecord,
    GroundTruthSet, PredictedTask,
};

/// Configuration for the evaluation engine
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    /// Jaccard similarity a predicted title must exceed to match a reference title
    pub match_threshold: f64,
    /// Mean F1 considered acceptable
    pub target_f1: f64,
    /// Mean owner accuracy considered acceptable
    pub target_owner_accuracy: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.3,
            target_f1: 0.75,
            target_owner_accuracy: 0.8,
        }
    }
}

/// Supplies predicted tasks per meeting
pub trait PredictionSource {
    /// Predictions for a meeting, or `None` when none could be located
    fn predictions_for(&self, meeting_id: &str) -> Option<Vec<PredictedTask>>;
}

impl PredictionSource for HashMap<String, Vec<PredictedTask>> {
    fn predictions_for(&self, meeting_id: &str) -> Option<Vec<PredictedTask>> {
        self.get(meeting_id).cloned()
    }
}

/// Evaluate one meeting's predictions against its reference tasks
///
/// Title metrics come from greedy one-to-one Jaccard matching. The headline
/// owner and priority accuracies compare the two lists by position, which
/// can pair unrelated tasks when the lists are ordered differently; the
/// `matched_*` accuracies compare only title-matched pairs instead.
pub fn evaluate_meeting(
    transcript_id: &str,
    ground_truth: &[GroundTruthRecord],
    predicted: &[PredictedTask],
    config: &EvaluationConfig,
) -> Result<EvaluationResult, EvaluationError> {
    if ground_truth.is_empty() {
        return Err(EvaluationError::NoGroundTruth(transcript_id.to_string()));
    }

    let gt_titles: Vec<&str> = ground_truth.iter().map(|r| r.task_title.as_str()).collect();
    let gt_owners: Vec<&str> = ground_truth.iter().map(|r| r.owner.as_str()).collect();
    let gt_priorities: Vec<&str> = ground_truth.iter().map(|r| r.priority.as_str()).collect();

    let pred_titles: Vec<&str> = predicted.iter().map(|t| t.title.as_str()).collect();
    let pred_owners: Vec<&str> = predicted.iter().map(|t| t.owner.as_str()).collect();
    let pred_priorities: Vec<&str> = predicted.iter().map(|t| t.priority.as_str()).collect();

    let matching = match_tasks(&gt_titles, &pred_titles, config.match_threshold);
    debug!(
        "{}: {} of {} predicted titles matched",
        transcript_id,
        matching.true_positives,
        predicted.len()
    );

    Ok(EvaluationResult {
        transcript_id: transcript_id.to_string(),
        ground_truth_tasks: ground_truth.len(),
        predicted_tasks: predicted.len(),
        task_precision: matching.precision,
        task_recall: matching.recall,
        task_f1: matching.f1,
        owner_accuracy: owner_accuracy(&gt_owners, &pred_owners),
        priority_accuracy: priority_accuracy(&gt_priorities, &pred_priorities),
        matched_owner_accuracy: pair_accuracy(&gt_owners, &pred_owners, &matching.pairs, owners_agree),
        matched_priority_accuracy: pair_accuracy(
            &gt_priorities,
            &pred_priorities,
            &matching.pairs,
            priorities_agree,
        ),
        details: EvaluationDetails {
            ground_truth_titles: owned(&gt_titles),
            predicted_titles: owned(&pred_titles),
            ground_truth_owners: owned(&gt_owners),
            predicted_owners: owned(&pred_owners),
        },
    })
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Evaluate every meeting in the reference set
///
/// Meetings are visited in reference order. A meeting whose predictions
/// cannot be located is logged and listed in `skipped`; it does not count
/// toward the averages.
pub fn run_evaluation(
    ground_truth: &GroundTruthSet,
    predictions: &impl PredictionSource,
    config: &EvaluationConfig,
) -> EvaluationReport {
    info!(
        "Evaluating {} meetings ({} reference tasks)",
        ground_truth.meeting_count(),
        ground_truth.record_count()
    );

    let mut meetings = Vec::new();
    let mut skipped = Vec::new();

    for meeting_id in ground_truth.meeting_ids() {
        let Some(predicted) = predictions.predictions_for(meeting_id) else {
            warn!("{}: no predictions found, skipping", meeting_id);
            skipped.push(meeting_id.to_string());
            continue;
        };

        match evaluate_meeting(meeting_id, ground_truth.meeting(meeting_id), &predicted, config) {
            Ok(result) => {
                info!(
                    "{}: GT={} predicted={} F1={:.3} P={:.3} R={:.3} owner={:.3} priority={:.3}",
                    meeting_id,
                    result.ground_truth_tasks,
                    result.predicted_tasks,
                    result.task_f1,
                    result.task_precision,
                    result.task_recall,
                    result.owner_accuracy,
                    result.priority_accuracy
                );
                meetings.push(result);
            }
            Err(e) => warn!("{}: {}", meeting_id, e),
        }
    }

    let overall = aggregate(&meetings);
    if overall.is_none() {
        warn!("No meetings were evaluated");
    }

    EvaluationReport {
        meetings,
        overall,
        skipped,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Arithmetic mean of each metric; `None` for an empty slice
pub fn aggregate(results: &[EvaluationResult]) -> Option<AggregateMetrics> {
    if results.is_empty() {
        return None;
    }

    let n = results.len() as f64;
    let mean = |metric: fn(&EvaluationResult) -> f64| results.iter().map(metric).sum::<f64>() / n;

    Some(AggregateMetrics {
        avg_task_f1: mean(|r| r.task_f1),
        avg_task_precision: mean(|r| r.task_precision),
        avg_task_recall: mean(|r| r.task_recall),
        avg_owner_accuracy: mean(|r| r.owner_accuracy),
        avg_priority_accuracy: mean(|r| r.priority_accuracy),
        avg_matched_owner_accuracy: mean(|r| r.matched_owner_accuracy),
        avg_matched_priority_accuracy: mean(|r| r.matched_priority_accuracy),
        total_meetings_evaluated: results.len(),
    })
}
