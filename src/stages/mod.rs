pub mod stage1_validate;
pub mod stage2_dedup;

pub use stage1_validate::*;
pub use stage2_dedup::*;

use tracing::info;

use crate::models::{MeetingAnalysis, ProcessedMeeting, Task};
use crate::planner::{plan_tasks, PlannerConfig};

/// Configuration for the full post-processing pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub validation: ValidationConfig,
    pub dedup: DedupConfig,
    pub planner: PlannerConfig,
}

/// Run validation, deduplication and planning over an extraction result
///
/// Stages run in that order and each works on a copy of the previous
/// stage's output. Deduplication sees tasks in extraction order, so the
/// first extracted variant of a title wins.
pub fn run_pipeline(analysis: &MeetingAnalysis, config: &PipelineConfig) -> ProcessedMeeting {
    let tasks: Vec<Task> = analysis.tasks.iter().cloned().map(Task::from).collect();

    info!(
        "Pipeline: {} extracted tasks, {} participants",
        tasks.len(),
        analysis.participants.len()
    );

    let validated = validate_tasks(&tasks, &analysis.participants, &config.validation);
    let unique = deduplicate_tasks(&validated, &config.dedup);
    let planned = plan_tasks(&unique, &config.planner);

    ProcessedMeeting::new(analysis, planned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Effort, RawTask};

    #[test]
    fn test_run_pipeline_end_to_end() {
        let analysis = MeetingAnalysis {
            tasks: vec![
                RawTask {
                    owner: Some("Alice".to_string()),
                    deadline: Some("Friday".to_string()),
                    confidence: Some(0.9),
                    ..RawTask::titled("Draft project proposal")
                },
                RawTask {
                    owner: Some("Mallory".to_string()),
                    confidence: Some(0.8),
                    ..RawTask::titled("draft project proposal ")
                },
                RawTask {
                    owner: Some("Zed".to_string()),
                    confidence: Some(1.0),
                    ..RawTask::titled("Quick check of the demo build")
                },
            ],
            participants: vec!["Alice Smith".to_string(), "Bob".to_string()],
            meeting_summary: "Proposal kickoff".to_string(),
            decisions: vec![],
        };

        let processed = run_pipeline(&analysis, &PipelineConfig::default());

        assert_eq!(processed.total_tasks, 2);
        let first = &processed.tasks[0];
        assert_eq!(first.owner, "Alice");
        assert_eq!(first.owner_valid, Some(true));
        assert_eq!(first.deadline_valid, Some(true));
        assert_eq!(first.confidence, 0.9);
        assert_eq!(first.estimated_effort, Some(Effort::Medium));
        assert_eq!(first.execution_steps[0], "Outline the main sections");

        let second = &processed.tasks[1];
        assert_eq!(second.owner_valid, Some(false));
        assert!((second.confidence - 0.7).abs() < 1e-12);
        assert_eq!(second.estimated_effort, Some(Effort::Small));
        assert_eq!(second.execution_steps[0], "Prepare agenda/materials");

        assert_eq!(processed.meeting_summary, "Proposal kickoff");
    }

    #[test]
    fn test_run_pipeline_empty_analysis() {
        let processed = run_pipeline(&MeetingAnalysis::default(), &PipelineConfig::default());
        assert!(processed.tasks.is_empty());
        assert_eq!(processed.total_tasks, 0);
    }
}
