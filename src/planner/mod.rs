pub mod effort;
pub mod steps;

pub use effort::*;
pub use steps::*;

use tracing::info;

use crate::models::{Effort, Task};

/// Configuration for the rule-based planner
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Effort buckets checked in order; the first bucket with a keyword hit wins
    pub effort_buckets: Vec<EffortBucket>,
    /// Effort assigned when no bucket matches
    pub fallback_effort: Effort,
    /// Step templates checked in order against the title
    pub step_templates: Vec<StepTemplate>,
    /// Steps used when no template matches
    pub default_steps: Vec<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            effort_buckets: vec![
                EffortBucket::new(Effort::Small, &["quick", "small", "minor", "update", "check"]),
                EffortBucket::new(Effort::Medium, &["research", "draft", "prepare", "coordinate"]),
            ],
            fallback_effort: Effort::Large,
            step_templates: vec![
                StepTemplate::new(
                    "document",
                    &["document", "draft"],
                    &[
                        "Outline the main sections",
                        "Draft initial content",
                        "Review and revise",
                        "Share for feedback",
                    ],
                ),
                StepTemplate::new(
                    "research",
                    &["research", "analyze"],
                    &[
                        "Gather relevant data/sources",
                        "Analyze patterns/trends",
                        "Summarize key findings",
                        "Prepare recommendations",
                    ],
                ),
                StepTemplate::new(
                    "session",
                    &["meeting", "demo"],
                    &[
                        "Prepare agenda/materials",
                        "Schedule with participants",
                        "Conduct the session",
                        "Document outcomes",
                    ],
                ),
                StepTemplate::new(
                    "change",
                    &["update", "implement"],
                    &[
                        "Assess current state",
                        "Plan changes",
                        "Implement updates",
                        "Test and verify",
                    ],
                ),
            ],
            default_steps: vec![
                "Define detailed requirements".to_string(),
                "Execute the core work".to_string(),
                "Review quality".to_string(),
                "Deliver outcomes".to_string(),
            ],
        }
    }
}

/// Stage 3: attach an effort estimate and execution steps to every task
///
/// Both are pure functions of the task text; validation fields and
/// confidence are not consulted. Steps supplied upstream are replaced.
pub fn plan_tasks(tasks: &[Task], config: &PlannerConfig) -> Vec<Task> {
    let planned: Vec<Task> = tasks
        .iter()
        .map(|task| {
            let mut planned = task.clone();
            planned.estimated_effort = Some(estimate_effort(task, config));
            planned.execution_steps = generate_execution_steps(task, config);
            planned
        })
        .collect();

    let count = |effort: Effort| {
        planned
            .iter()
            .filter(|t| t.estimated_effort == Some(effort))
            .count()
    };
    info!(
        "Stage 3: planned {} tasks (small {}, medium {}, large {})",
        planned.len(),
        count(Effort::Small),
        count(Effort::Medium),
        count(Effort::Large)
    );

    planned
}
