use crate::models::{Effort, Task};

use super::PlannerConfig;

/// Keywords that place a task in an effort class
#[derive(Debug, Clone)]
pub struct EffortBucket {
    pub effort: Effort,
    pub keywords: Vec<String>,
}

impl EffortBucket {
    pub fn new(effort: Effort, keywords: &[&str]) -> Self {
        Self {
            effort,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Estimate effort from keywords in the title and description
///
/// Keywords match as substrings of the lowercased text, so "checklist" hits
/// "check". Buckets are tried in configuration order.
pub fn estimate_effort(task: &Task, config: &PlannerConfig) -> Effort {
    let full_text = format!("{} {}", task.title, task.description).to_lowercase();

    config
        .effort_buckets
        .iter()
        .find(|bucket| bucket.keywords.iter().any(|k| full_text.contains(k.as_str())))
        .map(|bucket| bucket.effort)
        .unwrap_or(config.fallback_effort)
}
