use crate::models::Task;

use super::PlannerConfig;

/// A category of work and the steps used to execute it
#[derive(Debug, Clone)]
pub struct StepTemplate {
    pub name: String,
    /// Title keywords selecting this template
    pub keywords: Vec<String>,
    pub steps: Vec<String>,
}

impl StepTemplate {
    pub fn new(name: &str, keywords: &[&str], steps: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn matches(&self, title: &str) -> bool {
        self.keywords.iter().any(|k| title.contains(k.as_str()))
    }
}

/// Pick the first template whose keyword occurs in the lowercased title
pub fn select_template<'a>(task: &Task, config: &'a PlannerConfig) -> Option<&'a StepTemplate> {
    let title = task.title.to_lowercase();
    config.step_templates.iter().find(|t| t.matches(&title))
}

/// Execution steps for a task; the description is not consulted
pub fn generate_execution_steps(task: &Task, config: &PlannerConfig) -> Vec<String> {
    select_template(task, config)
        .map(|t| t.steps.clone())
        .unwrap_or_else(|| config.default_steps.clone())
}
