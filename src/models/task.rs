use std::fmt;

use serde::{Deserialize, Serialize};

use super::lenient;

/// Placeholder used for an owner or deadline the extraction could not determine
pub const TBD: &str = "TBD";

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Parse case-insensitively; unknown labels fall back to `Medium`
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse effort estimate assigned by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    Small,
    Medium,
    Large,
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Effort::Small => "Small",
            Effort::Medium => "Medium",
            Effort::Large => "Large",
        };
        f.write_str(label)
    }
}

/// A task record exactly as the extraction step produced it
///
/// Every field is optional and wrongly typed values are read as absent.
/// Pipeline-derived fields (validation flags, effort, steps) are not part of
/// this shape, so anything the extractor put there is discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTask {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub evidence: Option<String>,
}

impl RawTask {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }
}

/// A task flowing through the post-processing pipeline
///
/// Fields missing from serialized input take the same defaults as
/// [`Task::from`] applies to a sparse [`RawTask`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub title: String,
    pub description: String,
    /// Responsible participant, `TBD` when unknown
    pub owner: String,
    /// Free-form deadline text, `TBD` when unknown
    pub deadline: String,
    pub priority: Priority,
    /// Extraction confidence in [0, 1]; only ever attenuated by validation
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    /// Set by validation: owner found in the participant roster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_valid: Option<bool>,
    /// Set by validation: a deadline was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_valid: Option<bool>,
    /// Set by planning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_effort: Option<Effort>,
    /// Set by planning
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub execution_steps: Vec<String>,
}

impl Task {
    pub fn new(title: &str) -> Self {
        Self::from(RawTask::titled(title))
    }

    /// Title for display; empty titles render as "No title"
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "No title"
        } else {
            &self.title
        }
    }

    pub fn has_owner(&self) -> bool {
        self.owner != TBD
    }

    pub fn has_deadline(&self) -> bool {
        self.deadline != TBD
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::from(RawTask::default())
    }
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Self {
        let or_tbd = |value: Option<String>| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| TBD.to_string())
        };

        let confidence = raw
            .confidence
            .filter(|c| c.is_finite())
            .map(|c| c.clamp(0.0, 1.0))
            .unwrap_or(1.0);

        Self {
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            owner: or_tbd(raw.owner),
            deadline: or_tbd(raw.deadline),
            priority: raw.priority.as_deref().map(Priority::parse).unwrap_or_default(),
            confidence,
            evidence: raw.evidence,
            owner_valid: None,
            deadline_valid: None,
            estimated_effort: None,
            execution_steps: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_record_gets_defaults() {
        let raw: RawTask = serde_json::from_str(r#"{"title": "Fix bug"}"#).unwrap();
        let task = Task::from(raw);

        assert_eq!(task.title, "Fix bug");
        assert_eq!(task.description, "");
        assert_eq!(task.owner, TBD);
        assert_eq!(task.deadline, TBD);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.confidence, 1.0);
        assert!(task.owner_valid.is_none());
        assert!(task.execution_steps.is_empty());
    }

    #[test]
    fn test_wrongly_typed_fields_are_ignored() {
        let json = r#"{
            "title": null,
            "owner": 42,
            "deadline": "   ",
            "priority": "HIGH",
            "confidence": "0.85",
            "execution_steps": ["do it"],
            "owner_valid": true
        }"#;
        let task = Task::from(serde_json::from_str::<RawTask>(json).unwrap());

        assert_eq!(task.title, "");
        assert_eq!(task.display_title(), "No title");
        assert_eq!(task.owner, TBD);
        assert_eq!(task.deadline, TBD);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.confidence, 0.85);
        assert!(task.owner_valid.is_none());
        assert!(task.execution_steps.is_empty());
    }

    #[test]
    fn test_confidence_is_clamped() {
        let high = RawTask {
            confidence: Some(3.0),
            ..RawTask::default()
        };
        let low = RawTask {
            confidence: Some(-1.0),
            ..RawTask::default()
        };
        assert_eq!(Task::from(high).confidence, 1.0);
        assert_eq!(Task::from(low).confidence, 0.0);
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("low"), Priority::Low);
        assert_eq!(Priority::parse(" High "), Priority::High);
        assert_eq!(Priority::parse("urgent"), Priority::Medium);
        assert_eq!(Priority::High.to_string(), "High");
    }

    #[test]
    fn test_unplanned_fields_are_not_serialized() {
        let value = serde_json::to_value(Task::new("Send notes")).unwrap();
        assert!(value.get("owner_valid").is_none());
        assert!(value.get("execution_steps").is_none());
        assert_eq!(value["priority"], "Medium");
    }

    #[test]
    fn test_serialized_task_missing_fields_read_as_defaults() {
        let task: Task = serde_json::from_str(r#"{"title": "Fix bug", "priority": "Low"}"#).unwrap();

        assert_eq!(task.title, "Fix bug");
        assert_eq!(task.owner, TBD);
        assert_eq!(task.deadline, TBD);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.confidence, 1.0);
        assert!(task.estimated_effort.is_none());
        assert_eq!(task, Task { priority: Priority::Low, ..Task::new("Fix bug") });
    }
}
