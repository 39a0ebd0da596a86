use serde::{Deserialize, Serialize};

use super::lenient;
use super::task::{RawTask, Task};

/// Structured result of the extraction step for one meeting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetingAnalysis {
    #[serde(default, deserialize_with = "tasks_or_empty")]
    pub tasks: Vec<RawTask>,
    /// Display names of attendees, used as the owner roster
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub participants: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub meeting_summary: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub decisions: Vec<String>,
}

/// Final pipeline output for one meeting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessedMeeting {
    pub tasks: Vec<Task>,
    pub participants: Vec<String>,
    pub meeting_summary: String,
    pub decisions: Vec<String>,
    pub total_tasks: usize,
}

impl ProcessedMeeting {
    pub fn new(analysis: &MeetingAnalysis, tasks: Vec<Task>) -> Self {
        Self {
            total_tasks: tasks.len(),
            tasks,
            participants: analysis.participants.clone(),
            meeting_summary: analysis.meeting_summary.clone(),
            decisions: analysis.decisions.clone(),
        }
    }
}

/// Decode the task list, skipping entries that are not JSON objects
fn tasks_or_empty<'de, D>(deserializer: D) -> Result<Vec<RawTask>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let items = match value {
        Some(serde_json::Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter(|v| v.is_object())
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meeting_analysis() {
        let json = r#"{
            "tasks": [
                {"title": "Draft project proposal", "owner": "Alice", "priority": "High"},
                "not a task",
                {"title": "Book venue"}
            ],
            "meeting_summary": "Kickoff for the Q3 launch.",
            "decisions": ["Launch in September", 7],
            "participants": ["Alice Smith", "Bob Jones"]
        }"#;

        let analysis: MeetingAnalysis = serde_json::from_str(json).unwrap();

        assert_eq!(analysis.tasks.len(), 2);
        assert_eq!(analysis.tasks[0].owner.as_deref(), Some("Alice"));
        assert_eq!(analysis.decisions, vec!["Launch in September"]);
        assert_eq!(analysis.participants.len(), 2);
    }

    #[test]
    fn test_empty_object_is_valid_analysis() {
        let analysis: MeetingAnalysis = serde_json::from_str("{}").unwrap();
        assert!(analysis.tasks.is_empty());
        assert!(analysis.participants.is_empty());
        assert_eq!(analysis.meeting_summary, "");
    }

    #[test]
    fn test_processed_meeting_reads_back() {
        let analysis = MeetingAnalysis {
            participants: vec!["Ann".to_string()],
            decisions: vec!["Ship Friday".to_string()],
            ..MeetingAnalysis::default()
        };
        let meeting = ProcessedMeeting::new(&analysis, vec![Task::new("Ship it")]);

        let json = serde_json::to_string(&meeting).unwrap();
        let back: ProcessedMeeting = serde_json::from_str(&json).unwrap();

        assert_eq!(back.tasks, meeting.tasks);
        assert_eq!(back.participants, vec!["Ann"]);
        assert_eq!(back.total_tasks, 1);
    }

    #[test]
    fn test_partial_processed_meeting_uses_defaults() {
        let back: ProcessedMeeting = serde_json::from_str(r#"{"tasks": [{"title": "a"}]}"#).unwrap();

        assert_eq!(back.tasks[0].owner, crate::models::TBD);
        assert!(back.participants.is_empty());
        assert_eq!(back.meeting_summary, "");
        assert_eq!(back.total_tasks, 0);
    }
}
