use serde::{Deserialize, Serialize};

use super::lenient;

/// One annotated task row of the reference dataset
///
/// Columns other than these four are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthRecord {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub transcript_id: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub task_title: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub owner: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub priority: String,
}

impl GroundTruthRecord {
    pub fn new(transcript_id: &str, task_title: &str, owner: &str, priority: &str) -> Self {
        Self {
            transcript_id: transcript_id.to_string(),
            task_title: task_title.to_string(),
            owner: owner.to_string(),
            priority: priority.to_string(),
        }
    }
}

/// Reference records grouped by meeting
///
/// Meetings keep the order in which their first row appears, and rows keep
/// their order within a meeting.
#[derive(Debug, Clone, Default)]
pub struct GroundTruthSet {
    meetings: Vec<(String, Vec<GroundTruthRecord>)>,
}

impl GroundTruthSet {
    pub fn from_records(records: Vec<GroundTruthRecord>) -> Self {
        let mut meetings: Vec<(String, Vec<GroundTruthRecord>)> = Vec::new();

        for record in records {
            match meetings.iter_mut().find(|(id, _)| *id == record.transcript_id) {
                Some((_, rows)) => rows.push(record),
                None => meetings.push((record.transcript_id.clone(), vec![record])),
            }
        }

        Self { meetings }
    }

    /// Meeting ids in first-appearance order
    pub fn meeting_ids(&self) -> impl Iterator<Item = &str> {
        self.meetings.iter().map(|(id, _)| id.as_str())
    }

    /// Rows annotated for one meeting; empty when the id is unknown
    pub fn meeting(&self, transcript_id: &str) -> &[GroundTruthRecord] {
        self.meetings
            .iter()
            .find(|(id, _)| id == transcript_id)
            .map(|(_, rows)| rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn meeting_count(&self) -> usize {
        self.meetings.len()
    }

    pub fn record_count(&self) -> usize {
        self.meetings.iter().map(|(_, rows)| rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_preserves_order() {
        let set = GroundTruthSet::from_records(vec![
            GroundTruthRecord::new("m2", "a", "Ann", "High"),
            GroundTruthRecord::new("m1", "b", "Bo", "Low"),
            GroundTruthRecord::new("m2", "c", "Cy", "Medium"),
        ]);

        assert_eq!(set.meeting_ids().collect::<Vec<_>>(), vec!["m2", "m1"]);
        let titles: Vec<_> = set.meeting("m2").iter().map(|r| r.task_title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(set.record_count(), 3);
        assert!(set.meeting("missing").is_empty());
    }

    #[test]
    fn test_record_ignores_extra_columns() {
        let json = r#"{
            "transcript_id": "meeting_01",
            "task_id": 3,
            "task_title": "Send budget",
            "owner": null,
            "priority": "High",
            "evidence_text": "I'll send the budget"
        }"#;
        let record: GroundTruthRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.transcript_id, "meeting_01");
        assert_eq!(record.owner, "");
        assert_eq!(record.priority, "High");
    }
}
