use super::Tool;

/// Name of the tool the extractor forces the model to call
pub const EXTRACTION_TOOL: &str = "record_meeting_analysis";

/// System prompt for task extraction
pub const SYSTEM_PROMPT: &str = r#"You are an expert meeting assistant specialized in extracting actionable tasks from meeting transcripts.
Extract EVERY actionable task mentioned in the meeting, including owner, deadline, priority, and evidence.

Guidelines:
- Only extract concrete, actionable tasks.
- Use a short, actionable title and a fuller description.
- The owner must be the name of the person responsible as it appears in the transcript. If there is no clear owner, use "TBD".
- Use the deadline exactly as stated (e.g. "next Friday", "EOD tomorrow"). If there is no deadline, use "TBD".
- Priority is one of High, Medium, Low, inferred from urgency language and importance to the meeting goals.
- Confidence (0.0-1.0) reflects your certainty in the owner, deadline and task clarity.
- Evidence is the exact quote from the transcript that led to the task.
- List every participant name mentioned.

Record the result with the record_meeting_analysis tool."#;

/// Build the user prompt for one transcript
pub fn build_extraction_prompt(transcript: &str) -> String {
    format!(
        "# Meeting Transcript\n\n{}\n\nExtract all actionable tasks and meeting outcomes.",
        transcript
    )
}

/// Tool whose input schema mirrors `MeetingAnalysis`
pub fn extraction_tool() -> Tool {
    Tool {
        name: EXTRACTION_TOOL.to_string(),
        description: "Record the tasks, participants, summary and decisions of a meeting".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "tasks": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "description": {"type": "string"},
                            "owner": {"type": "string"},
                            "deadline": {"type": "string"},
                            "priority": {"type": "string", "enum": ["High", "Medium", "Low"]},
                            "confidence": {"type": "number", "minimum": 0, "maximum": 1},
                            "evidence": {"type": "string"}
                        },
                        "required": ["title", "owner", "deadline", "priority", "confidence"]
                    }
                },
                "meeting_summary": {
                    "type": "string",
                    "description": "1-2 sentence summary of key decisions and outcomes"
                },
                "decisions": {
                    "type": "array",
                    "items": {"type": "string"}
                },
                "participants": {
                    "type": "array",
                    "items": {"type": "string"}
                }
            },
            "required": ["tasks", "meeting_summary", "decisions", "participants"]
        }),
    }
}
