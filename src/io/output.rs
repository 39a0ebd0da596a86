use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::evaluation::EvaluationConfig;
use crate::models::{EvaluationReport, ProcessedMeeting};

/// Write any serializable value as pretty JSON
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, value).context("Failed to write JSON")?;
    Ok(())
}

const SUMMARY_WIDTH: usize = 80;
const SUMMARY_INDENT: &str = "  ";

/// Human-readable action item listing for one processed meeting
pub struct TaskSummary<'a> {
    meeting: &'a ProcessedMeeting,
}

impl<'a> TaskSummary<'a> {
    pub fn new(meeting: &'a ProcessedMeeting) -> Self {
        Self { meeting }
    }

    pub fn format(&self) -> String {
        let mut output = String::new();

        if !self.meeting.meeting_summary.is_empty() {
            output.push_str("Summary:\n");
            let width = SUMMARY_WIDTH - SUMMARY_INDENT.len();
            for line in summary_lines(&self.meeting.meeting_summary, width) {
                let _ = writeln!(output, "{}{}", SUMMARY_INDENT, line);
            }
            output.push('\n');
        }

        if !self.meeting.decisions.is_empty() {
            output.push_str("Decisions:\n");
            for decision in &self.meeting.decisions {
                let _ = writeln!(output, "- {}", decision);
            }
            output.push('\n');
        }

        let _ = writeln!(output, "Action items ({}):", self.meeting.total_tasks);
        for (i, task) in self.meeting.tasks.iter().enumerate() {
            let _ = writeln!(output, "\n{}. {}", i + 1, task.display_title());

            let owner_flag = match task.owner_valid {
                Some(false) if task.has_owner() => " (not a participant)",
                _ => "",
            };
            let _ = writeln!(output, "   Owner: {}{}", task.owner, owner_flag);
            let _ = writeln!(output, "   Deadline: {}", task.deadline);
            let _ = writeln!(output, "   Priority: {}", task.priority);
            if let Some(effort) = task.estimated_effort {
                let _ = writeln!(output, "   Effort: {}", effort);
            }
            let _ = writeln!(output, "   Confidence: {:.2}", task.confidence);
            for (n, step) in task.execution_steps.iter().enumerate() {
                let _ = writeln!(output, "     {}) {}", n + 1, step);
            }
        }

        output
    }

    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Console summary of an evaluation run
pub fn format_evaluation_summary(report: &EvaluationReport, config: &EvaluationConfig) -> String {
    let mut output = String::new();

    output.push_str("Evaluation Summary\n");
    output.push_str("==================\n");

    match &report.overall {
        Some(overall) => {
            let verdict = |met: bool| if met { "achieved" } else { "needs work" };
            let _ = writeln!(
                output,
                "Overall ({} meetings):",
                overall.total_meetings_evaluated
            );
            let _ = writeln!(output, "  Task F1:            {:.3}", overall.avg_task_f1);
            let _ = writeln!(output, "  Task precision:     {:.3}", overall.avg_task_precision);
            let _ = writeln!(output, "  Task recall:        {:.3}", overall.avg_task_recall);
            let _ = writeln!(output, "  Owner accuracy:     {:.3}", overall.avg_owner_accuracy);
            let _ = writeln!(output, "  Priority accuracy:  {:.3}", overall.avg_priority_accuracy);
            let _ = writeln!(
                output,
                "  Matched-pair owner / priority accuracy: {:.3} / {:.3}",
                overall.avg_matched_owner_accuracy, overall.avg_matched_priority_accuracy
            );
            let _ = writeln!(
                output,
                "  Target F1 >= {}: {}",
                config.target_f1,
                verdict(overall.meets_f1_target(config.target_f1))
            );
            let _ = writeln!(
                output,
                "  Target owner accuracy >= {}: {}",
                config.target_owner_accuracy,
                verdict(overall.meets_owner_target(config.target_owner_accuracy))
            );
        }
        None => output.push_str("No successful evaluations\n"),
    }

    if !report.meetings.is_empty() {
        output.push_str("\nPer meeting:\n");
        for result in &report.meetings {
            let _ = writeln!(
                output,
                "  {}: F1={:.3} owner={:.3}",
                result.transcript_id, result.task_f1, result.owner_accuracy
            );
        }
    }

    if !report.skipped.is_empty() {
        let _ = writeln!(output, "\nSkipped (no predictions): {}", report.skipped.join(", "));
    }

    output
}

/// Greedily fill lines of at most `width` characters; a longer word gets a line of its own
fn summary_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for word in text.split_whitespace() {
        match lines.last_mut() {
            Some(line) if line.chars().count() + 1 + word.chars().count() <= width => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }

    lines
}
