use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::evaluation::PredictionSource;
use crate::models::{GroundTruthRecord, GroundTruthSet, MeetingAnalysis, PredictedTask};

/// Read a transcript and clean up its whitespace
pub fn load_transcript(path: &Path) -> Result<String> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    Ok(clean_transcript(&content))
}

/// Collapse blank-line runs to one blank line and space/tab runs to one space
///
/// Line structure is kept so speaker prefixes stay on their own lines.
pub fn clean_transcript(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut blank_run = false;

    for line in raw.lines() {
        let collapsed = line
            .split([' ', '\t'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if collapsed.trim().is_empty() {
            blank_run = true;
            continue;
        }

        if !cleaned.is_empty() {
            cleaned.push_str(if blank_run { "\n\n" } else { "\n" });
        }
        cleaned.push_str(&collapsed);
        blank_run = false;
    }

    cleaned
}

/// Parse an extraction result file
pub fn load_meeting_analysis(path: &Path) -> Result<MeetingAnalysis> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_meeting_analysis(&content)
}

/// Parse extraction output, tolerating a surrounding markdown code fence
pub fn parse_meeting_analysis(json: &str) -> Result<MeetingAnalysis> {
    serde_json::from_str(strip_code_fence(json)).context("Failed to parse meeting analysis JSON")
}

fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}

/// Load the reference annotations
///
/// A `.csv` file is read as a headed table; anything else as a JSON array of
/// row objects. Columns other than the four used for evaluation are ignored.
pub fn load_ground_truth(path: &Path) -> Result<GroundTruthSet> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let records = if is_csv {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        parse_ground_truth_csv(file)?
    } else {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        serde_json::from_str(&content).context("Failed to parse ground truth JSON")?
    };

    let set = GroundTruthSet::from_records(records);
    info!(
        "Loaded ground truth: {} tasks from {} meetings",
        set.record_count(),
        set.meeting_count()
    );
    Ok(set)
}

/// One row of the annotation table; cells are kept as text
#[derive(Debug, Deserialize)]
struct GroundTruthRow {
    #[serde(default)]
    transcript_id: String,
    #[serde(default)]
    task_title: String,
    #[serde(default)]
    owner: String,
    #[serde(default)]
    priority: String,
}

/// Parse a headed CSV annotation table
pub fn parse_ground_truth_csv<R: std::io::Read>(reader: R) -> Result<Vec<GroundTruthRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line, row) in reader.deserialize::<GroundTruthRow>().enumerate() {
        let row = row.with_context(|| format!("Failed to parse ground truth CSV row {}", line + 1))?;
        records.push(GroundTruthRecord {
            transcript_id: row.transcript_id,
            task_title: row.task_title,
            owner: row.owner,
            priority: row.priority,
        });
    }

    Ok(records)
}

/// Parse a prediction file in any of the shapes the pipeline has written
///
/// Accepts a bare task list, or an object holding the list under `tasks`,
/// `planned_tasks`, or `analysis_results.tasks`. Non-object entries are skipped.
pub fn parse_predictions(json: &str) -> Result<Vec<PredictedTask>> {
    let value: Value = serde_json::from_str(json).context("Failed to parse predictions JSON")?;

    let tasks = match &value {
        Value::Array(_) => &value,
        Value::Object(map) => map
            .get("tasks")
            .or_else(|| map.get("planned_tasks"))
            .or_else(|| map.get("analysis_results").and_then(|r| r.get("tasks")))
            .context("No task list found in predictions")?,
        _ => anyhow::bail!("Predictions must be a JSON array or object"),
    };

    let items = tasks.as_array().context("Task list is not an array")?;
    Ok(items
        .iter()
        .filter(|v| v.is_object())
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect())
}

/// Predictions stored as `<meeting_id>_output.json` files
///
/// A file directly under `root` takes precedence over one under
/// `root/batch_results`.
#[derive(Debug, Clone)]
pub struct PredictionDir {
    root: PathBuf,
}

impl PredictionDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// First existing prediction file for a meeting
    pub fn locate(&self, meeting_id: &str) -> Option<PathBuf> {
        let file_name = format!("{}_output.json", meeting_id);
        [
            self.root.join(&file_name),
            self.root.join("batch_results").join(&file_name),
        ]
        .into_iter()
        .find(|p| p.is_file())
    }
}

impl PredictionSource for PredictionDir {
    /// A located but unreadable file yields an empty prediction list
    fn predictions_for(&self, meeting_id: &str) -> Option<Vec<PredictedTask>> {
        let path = self.locate(meeting_id)?;

        let loaded = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path))
            .and_then(|content| parse_predictions(&content));

        match loaded {
            Ok(tasks) => {
                info!("Loaded {} predictions from {:?}", tasks.len(), path);
                Some(tasks)
            }
            Err(e) => {
                warn!("Could not load predictions from {:?}: {:#}", path, e);
                Some(Vec::new())
            }
        }
    }
}
