pub mod error;
pub mod evaluation;
pub mod io;
pub mod llm;
pub mod models;
pub mod planner;
pub mod stages;
pub mod text;

pub use error::EvaluationError;
pub use evaluation::{evaluate_meeting, run_evaluation, EvaluationConfig, PredictionSource};
pub use io::{
    format_evaluation_summary, load_ground_truth, load_meeting_analysis, load_transcript,
    write_json, PredictionDir, TaskSummary,
};
pub use llm::{AnthropicClient, AnthropicConfig, AnthropicExtractor, TaskExtractor};
pub use models::{
    EvaluationReport, EvaluationResult, GroundTruthRecord, GroundTruthSet, MeetingAnalysis,
    PredictedTask, ProcessedMeeting, RawTask, Task,
};
pub use planner::{plan_tasks, PlannerConfig};
pub use stages::{
    deduplicate_tasks, run_pipeline, validate_tasks, DedupConfig, PipelineConfig, ValidationConfig,
};
