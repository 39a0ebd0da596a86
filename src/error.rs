use thiserror::Error;

/// Reasons a meeting cannot be evaluated
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("no ground truth found for {0}")]
    NoGroundTruth(String),
}
