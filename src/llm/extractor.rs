use anyhow::Result;
use tracing::info;

use crate::models::MeetingAnalysis;

use super::{build_extraction_prompt, extraction_tool, AnthropicClient, SYSTEM_PROMPT};

/// Produces a raw meeting analysis from a transcript
///
/// The post-processing pipeline only consumes the returned shape, so any
/// implementation (a model call, a fixture) can stand in. The returned future
/// carries no `Send` bound; callers await it on the task that owns the extractor.
#[allow(async_fn_in_trait)]
pub trait TaskExtractor {
    async fn extract(&self, transcript: &str) -> Result<MeetingAnalysis>;
}

/// Extraction backed by a forced tool call on the Anthropic API
pub struct AnthropicExtractor {
    client: AnthropicClient,
}

impl AnthropicExtractor {
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }
}

impl TaskExtractor for AnthropicExtractor {
    async fn extract(&self, transcript: &str) -> Result<MeetingAnalysis> {
        info!(
            "Extracting tasks from {} characters with {}",
            transcript.len(),
            self.client.model()
        );

        let prompt = build_extraction_prompt(transcript);
        let analysis: MeetingAnalysis = self
            .client
            .send_with_tool(SYSTEM_PROMPT, &prompt, extraction_tool())
            .await?;

        info!(
            "Extracted {} tasks, {} participants",
            analysis.tasks.len(),
            analysis.participants.len()
        );
        Ok(analysis)
    }
}

/// Returns a fixed analysis regardless of the transcript
pub struct StaticExtractor {
    analysis: MeetingAnalysis,
}

impl StaticExtractor {
    pub fn new(analysis: MeetingAnalysis) -> Self {
        Self { analysis }
    }
}

impl TaskExtractor for StaticExtractor {
    async fn extract(&self, _transcript: &str) -> Result<MeetingAnalysis> {
        Ok(self.analysis.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawTask;
    use crate::stages::{run_pipeline, PipelineConfig};

    async fn process(extractor: &impl TaskExtractor, transcript: &str) -> Result<usize> {
        let analysis = extractor.extract(transcript).await?;
        Ok(run_pipeline(&analysis, &PipelineConfig::default()).total_tasks)
    }

    #[tokio::test]
    async fn test_static_extractor_feeds_pipeline() {
        let extractor = StaticExtractor::new(MeetingAnalysis {
            tasks: vec![RawTask::titled("Fix bug"), RawTask::titled("Fix bug")],
            ..MeetingAnalysis::default()
        });

        assert_eq!(process(&extractor, "anything").await.unwrap(), 1);
    }
}
