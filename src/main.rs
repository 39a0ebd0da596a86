use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use meeting_actions::text::TextNormalization;
use meeting_actions::{
    format_evaluation_summary, load_ground_truth, load_meeting_analysis, load_transcript,
    run_evaluation, run_pipeline, write_json, AnthropicClient, AnthropicConfig,
    AnthropicExtractor, EvaluationConfig, MeetingAnalysis, PipelineConfig, PredictionDir,
    TaskExtractor, TaskSummary,
};

#[derive(Parser)]
#[command(name = "meeting-actions")]
#[command(author, version, about = "Turn meeting transcripts into validated, planned action items", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract tasks from a transcript with the LLM, then validate, deduplicate and plan them
    Process {
        /// Input transcript (plain text)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the processed tasks (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for a human-readable task summary (text)
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Model used for extraction
        #[arg(long)]
        model: Option<String>,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate, deduplicate and plan an existing extraction result
    Plan {
        /// Extraction result (JSON with tasks and participants)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the processed tasks (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for a human-readable task summary (text)
        #[arg(long)]
        summary: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Score predicted tasks against annotated ground truth
    Evaluate {
        /// Ground truth annotations (CSV with headers, or a JSON array of rows)
        #[arg(short, long)]
        ground_truth: PathBuf,

        /// Directory holding <meeting_id>_output.json prediction files
        #[arg(short, long)]
        predictions: PathBuf,

        /// Output file for the full report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Jaccard similarity a predicted title must exceed to count as a match
        #[arg(long, default_value = "0.3")]
        match_threshold: f64,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(clap::Args)]
struct PipelineArgs {
    /// Confidence multiplier for owners not found among participants
    #[arg(long, default_value = "0.7")]
    owner_penalty: f64,

    /// Strip punctuation from titles before deduplicating
    #[arg(long)]
    strict_dedup: bool,
}

impl PipelineArgs {
    fn config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.validation.owner_penalty = self.owner_penalty;
        if self.strict_dedup {
            config.dedup.key_normalization = TextNormalization::Strict;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            summary,
            model,
            pipeline,
            verbose,
        } => {
            setup_logging(verbose);
            process_transcript(&input, &output, summary.as_deref(), model, &pipeline.config())
                .await
        }
        Commands::Plan {
            input,
            output,
            summary,
            pipeline,
            verbose,
        } => {
            setup_logging(verbose);
            info!("Loading extraction result from {:?}", input);
            let analysis =
                load_meeting_analysis(&input).context("Failed to parse extraction result")?;
            finish_pipeline(&analysis, &output, summary.as_deref(), &pipeline.config())
        }
        Commands::Evaluate {
            ground_truth,
            predictions,
            output,
            match_threshold,
            verbose,
        } => {
            setup_logging(verbose);
            let config = EvaluationConfig {
                match_threshold,
                ..EvaluationConfig::default()
            };
            evaluate(&ground_truth, &predictions, output.as_deref(), &config)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn process_transcript(
    input: &Path,
    output: &Path,
    summary: Option<&Path>,
    model: Option<String>,
    config: &PipelineConfig,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let transcript = load_transcript(input)?;
    if transcript.is_empty() {
        anyhow::bail!("Transcript {:?} is empty", input);
    }

    let mut llm_config = AnthropicConfig::from_env()?;
    if let Some(model) = model {
        llm_config.model = model;
    }
    let extractor = AnthropicExtractor::new(AnthropicClient::new(llm_config));
    let analysis = extractor
        .extract(&transcript)
        .await
        .context("Task extraction failed")?;

    finish_pipeline(&analysis, output, summary, config)
}

fn finish_pipeline(
    analysis: &MeetingAnalysis,
    output: &Path,
    summary: Option<&Path>,
    config: &PipelineConfig,
) -> Result<()> {
    let processed = run_pipeline(analysis, config);

    write_json(&processed, output)?;
    info!("Tasks written to {:?}", output);

    if let Some(path) = summary {
        TaskSummary::new(&processed).write_file(path)?;
        info!("Summary written to {:?}", path);
    }

    info!(
        "Complete: {} of {} extracted tasks kept",
        processed.total_tasks,
        analysis.tasks.len()
    );

    Ok(())
}

fn evaluate(
    ground_truth: &Path,
    predictions: &Path,
    output: Option<&Path>,
    config: &EvaluationConfig,
) -> Result<()> {
    let ground_truth = load_ground_truth(ground_truth).context("Could not load ground truth")?;
    if ground_truth.is_empty() {
        anyhow::bail!("Ground truth contains no meetings");
    }

    let report = run_evaluation(&ground_truth, &PredictionDir::new(predictions), config);

    if let Some(path) = output {
        write_json(&report, path)?;
        info!("Report written to {:?}", path);
    }

    println!("{}", format_evaluation_summary(&report, config));

    Ok(())
}
