//! Score one round of choices from a JSON file

use anyhow::Context;
use serde::Serialize;
use twobutton::config::{MODE_ENV, PIPELINE_PATH_ENV};
use twobutton::{
    Choice, GameModes, MemoryScoreStore, NormalizationOutcome, PipelineConfig, RoundProcessor,
    ScoreMap, ScoringEngine,
};

const CLI_PLAYER: &str = "cli";

#[derive(Debug, Serialize)]
struct ScoredItem {
    item: String,
    score: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let normalize = args.iter().any(|arg| arg == "--normalize");
    let Some(choices_path) = args.iter().find(|arg| !arg.starts_with("--")) else {
        eprintln!("Usage: twobutton-score <choices.json> [--normalize]");
        eprintln!("   {}=<modes.json> {}=<mode> select a pipeline", PIPELINE_PATH_ENV, MODE_ENV);
        std::process::exit(2);
    };

    let raw = std::fs::read_to_string(choices_path)
        .with_context(|| format!("Failed to read {}", choices_path))?;
    let choices: Vec<Choice> =
        serde_json::from_str(&raw).context("Choices file must be a JSON array of choices")?;

    let processor = load_processor()?;
    tracing::info!("Pipeline: {:?}", processor.plugin_names());

    let engine = ScoringEngine::new(processor, MemoryScoreStore::new());
    let mut scores = engine.score_round(CLI_PLAYER, &choices).await?;

    if normalize {
        match engine.normalize_player(CLI_PLAYER).await? {
            NormalizationOutcome::Normalized { .. } => {
                scores = engine.store().snapshot(CLI_PLAYER).await;
            }
            NormalizationOutcome::Skipped(reason) => {
                tracing::warn!("Scores left as-is: {:?}", reason);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&ranked(scores))?);
    Ok(())
}

/// Pipeline from the game-mode file when configured, otherwise the default
fn load_processor() -> anyhow::Result<RoundProcessor> {
    match std::env::var(PIPELINE_PATH_ENV) {
        Ok(path) => {
            let mode = std::env::var(MODE_ENV)
                .with_context(|| format!("{} is set but {} is not", PIPELINE_PATH_ENV, MODE_ENV))?;
            GameModes::from_path(&path)?.processor_for(&mode)
        }
        Err(_) => Ok(PipelineConfig::default().build()),
    }
}

fn ranked(scores: ScoreMap) -> Vec<ScoredItem> {
    let mut items: Vec<ScoredItem> = scores
        .into_iter()
        .map(|(item, score)| ScoredItem { item, score })
        .collect();
    items.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.item.cmp(&b.item)));
    items
}
