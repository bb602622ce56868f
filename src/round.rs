//! Round processing: seed default scores, then fold the plugin pipeline

use crate::error::Result;
use crate::plugins::WeightPlugin;
use crate::types::*;
use std::time::Instant;
use tracing::{debug, info};

/// Zero-initialized score for every item appearing on either side of a choice
pub fn default_scores(choices: &[Choice]) -> ScoreMap {
    let mut scores = ScoreMap::with_capacity(choices.len() * 2);
    for choice in choices {
        scores.entry(choice.picked.id.clone()).or_insert(0.0);
        scores.entry(choice.not_picked.id.clone()).or_insert(0.0);
    }
    scores
}

/// Ordered pipeline of weight plugins applied to one round at a time
#[derive(Default)]
pub struct RoundProcessor {
    plugins: Vec<Box<dyn WeightPlugin>>,
}

impl RoundProcessor {
    pub fn new(plugins: Vec<Box<dyn WeightPlugin>>) -> Self {
        Self { plugins }
    }

    /// Append a plugin to the end of the pipeline
    pub fn with_plugin(mut self, plugin: impl WeightPlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Score one round. Plugins run in the order they were added; the first
    /// failing plugin aborts the round.
    pub fn process(&self, choices: &[Choice]) -> Result<ScoreMap> {
        let start = Instant::now();
        validate_round(choices)?;

        let seeded = default_scores(choices);
        debug!(
            "Seeded {} items from {} choices",
            seeded.len(),
            choices.len()
        );

        let scores = self.plugins.iter().try_fold(seeded, |scores, plugin| -> Result<ScoreMap> {
            let scores = plugin.apply(scores, choices)?;
            debug!("Applied plugin '{}' ({} items)", plugin.name(), scores.len());
            Ok(scores)
        })?;

        info!(
            "Round scored: {} choices, {} items, {} plugins in {}us",
            choices.len(),
            scores.len(),
            self.plugins.len(),
            start.elapsed().as_micros()
        );

        Ok(scores)
    }
}

impl std::fmt::Debug for RoundProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundProcessor")
            .field("plugins", &self.plugin_names())
            .finish()
    }
}
