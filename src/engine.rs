//! ScoringEngine: round scoring and normalization against one store

use crate::error::Result;
use crate::normalizer::{NormalizationOutcome, ScoreNormalizer};
use crate::round::RoundProcessor;
use crate::store::ScoreStore;
use crate::types::*;
use std::sync::Arc;
use tracing::info;

/// Main scoring engine (thread-safe via Arc)
pub struct ScoringEngine<S> {
    processor: RoundProcessor,
    normalizer: ScoreNormalizer<S>,
}

pub type SharedScoringEngine<S> = Arc<ScoringEngine<S>>;

impl<S: ScoreStore> ScoringEngine<S> {
    pub fn new(processor: RoundProcessor, store: S) -> SharedScoringEngine<S> {
        Arc::new(Self {
            processor,
            normalizer: ScoreNormalizer::new(store),
        })
    }

    pub fn processor(&self) -> &RoundProcessor {
        &self.processor
    }

    pub fn store(&self) -> &S {
        self.normalizer.store()
    }

    /// Score a round and merge it into the player's history.
    ///
    /// Scoring finishes before the store is touched, so a rejected round
    /// writes nothing. Returns the round's own contribution.
    pub async fn score_round(&self, player_id: &str, choices: &[Choice]) -> Result<ScoreMap> {
        let scores = self.processor.process(choices)?;
        self.store().add_round_scores(player_id, &scores).await?;

        info!(
            "Committed round for player {}: {} items",
            player_id,
            scores.len()
        );
        Ok(scores)
    }

    pub async fn normalize_player(&self, player_id: &str) -> Result<NormalizationOutcome> {
        self.normalizer.normalize_player(player_id).await
    }

    pub async fn normalize_players(
        &self,
        player_ids: &[PlayerId],
    ) -> Vec<(PlayerId, Result<NormalizationOutcome>)> {
        self.normalizer.normalize_players(player_ids).await
    }
}
