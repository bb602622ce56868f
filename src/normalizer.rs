//! Normalize a player's accumulated scores relative to their maximum
//!
//! Every score is divided by the player's highest score, so the best item
//! ends at 1.0 and relative standing is preserved. Reading and rewriting
//! happen inside one store transaction: either every row for the player is
//! rewritten or none is.
//!
//! Degenerate inputs are skipped, never divided:
//! - no scores at all
//! - a maximum that is zero or negative
//! - any score that is NaN or infinite

use crate::error::Result;
use crate::store::ScoreStore;
use crate::types::*;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SkipReason {
    NoScores,
    NonPositiveMax(f64),
    NonFiniteScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NormalizationOutcome {
    Normalized { max_score: f64, updated: usize },
    Skipped(SkipReason),
}

/// Maximum usable as a divisor, or the reason there is none
fn divisor<'a>(scores: impl Iterator<Item = &'a f64>) -> std::result::Result<f64, SkipReason> {
    let mut max: Option<f64> = None;
    for &score in scores {
        if !score.is_finite() {
            return Err(SkipReason::NonFiniteScore);
        }
        max = Some(max.map_or(score, |m: f64| m.max(score)));
    }

    match max {
        None => Err(SkipReason::NoScores),
        Some(m) if m <= 0.0 => Err(SkipReason::NonPositiveMax(m)),
        Some(m) => Ok(m),
    }
}

/// In-memory normalization with the same skip policy as the store-backed path.
/// Returns `None` when the map is degenerate.
pub fn normalize_map(scores: &ScoreMap) -> Option<ScoreMap> {
    let max = divisor(scores.values()).ok()?;
    Some(
        scores
            .iter()
            .map(|(id, score)| (id.clone(), score / max))
            .collect(),
    )
}

pub struct ScoreNormalizer<S> {
    store: S,
}

impl<S: ScoreStore> ScoreNormalizer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn normalize_player(&self, player_id: &str) -> Result<NormalizationOutcome> {
        let mut tx = self.store.begin().await?;
        let mut rows = tx.list_player_scores(player_id).await?;

        let max_score = match divisor(rows.iter().map(|r| &r.score)) {
            Ok(max) => max,
            Err(reason) => {
                warn!("Skipping normalization for player {}: {:?}", player_id, reason);
                return Ok(NormalizationOutcome::Skipped(reason));
            }
        };

        for row in &mut rows {
            row.score /= max_score;
        }

        tx.update_player_scores(player_id, &rows).await?;
        tx.commit().await?;

        info!(
            "Normalized {} scores for player {} (max was {})",
            rows.len(),
            player_id,
            max_score
        );

        Ok(NormalizationOutcome::Normalized {
            max_score,
            updated: rows.len(),
        })
    }

    /// Normalize several players concurrently; each gets its own transaction.
    pub async fn normalize_players(
        &self,
        player_ids: &[PlayerId],
    ) -> Vec<(PlayerId, Result<NormalizationOutcome>)> {
        let results = join_all(player_ids.iter().map(|p| self.normalize_player(p))).await;
        player_ids.iter().cloned().zip(results).collect()
    }
}
