//! Related weighting: propagate a choice to items associated with each side

use crate::error::{ChoiceSide, Result, ScoringError};
use crate::plugins::{add_score, WeightPlugin};
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelatedOptions {
    pub related_bonus_winner: f64,
    pub related_bonus_loser: f64,
}

impl Default for RelatedOptions {
    fn default() -> Self {
        Self {
            related_bonus_winner: 2_000.0,
            related_bonus_loser: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RelatedPlugin {
    options: RelatedOptions,
}

impl RelatedPlugin {
    pub fn new(options: RelatedOptions) -> Self {
        Self { options }
    }

    /// Every item on both sides of every choice must carry `relatedIds`.
    fn check_related_ids(choices: &[Choice]) -> Result<()> {
        for (index, choice) in choices.iter().enumerate() {
            if choice.picked.related_ids.is_none() {
                return Err(ScoringError::MissingRelatedIds {
                    index,
                    side: ChoiceSide::Picked,
                });
            }
            if choice.not_picked.related_ids.is_none() {
                return Err(ScoringError::MissingRelatedIds {
                    index,
                    side: ChoiceSide::NotPicked,
                });
            }
        }
        Ok(())
    }
}

fn add_to_related(scores: &mut ScoreMap, related: Option<&Vec<ItemId>>, bonus: f64) {
    for id in related.into_iter().flatten() {
        add_score(scores, id, bonus);
    }
}

impl WeightPlugin for RelatedPlugin {
    fn name(&self) -> &'static str {
        "related"
    }

    fn apply(&self, mut scores: ScoreMap, choices: &[Choice]) -> Result<ScoreMap> {
        Self::check_related_ids(choices)?;

        for choice in choices {
            if self.options.related_bonus_winner > 0.0 {
                add_to_related(
                    &mut scores,
                    choice.picked.related_ids.as_ref(),
                    self.options.related_bonus_winner,
                );
            }
            if self.options.related_bonus_loser > 0.0 {
                add_to_related(
                    &mut scores,
                    choice.not_picked.related_ids.as_ref(),
                    self.options.related_bonus_loser,
                );
            }
        }

        Ok(scores)
    }
}
