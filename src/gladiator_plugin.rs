//! Gladiator weighting: winners take a bonus and absorb the loser's standing

use crate::error::Result;
use crate::plugins::{add_score, current_score, WeightPlugin};
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GladiatorOptions {
    pub winner_bonus: f64,
    pub loser_bonus: f64,
    pub absorb_loser: bool,
}

impl Default for GladiatorOptions {
    fn default() -> Self {
        Self {
            winner_bonus: 10_000.0,
            loser_bonus: 2_000.0,
            absorb_loser: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GladiatorPlugin {
    options: GladiatorOptions,
}

impl GladiatorPlugin {
    pub fn new(options: GladiatorOptions) -> Self {
        Self { options }
    }
}

impl WeightPlugin for GladiatorPlugin {
    fn name(&self) -> &'static str {
        "gladiator"
    }

    /// Sequential fold over the choices: absorption reads the loser's score
    /// as left by earlier choices, before this choice's loser bonus.
    fn apply(&self, mut scores: ScoreMap, choices: &[Choice]) -> Result<ScoreMap> {
        for choice in choices {
            let winner = &choice.picked.id;
            let loser = &choice.not_picked.id;

            add_score(&mut scores, winner, self.options.winner_bonus);

            if self.options.absorb_loser {
                let absorbed = current_score(&scores, loser);
                add_score(&mut scores, winner, absorbed);
            }

            add_score(&mut scores, loser, self.options.loser_bonus);
        }

        Ok(scores)
    }
}
