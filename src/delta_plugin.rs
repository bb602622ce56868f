//! Delta weighting: decisive choices weigh more than close calls

use crate::error::Result;
use crate::plugins::{add_score, WeightPlugin};
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeltaOptions {
    pub winner_delta_multiplier: f64,
    pub loser_delta_multiplier: f64,
}

impl Default for DeltaOptions {
    fn default() -> Self {
        Self {
            winner_delta_multiplier: 1.0,
            loser_delta_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeltaPlugin {
    options: DeltaOptions,
}

impl DeltaPlugin {
    pub fn new(options: DeltaOptions) -> Self {
        Self { options }
    }
}

impl WeightPlugin for DeltaPlugin {
    fn name(&self) -> &'static str {
        "delta"
    }

    fn apply(&self, mut scores: ScoreMap, choices: &[Choice]) -> Result<ScoreMap> {
        for choice in choices {
            let delta = choice.delta();
            add_score(
                &mut scores,
                &choice.picked.id,
                self.options.winner_delta_multiplier * delta,
            );
            add_score(
                &mut scores,
                &choice.not_picked.id,
                self.options.loser_delta_multiplier * delta,
            );
        }

        Ok(scores)
    }
}
