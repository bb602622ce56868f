//! Weight plugins for round scoring

use crate::error::Result;
use crate::types::*;

/// Trait for pluggable weighting rules.
///
/// A plugin receives the current score map (seeded, or produced by the
/// previous plugin in the pipeline) and the full choice list of the round.
/// It adds its contribution on top of the map it was given and hands the
/// map back. Plugins never touch persisted state.
pub trait WeightPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Identity by default; variants override with an additive contribution.
    fn apply(&self, scores: ScoreMap, _choices: &[Choice]) -> Result<ScoreMap> {
        Ok(scores)
    }
}

/// Plugin with no contribution of its own
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPlugin;

impl WeightPlugin for IdentityPlugin {
    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Add `amount` to an item's score, inserting a zero entry first if needed
pub(crate) fn add_score(scores: &mut ScoreMap, id: &str, amount: f64) {
    *scores.entry(id.to_string()).or_insert(0.0) += amount;
}

/// Read an item's current score, 0 when it has no entry
pub(crate) fn current_score(scores: &ScoreMap, id: &str) -> f64 {
    scores.get(id).copied().unwrap_or(0.0)
}
