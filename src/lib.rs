//! twobutton - round scoring for pairwise-choice games
//!
//! Turns a round of "picked vs. not picked" choices into per-item scores:
//! - Default score seeding for every item in the round
//! - Ordered pipeline of weight plugins (delta, gladiator, related, custom)
//! - Transactional per-player normalization to a [0, 1] range

pub mod types;
pub mod error;
pub mod plugins;
pub mod delta_plugin;
pub mod gladiator_plugin;
pub mod related_plugin;
pub mod round;
pub mod config;
pub mod store;
pub mod normalizer;
pub mod engine;

pub use types::*;
pub use error::{ChoiceSide, Result, ScoringError};
pub use plugins::{IdentityPlugin, WeightPlugin};
pub use delta_plugin::{DeltaOptions, DeltaPlugin};
pub use gladiator_plugin::{GladiatorOptions, GladiatorPlugin};
pub use related_plugin::{RelatedOptions, RelatedPlugin};
pub use round::{default_scores, RoundProcessor};
pub use config::{GameModes, PipelineConfig, PluginConfig};
pub use store::{MemoryScoreStore, ScoreStore, ScoreTransaction};
pub use normalizer::{normalize_map, NormalizationOutcome, ScoreNormalizer, SkipReason};
pub use engine::ScoringEngine;

#[cfg(test)]
mod tests;
