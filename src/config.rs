//! Pipeline assembly from configuration, one pipeline per game mode

use crate::delta_plugin::{DeltaOptions, DeltaPlugin};
use crate::gladiator_plugin::{GladiatorOptions, GladiatorPlugin};
use crate::plugins::{IdentityPlugin, WeightPlugin};
use crate::related_plugin::{RelatedOptions, RelatedPlugin};
use crate::round::RoundProcessor;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Env var holding the path to a game-mode JSON file
pub const PIPELINE_PATH_ENV: &str = "TWOBUTTON_PIPELINE";
/// Env var selecting the game mode inside that file
pub const MODE_ENV: &str = "TWOBUTTON_MODE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PluginConfig {
    Identity,
    Delta(DeltaOptions),
    Gladiator(GladiatorOptions),
    Related(RelatedOptions),
}

impl PluginConfig {
    pub fn build(&self) -> Box<dyn WeightPlugin> {
        match *self {
            PluginConfig::Identity => Box::new(IdentityPlugin),
            PluginConfig::Delta(opts) => Box::new(DeltaPlugin::new(opts)),
            PluginConfig::Gladiator(opts) => Box::new(GladiatorPlugin::new(opts)),
            PluginConfig::Related(opts) => Box::new(RelatedPlugin::new(opts)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub plugins: Vec<PluginConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            plugins: vec![
                PluginConfig::Gladiator(GladiatorOptions::default()),
                PluginConfig::Delta(DeltaOptions::default()),
            ],
        }
    }
}

impl PipelineConfig {
    /// Build the processor, keeping plugin order as configured
    pub fn build(&self) -> RoundProcessor {
        RoundProcessor::new(self.plugins.iter().map(PluginConfig::build).collect())
    }
}

/// Named pipelines, e.g. `{"modes": {"classic": {"plugins": [...]}}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameModes {
    pub modes: HashMap<String, PipelineConfig>,
}

impl GameModes {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Invalid game mode configuration")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn processor_for(&self, mode: &str) -> Result<RoundProcessor> {
        match self.modes.get(mode) {
            Some(pipeline) => Ok(pipeline.build()),
            None => {
                let mut known: Vec<_> = self.modes.keys().map(String::as_str).collect();
                known.sort_unstable();
                anyhow::bail!("Unknown game mode '{}' (known: {})", mode, known.join(", "))
            }
        }
    }
}
