//! Core type definitions for round scoring

use crate::error::{Result, ScoringError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type ItemId = String;
pub type PlayerId = String;

/// Accumulated score per item. Threaded through the plugin pipeline by value.
pub type ScoreMap = HashMap<ItemId, f64>;

/// One side of a pairwise choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceItem {
    pub id: ItemId,
    #[serde(default)]
    pub data: serde_json::Value,
    /// Items associated with this one; required only by the related plugin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_ids: Option<Vec<ItemId>>,
}

impl ChoiceItem {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            data: serde_json::Value::Null,
            related_ids: None,
        }
    }

    pub fn with_related<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        self.related_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// A single pick between two items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub picked: ChoiceItem,
    pub not_picked: ChoiceItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

impl Choice {
    pub fn new(picked: ChoiceItem, not_picked: ChoiceItem) -> Self {
        Self {
            picked,
            not_picked,
            delta: None,
        }
    }

    /// Shorthand for a choice between two bare ids
    pub fn between(picked: impl Into<ItemId>, not_picked: impl Into<ItemId>) -> Self {
        Self::new(ChoiceItem::new(picked), ChoiceItem::new(not_picked))
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Delta between selection events, 0 when the choice carries none
    pub fn delta(&self) -> f64 {
        self.delta.unwrap_or(0.0)
    }
}

/// Persisted score row for one (player, item) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub player_id: PlayerId,
    pub item_id: ItemId,
    pub score: f64,
}

/// Check that a round is non-empty and no choice compares an item with itself
pub fn validate_round(choices: &[Choice]) -> Result<()> {
    if choices.is_empty() {
        return Err(ScoringError::EmptyRound);
    }

    for (index, choice) in choices.iter().enumerate() {
        if choice.picked.id == choice.not_picked.id {
            return Err(ScoringError::SelfComparison {
                index,
                item: choice.picked.id.clone(),
            });
        }
    }

    Ok(())
}
