//! Error types for round scoring and normalization

use thiserror::Error;

/// Which side of a choice an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceSide {
    Picked,
    NotPicked,
}

impl std::fmt::Display for ChoiceSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChoiceSide::Picked => f.write_str("picked"),
            ChoiceSide::NotPicked => f.write_str("notPicked"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("round contains no choices")]
    EmptyRound,

    #[error("choice {index} compares item '{item}' with itself")]
    SelfComparison { index: usize, item: String },

    #[error("choice {index}: {side} item has no relatedIds")]
    MissingRelatedIds { index: usize, side: ChoiceSide },

    #[error("score store error: {0}")]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ScoringError>;
