//! Persistence boundary for player scores, plus an in-memory implementation

use crate::types::*;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Unit of work against the store. Writes become visible only on `commit`;
/// dropping the transaction discards them.
#[async_trait]
pub trait ScoreTransaction: Send {
    async fn list_player_scores(&mut self, player_id: &str) -> Result<Vec<PlayerScore>>;

    async fn update_player_scores(&mut self, player_id: &str, rows: &[PlayerScore]) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;
}

/// Trait for transactional player score storage
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn begin<'a>(&'a self) -> Result<Box<dyn ScoreTransaction + 'a>>;

    /// Additive merge of one round's contribution: `new = old + contribution`
    async fn add_round_scores(&self, player_id: &str, scores: &ScoreMap) -> Result<()>;
}

type Table = HashMap<PlayerId, ScoreMap>;

/// In-memory store. A transaction holds the table lock from `begin` until it
/// commits or is dropped, so round merges cannot interleave with it.
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    table: Arc<Mutex<Table>>,
    fail_next_commit: Arc<AtomicBool>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_score(&self, player_id: &str, item_id: &str, score: f64) {
        let mut table = self.table.lock().await;
        table
            .entry(player_id.to_string())
            .or_default()
            .insert(item_id.to_string(), score);
    }

    /// Committed scores for one player
    pub async fn snapshot(&self, player_id: &str) -> ScoreMap {
        let table = self.table.lock().await;
        table.get(player_id).cloned().unwrap_or_default()
    }

    /// Make the next commit fail, leaving the store untouched
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }
}

struct MemoryTransaction<'a> {
    table: MutexGuard<'a, Table>,
    staged: Table,
    fail_commit: &'a AtomicBool,
}

#[async_trait]
impl<'a> ScoreTransaction for MemoryTransaction<'a> {
    async fn list_player_scores(&mut self, player_id: &str) -> Result<Vec<PlayerScore>> {
        let mut merged = self.table.get(player_id).cloned().unwrap_or_default();
        if let Some(staged) = self.staged.get(player_id) {
            merged.extend(staged.iter().map(|(k, v)| (k.clone(), *v)));
        }

        Ok(merged
            .into_iter()
            .map(|(item_id, score)| PlayerScore {
                player_id: player_id.to_string(),
                item_id,
                score,
            })
            .collect())
    }

    async fn update_player_scores(&mut self, player_id: &str, rows: &[PlayerScore]) -> Result<()> {
        if let Some(row) = rows.iter().find(|r| r.player_id != player_id) {
            anyhow::bail!(
                "Row for player '{}' in batch update for player '{}'",
                row.player_id,
                player_id
            );
        }

        let staged = self.staged.entry(player_id.to_string()).or_default();
        for row in rows {
            staged.insert(row.item_id.clone(), row.score);
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTransaction {
            mut table,
            staged,
            fail_commit,
        } = *self;

        if fail_commit.swap(false, Ordering::SeqCst) {
            anyhow::bail!("Transaction aborted");
        }

        for (player_id, rows) in staged {
            debug!("Committing {} rows for player {}", rows.len(), player_id);
            table.entry(player_id).or_default().extend(rows);
        }
        Ok(())
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn begin<'a>(&'a self) -> Result<Box<dyn ScoreTransaction + 'a>> {
        let table = self.table.lock().await;
        Ok(Box::new(MemoryTransaction {
            table,
            staged: Table::new(),
            fail_commit: &self.fail_next_commit,
        }))
    }

    async fn add_round_scores(&self, player_id: &str, scores: &ScoreMap) -> Result<()> {
        let mut table = self.table.lock().await;
        let player = table.entry(player_id.to_string()).or_default();
        for (item_id, contribution) in scores {
            *player.entry(item_id.clone()).or_insert(0.0) += contribution;
        }
        debug!("Merged {} round scores for player {}", scores.len(), player_id);
        Ok(())
    }
}
