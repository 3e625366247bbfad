//! Document store over the player and score collections.
//!
//! Owns the two JSONL files and hands out immutable snapshots for the
//! stats engine. There is no cross-collection integrity: deleting a player
//! leaves dangling references in scores, which the aggregator tolerates.

use tracing::{info, warn};

use crate::models::{EntityId, Player, Score};

use super::{JsonlFile, StorageConfig, StorageError};

/// An immutable snapshot of both collections, scores date-descending.
///
/// This is the input shape the stats engine expects; a fresh snapshot is
/// taken on every read rather than patching prior results.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub scores: Vec<Score>,
}

/// Filesystem-backed store for players and scores.
pub struct Store {
    players: JsonlFile<Player>,
    scores: JsonlFile<Score>,
}

impl Store {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            players: JsonlFile::new(config.players_path()),
            scores: JsonlFile::new(config.scores_path()),
        }
    }

    // --- Players ---

    /// All players, in stored order. Documents failing shape checks are
    /// logged and dropped.
    pub fn list_players(&self) -> Result<Vec<Player>, StorageError> {
        let mut players = self.players.read_all()?;
        players.retain(|p| {
            if p.is_valid() {
                true
            } else {
                warn!("Dropping malformed player document: {:?}", p.id);
                false
            }
        });
        Ok(players)
    }

    pub fn get_player(&self, id: &EntityId) -> Result<Option<Player>, StorageError> {
        Ok(self.list_players()?.into_iter().find(|p| &p.id == id))
    }

    pub fn add_player(&self, player: &Player) -> Result<(), StorageError> {
        self.players.append(player)?;
        info!("Added player {} ({})", player.name, player.id);
        Ok(())
    }

    pub fn update_player(&self, updated: &Player) -> Result<(), StorageError> {
        let mut players = self.players.read_all()?;
        let Some(slot) = players.iter_mut().find(|p| p.id == updated.id) else {
            return Err(StorageError::NotFound {
                entity: "player",
                id: updated.id.to_string(),
            });
        };
        *slot = updated.clone();
        self.players.write_all(&players)?;
        Ok(())
    }

    /// Delete a player. Recorded scores keep the dangling reference.
    pub fn delete_player(&self, id: &EntityId) -> Result<(), StorageError> {
        let mut players = self.players.read_all()?;
        let before = players.len();
        players.retain(|p| &p.id != id);
        if players.len() == before {
            return Err(StorageError::NotFound {
                entity: "player",
                id: id.to_string(),
            });
        }
        self.players.write_all(&players)?;
        info!("Deleted player {}", id);
        Ok(())
    }

    // --- Scores ---

    /// All play records sorted date-descending; equal dates keep stored
    /// order. This is the ordering the stats engine assumes.
    pub fn list_scores(&self) -> Result<Vec<Score>, StorageError> {
        let mut scores = self.scores.read_all()?;
        scores.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(scores)
    }

    pub fn get_score(&self, id: &EntityId) -> Result<Option<Score>, StorageError> {
        Ok(self.scores.read_all()?.into_iter().find(|s| &s.id == id))
    }

    pub fn add_score(&self, score: &Score) -> Result<(), StorageError> {
        self.scores.append(score)?;
        info!(
            "Added score {} for {} on {}",
            score.id, score.game_name, score.date
        );
        Ok(())
    }

    pub fn update_score(&self, updated: &Score) -> Result<(), StorageError> {
        let mut scores = self.scores.read_all()?;
        let Some(slot) = scores.iter_mut().find(|s| s.id == updated.id) else {
            return Err(StorageError::NotFound {
                entity: "score",
                id: updated.id.to_string(),
            });
        };
        *slot = updated.clone();
        self.scores.write_all(&scores)?;
        Ok(())
    }

    pub fn delete_score(&self, id: &EntityId) -> Result<(), StorageError> {
        let mut scores = self.scores.read_all()?;
        let before = scores.len();
        scores.retain(|s| &s.id != id);
        if scores.len() == before {
            return Err(StorageError::NotFound {
                entity: "score",
                id: id.to_string(),
            });
        }
        self.scores.write_all(&scores)?;
        info!("Deleted score {}", id);
        Ok(())
    }

    /// Replace both collections wholesale (seed import).
    pub fn replace_all(&self, players: &[Player], scores: &[Score]) -> Result<(), StorageError> {
        self.players.write_all(players)?;
        self.scores.write_all(scores)?;
        info!(
            "Seeded store with {} players and {} scores",
            players.len(),
            scores.len()
        );
        Ok(())
    }

    /// Take a fresh immutable snapshot of both collections.
    pub fn snapshot(&self) -> Result<Snapshot, StorageError> {
        Ok(Snapshot {
            players: self.list_players()?,
            scores: self.list_scores()?,
        })
    }
}
