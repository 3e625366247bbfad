//! Play record ("score") model.
//!
//! One logged play session of a game, with per-player results. Field names
//! serialize in camelCase so JSON exports from Firestore-style backends load
//! without rewriting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId, ScoreId};

/// An expansion used in a play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    pub id: u32,
    pub name: String,
}

/// One player's result within a play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    /// Weak reference to a Player; no referential integrity is enforced.
    pub player_id: PlayerId,

    /// Numeric score, or `None` when no score was recorded.
    /// The missing state is distinct from zero and must stay that way.
    pub score: Option<i32>,

    /// Whether this player won. Multi-winner ties are legal and each
    /// winner earns a full win credit.
    pub is_winner: bool,
}

/// A logged play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Unique identifier
    pub id: ScoreId,

    /// Calendar date of the session (no time component)
    pub date: NaiveDate,

    /// Integer ID of the played game (BoardGameGeek numbering)
    pub game_id: u32,

    /// Denormalized display name of the game; never re-derived from game_id
    pub game_name: String,

    /// Expansions in play, possibly empty
    #[serde(default)]
    pub expansions: Vec<Expansion>,

    /// Per-player results, in table order
    pub players: Vec<PlayerResult>,
}

impl Score {
    /// Create a new Score with auto-generated ID.
    pub fn new(
        date: NaiveDate,
        game_id: u32,
        game_name: String,
        players: Vec<PlayerResult>,
    ) -> Self {
        Self {
            id: EntityId::generate(),
            date,
            game_id,
            game_name,
            expansions: Vec::new(),
            players,
        }
    }

    /// Builder method to set expansions.
    pub fn with_expansions(mut self, expansions: Vec<Expansion>) -> Self {
        self.expansions = expansions;
        self
    }

    /// Whether at least one result is marked as a winner.
    pub fn has_winner(&self) -> bool {
        self.players.iter().any(|p| p.is_winner)
    }
}
