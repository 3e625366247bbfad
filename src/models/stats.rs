//! Derived statistics models.
//!
//! These are pure projections over the player and score collections. They
//! are recomputed from scratch on every aggregation and never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Player;

/// A single win/loss outcome in a player's form guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    W,
    L,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::W => write!(f, "W"),
            Outcome::L => write!(f, "L"),
        }
    }
}

/// Per-player performance statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// The player these stats describe
    pub player: Player,

    /// Number of recorded sessions the player appears in
    pub games_played: u32,

    /// Number of win credits (each winner of a tie earns a full credit)
    pub wins: u32,

    /// wins / games_played, or 0 for players with no games
    pub win_ratio: f64,

    /// Sum over the player's sessions of 1 / participant-count:
    /// the fair share of wins if every game were pure chance
    pub expected_wins: f64,

    /// Luck-adjusted win metric; 100 = winning exactly at the expected
    /// rate, >100 = over-performing. 0 when expected_wins is 0.
    pub performance_score: f64,

    /// Date of the most recent session, if any
    pub last_played: Option<NaiveDate>,

    /// Up to 10 most recent outcomes, most-recent-first
    pub form: Vec<Outcome>,
}

/// Per-game popularity statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    /// Integer game ID
    pub game_id: u32,

    /// Display name taken from the most recently played record
    pub game_name: String,

    /// Number of recorded sessions of this game
    pub times_played: u32,

    /// Date of the most recent session
    pub last_played: NaiveDate,

    /// Whole days elapsed since last_played, floored from the real-valued
    /// difference at the moment of computation (0 means "today")
    pub days_ago: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Outcome::W).unwrap(), "\"W\"");
        assert_eq!(serde_json::to_string(&Outcome::L).unwrap(), "\"L\"");
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(format!("{}{}", Outcome::W, Outcome::L), "WL");
    }

    #[test]
    fn test_player_stats_wire_shape() {
        let stats = PlayerStats {
            player: Player {
                id: "p1".into(),
                name: "Ann".to_string(),
                color: "#123".to_string(),
            },
            games_played: 2,
            wins: 1,
            win_ratio: 0.5,
            expected_wins: 0.75,
            performance_score: 133.33,
            last_played: NaiveDate::from_ymd_opt(2024, 1, 2),
            form: vec![Outcome::W, Outcome::L],
        };

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"gamesPlayed\":2"));
        assert!(json.contains("\"winRatio\":0.5"));
        assert!(json.contains("\"form\":[\"W\",\"L\"]"));
        assert!(json.contains("\"lastPlayed\":\"2024-01-02\""));
    }

    #[test]
    fn test_game_stats_wire_shape() {
        let stats = GameStats {
            game_id: 13,
            game_name: "Catan".to_string(),
            times_played: 4,
            last_played: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            days_ago: 7,
        };

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"gameId\":13"));
        assert!(json.contains("\"timesPlayed\":4"));
        assert!(json.contains("\"daysAgo\":7"));
    }
}
