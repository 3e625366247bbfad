//! Player identity model.

use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId};

/// A member of the play group.
///
/// Identity is immutable once created; name and color may change.
/// Deleting a player never cascades into recorded scores; results that
/// reference the deleted ID simply stop matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier
    pub id: PlayerId,

    /// Display name (non-empty)
    pub name: String,

    /// Display color token (e.g. "#e63946")
    pub color: String,
}

impl Player {
    /// Create a new Player with auto-generated ID.
    pub fn new(name: String, color: String) -> Self {
        Self {
            id: EntityId::generate(),
            name,
            color,
        }
    }

    /// Whether this player passes the minimal document shape checks.
    pub fn is_valid(&self) -> bool {
        !self.id.as_str().is_empty() && !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new("Ann".to_string(), "#e63946".to_string());
        assert!(!player.id.as_str().is_empty());
        assert_eq!(player.name, "Ann");
        assert!(player.is_valid());
    }

    #[test]
    fn test_player_empty_name_invalid() {
        let player = Player::new("   ".to_string(), "#fff".to_string());
        assert!(!player.is_valid());
    }

    #[test]
    fn test_player_serialization() {
        let player = Player {
            id: "p1".into(),
            name: "Ann".to_string(),
            color: "#e63946".to_string(),
        };

        let json = serde_json::to_string(&player).unwrap();
        assert!(json.contains("\"id\":\"p1\""));

        let parsed: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, player);
    }

    #[test]
    fn test_player_unique_ids() {
        let a = Player::new("A".to_string(), "#111".to_string());
        let b = Player::new("B".to_string(), "#222".to_string());
        assert_ne!(a.id, b.id);
    }
}
