use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::{CardPlay, Deck};
use crate::classifier::{GameplayMode, MatchCategory};
use crate::entity::Player;
use crate::error::TrackerError;

/// Where the controller is in the per-match cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player_id: String,
    pub class_index: i32,
    pub has_coin: bool,
}

impl PlayerSummary {
    /// Fails when the parser has not identified the player yet.
    pub fn from_player(player: Option<&Player>, side: &str) -> Result<Self, TrackerError> {
        let player =
            player.ok_or_else(|| TrackerError::invalid_match(format!("no {} entity", side)))?;
        let player_id = player
            .player_id()
            .ok_or_else(|| TrackerError::invalid_match(format!("no {} player id", side)))?;
        let class_index = player
            .class_index
            .ok_or_else(|| TrackerError::invalid_match(format!("no {} class", side)))?;

        Ok(PlayerSummary {
            player_id: player_id.to_string(),
            class_index,
            has_coin: player.has_coin,
        })
    }
}

/// The tracker's record of the current match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player: PlayerSummary,
    pub opponent: PlayerSummary,
    pub victory: bool,
    pub spectator: bool,
    /// Chronological, append-only.
    pub plays: Vec<CardPlay>,
    pub gameplay: GameplayMode,
    pub category: MatchCategory,
    pub started_at: DateTime<Utc>,
}

/// A finished match together with the deck it was played with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedMatch {
    pub record: MatchRecord,
    pub deck: Deck,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;

    #[test]
    fn player_summary_requires_player_id() {
        let player = Player {
            entity: Some(Entity::new("p")),
            class_index: Some(2),
            has_coin: false,
        };
        let err = PlayerSummary::from_player(Some(&player), "player").unwrap_err();
        assert_eq!(err.to_string(), "invalid match: no player player id");
    }

    #[test]
    fn player_summary_from_parser_player() {
        let player = Player::new("1", 4).with_coin(true);
        let summary = PlayerSummary::from_player(Some(&player), "player").unwrap();
        assert_eq!(
            summary,
            PlayerSummary {
                player_id: "1".into(),
                class_index: 4,
                has_coin: true
            }
        );
        assert!(PlayerSummary::from_player(None, "opponent").is_err());
    }
}
