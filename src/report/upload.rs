use serde::{Deserialize, Serialize};

use crate::record::FinishedMatch;

/// Per-seat metadata in a replay upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPlayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    /// One entry per card copy.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deck: Vec<String>,
}

/// Metadata sent along with a replay log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub match_start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    pub spectator_mode: bool,
    pub friendly_player: String,
    pub game_type: i32,
    #[serde(default)]
    pub player1: UploadPlayer,
    #[serde(default)]
    pub player2: UploadPlayer,
}

impl UploadRequest {
    /// Rank and deck list go to the seat the local player occupied.
    pub fn from_finished(
        finished: &FinishedMatch,
        match_start: impl Into<String>,
        build: Option<String>,
    ) -> Self {
        let record = &finished.record;
        let friendly = UploadPlayer {
            rank: record.category.rank.filter(|rank| *rank > 0),
            deck: finished.deck.cards.expand(),
        };

        let (player1, player2) = if record.player.player_id == "1" {
            (friendly, UploadPlayer::default())
        } else {
            (UploadPlayer::default(), friendly)
        };

        UploadRequest {
            match_start: match_start.into(),
            build,
            spectator_mode: record.spectator,
            friendly_player: record.player.player_id.clone(),
            game_type: record.category.game_type.code(),
            player1,
            player2,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Successful upload response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadAck {
    /// Where the uploaded replay can be viewed.
    pub url: String,
}
