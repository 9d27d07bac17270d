use serde::{Deserialize, Serialize};

use crate::cards::hero_name;
use crate::record::{FinishedMatch, MatchRecord};

/// One card play in a result summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub player: String,
    pub turn: u32,
    pub card_id: String,
}

/// Result summary sent at the end of a reported match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultData {
    pub coin: bool,
    pub win: bool,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    pub hero: String,
    pub opponent: String,
    pub added: String,
    pub card_history: Vec<HistoryEntry>,
}

impl ResultData {
    pub fn from_record(record: &MatchRecord, added: impl Into<String>) -> Self {
        ResultData {
            coin: record.player.has_coin,
            win: record.victory,
            mode: record.category.game_type.mode_label().to_string(),
            rank: record.category.rank,
            hero: hero_name(record.player.class_index).to_string(),
            opponent: hero_name(record.opponent.class_index).to_string(),
            added: added.into(),
            card_history: record
                .plays
                .iter()
                .map(|play| HistoryEntry {
                    player: play.side.label().to_string(),
                    turn: play.display_turn(),
                    card_id: play.card_id.clone(),
                })
                .collect(),
        }
    }
}

/// Locally retained record of a played match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub coin: bool,
    pub win: bool,
    pub hero: i32,
    pub opponent_hero: i32,
    pub date: String,
    pub deck_name: String,
    pub game_type: i32,
    #[serde(default)]
    pub replay_url: Option<String>,
}

impl GameSummary {
    pub fn from_finished(finished: &FinishedMatch, date: impl Into<String>) -> Self {
        let record = &finished.record;
        GameSummary {
            coin: record.player.has_coin,
            win: record.victory,
            hero: record.player.class_index,
            opponent_hero: record.opponent.class_index,
            date: date.into(),
            deck_name: finished.deck.name.clone(),
            game_type: record.category.game_type.code(),
            replay_url: None,
        }
    }
}
