//! Match classification from the parser's mode and format signals.

use serde::{Deserialize, Serialize};

/// Screen the game client was on when the match was queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameplayMode {
    Draft,
    TavernBrawl,
    Adventure,
    Tournament,
    Friendly,
    #[default]
    Unknown,
}

impl From<&str> for GameplayMode {
    fn from(value: &str) -> Self {
        match value {
            "DRAFT" => GameplayMode::Draft,
            "TAVERN_BRAWL" => GameplayMode::TavernBrawl,
            "ADVENTURE" => GameplayMode::Adventure,
            "TOURNAMENT" => GameplayMode::Tournament,
            "FRIENDLY" => GameplayMode::Friendly,
            _ => GameplayMode::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Ranked,
    Casual,
    #[default]
    Unknown,
}

impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        match value {
            "RANKED" | "ranked" => Mode::Ranked,
            "CASUAL" | "casual" => Mode::Casual,
            _ => Mode::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Standard,
    Wild,
    #[default]
    Unknown,
}

impl From<&str> for Format {
    fn from(value: &str) -> Self {
        match value {
            "FT_STANDARD" | "STANDARD" | "standard" => Format::Standard,
            "FT_WILD" | "WILD" | "wild" => Format::Wild,
            _ => Format::Unknown,
        }
    }
}

/// Combined match category, carrying the numeric code upload services expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    #[default]
    Unknown,
    Friends,
    RankedStandard,
    Arena,
    VsAi,
    CasualStandard,
    TavernBrawlVsAi,
    RankedWild,
    CasualWild,
}

impl GameType {
    pub fn code(&self) -> i32 {
        match self {
            GameType::Unknown => 0,
            GameType::Friends => 1,
            GameType::RankedStandard => 2,
            GameType::Arena => 3,
            GameType::VsAi => 4,
            GameType::CasualStandard => 10,
            GameType::TavernBrawlVsAi => 17,
            GameType::RankedWild => 30,
            GameType::CasualWild => 31,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameType::Unknown => "BGT_UNKNOWN",
            GameType::Friends => "BGT_FRIENDS",
            GameType::RankedStandard => "BGT_RANKED_STANDARD",
            GameType::Arena => "BGT_ARENA",
            GameType::VsAi => "BGT_VS_AI",
            GameType::CasualStandard => "BGT_CASUAL_STANDARD_NORMAL",
            GameType::TavernBrawlVsAi => "BGT_TAVERNBRAWL_1P_VERSUS_AI",
            GameType::RankedWild => "BGT_RANKED_WILD",
            GameType::CasualWild => "BGT_CASUAL_WILD",
        }
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, GameType::RankedStandard | GameType::RankedWild)
    }

    /// Short mode label used by result summaries.
    pub fn mode_label(&self) -> &'static str {
        match self {
            GameType::RankedStandard | GameType::RankedWild => "ranked",
            GameType::CasualStandard | GameType::CasualWild => "casual",
            GameType::Arena => "arena",
            GameType::Friends => "friendly",
            _ => "unknown",
        }
    }
}

/// Signals the parser exposes about the upcoming match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSignals {
    pub gameplay: GameplayMode,
    pub mode: Mode,
    pub format: Format,
    /// Negative when unknown.
    pub rank: i32,
}

impl Default for ModeSignals {
    fn default() -> Self {
        ModeSignals {
            gameplay: GameplayMode::Unknown,
            mode: Mode::Unknown,
            format: Format::Unknown,
            rank: -1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCategory {
    pub game_type: GameType,
    pub rank: Option<u32>,
}

/// Maps the parser's signals to a match category. Draft and the special
/// solo modes win over the ranked/casual signal whatever the format.
pub fn classify(signals: &ModeSignals) -> MatchCategory {
    let game_type = match signals.gameplay {
        GameplayMode::Draft => GameType::Arena,
        GameplayMode::TavernBrawl => GameType::TavernBrawlVsAi,
        GameplayMode::Adventure => GameType::VsAi,
        GameplayMode::Friendly => GameType::Friends,
        GameplayMode::Tournament | GameplayMode::Unknown => match (signals.mode, signals.format) {
            (Mode::Ranked, Format::Standard) => GameType::RankedStandard,
            (Mode::Ranked, Format::Wild) => GameType::RankedWild,
            (Mode::Casual, Format::Standard) => GameType::CasualStandard,
            (Mode::Casual, Format::Wild) => GameType::CasualWild,
            _ => GameType::Unknown,
        },
    };

    let rank = if game_type.is_ranked() {
        u32::try_from(signals.rank).ok()
    } else {
        None
    };

    MatchCategory { game_type, rank }
}
