//! Read-only view over the entity graph produced by the log parser.

use std::collections::HashMap;

use crate::cards::{CardMultiset, CardPlay};

pub const KEY_ZONE: &str = "ZONE";
pub const KEY_CONTROLLER: &str = "CONTROLLER";
pub const KEY_PLAYER_ID: &str = "PlayerID";

/// Where an entity currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Hand,
    Deck,
    Play,
    Graveyard,
    Secret,
    SetAside,
    Removed,
    Unknown,
}

impl Zone {
    pub fn from_tag(value: &str) -> Self {
        match value {
            "HAND" => Zone::Hand,
            "DECK" => Zone::Deck,
            "PLAY" => Zone::Play,
            "GRAVEYARD" => Zone::Graveyard,
            "SECRET" => Zone::Secret,
            "SETASIDE" => Zone::SetAside,
            "REMOVEDFROMGAME" => Zone::Removed,
            _ => Zone::Unknown,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Zone::Hand => "HAND",
            Zone::Deck => "DECK",
            Zone::Play => "PLAY",
            Zone::Graveyard => "GRAVEYARD",
            Zone::Secret => "SECRET",
            Zone::SetAside => "SETASIDE",
            Zone::Removed => "REMOVEDFROMGAME",
            Zone::Unknown => "INVALID",
        }
    }
}

/// An in-match object (card, hero, player) with its tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entity {
    pub entity_id: String,
    pub card_id: Option<String>,
    pub tags: HashMap<String, String>,
    /// Controller when the entity entered the game. Differs from the
    /// `CONTROLLER` tag for cards that changed hands mid-match.
    pub original_controller: Option<String>,
}

impl Entity {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Entity {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }

    /// A card entity owned by `controller` since the start of the match.
    pub fn card(
        entity_id: impl Into<String>,
        card_id: impl Into<String>,
        controller: &str,
        zone: Zone,
    ) -> Self {
        Entity::new(entity_id)
            .with_card_id(card_id)
            .with_tag(KEY_CONTROLLER, controller)
            .with_tag(KEY_ZONE, zone.as_tag())
            .with_original_controller(controller)
    }

    pub fn with_card_id(mut self, card_id: impl Into<String>) -> Self {
        self.card_id = Some(card_id.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_original_controller(mut self, controller: impl Into<String>) -> Self {
        self.original_controller = Some(controller.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn zone(&self) -> Zone {
        self.tag(KEY_ZONE).map(Zone::from_tag).unwrap_or(Zone::Unknown)
    }

    pub fn controller(&self) -> Option<&str> {
        self.tag(KEY_CONTROLLER)
    }

    pub fn original_controller(&self) -> Option<&str> {
        self.original_controller.as_deref()
    }
}

/// One side of the match as reported by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    /// The player entity, carrying the `PlayerID` tag.
    pub entity: Option<Entity>,
    pub class_index: Option<i32>,
    pub has_coin: bool,
}

impl Player {
    pub fn new(player_id: &str, class_index: i32) -> Self {
        Player {
            entity: Some(
                Entity::new(format!("player-{}", player_id)).with_tag(KEY_PLAYER_ID, player_id),
            ),
            class_index: Some(class_index),
            has_coin: false,
        }
    }

    pub fn with_coin(mut self, has_coin: bool) -> Self {
        self.has_coin = has_coin;
        self
    }

    pub fn player_id(&self) -> Option<&str> {
        self.entity.as_ref().and_then(|entity| entity.tag(KEY_PLAYER_ID))
    }
}

/// The parser's live view of a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    pub player: Option<Player>,
    pub opponent: Option<Player>,
    pub entities: Vec<Entity>,
    pub plays: Vec<CardPlay>,
    pub victory: bool,
    pub spectator: bool,
}

impl Game {
    pub fn new(player: Player, opponent: Player) -> Self {
        Game {
            player: Some(player),
            opponent: Some(opponent),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_play(mut self, play: CardPlay) -> Self {
        self.plays.push(play);
        self
    }
}

/// Query surface over the entity graph.
pub trait EntityView {
    fn find<F>(&self, predicate: F) -> Vec<&Entity>
    where
        F: Fn(&Entity) -> bool;
}

impl EntityView for Game {
    fn find<F>(&self, predicate: F) -> Vec<&Entity>
    where
        F: Fn(&Entity) -> bool,
    {
        self.entities
            .iter()
            .filter(|entity| predicate(*entity))
            .collect()
    }
}

/// Counts card ids across entities, skipping entities with no known card.
pub fn card_map<'a, I>(entities: I) -> CardMultiset
where
    I: IntoIterator<Item = &'a Entity>,
{
    CardMultiset::from_ids(entities.into_iter().filter_map(|entity| entity.card_id.clone()))
}

/// Cards in the local player's hand that the player owned from the start.
/// Cards gained mid-match (the coin, stolen cards) are left out.
pub fn hand_snapshot<V>(view: &V, player_id: &str) -> CardMultiset
where
    V: EntityView + ?Sized,
{
    card_map(view.find(|entity| {
        entity.controller() == Some(player_id)
            && entity.zone() == Zone::Hand
            && entity.original_controller() == Some(player_id)
    }))
}

/// Every card the local player started the match with that has been revealed.
pub fn revealed_snapshot<V>(view: &V, player_id: &str) -> CardMultiset
where
    V: EntityView + ?Sized,
{
    card_map(view.find(|entity| entity.original_controller() == Some(player_id)))
}
