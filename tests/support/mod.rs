//! Shared fixtures for the tracker integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use deck_tracker::report::{
    Identity, Notice, Notifier, ReportingClient, ResultData, UploadAck, UploadRequest,
};
use deck_tracker::{
    AnalyticsError, AnalyticsSink, CardMultiset, Deck, DeckRepository, Entity, Game,
    HashMapDeckRepository, Player, Properties, RepositoryError, UploadError, Zone,
};
use tokio::sync::mpsc;

/// A match where player "1" (class `class_index`) holds `hand` and player
/// "2" plays class 5. Player 1 also holds the coin, which it did not start with.
pub fn opening_game(class_index: i32, hand: &[&str]) -> Game {
    let mut game = Game::new(Player::new("1", class_index), Player::new("2", 5)).with_entity(
        Entity::new("coin")
            .with_card_id("GAME_005")
            .with_tag(deck_tracker::KEY_CONTROLLER, "1")
            .with_tag(deck_tracker::KEY_ZONE, "HAND")
            .with_original_controller("2"),
    );
    for (index, card_id) in hand.iter().enumerate() {
        game = game.with_entity(Entity::card(format!("h{}", index), *card_id, "1", Zone::Hand));
    }
    game
}

/// Marks the game over and reveals extra cards played by player "1".
pub fn finish(mut game: Game, victory: bool, revealed: &[&str]) -> Game {
    for (index, card_id) in revealed.iter().enumerate() {
        game = game.with_entity(Entity::card(
            format!("r{}", index),
            *card_id,
            "1",
            Zone::Graveyard,
        ));
    }
    game.victory = victory;
    game
}

pub fn cards(entries: &[(&str, u32)]) -> CardMultiset {
    entries.iter().copied().collect()
}

/// Deck repository whose reads or writes can be made to fail.
#[derive(Clone, Default)]
pub struct FlakyRepository {
    pub inner: HashMapDeckRepository,
    fail_writes: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
}

impl FlakyRepository {
    pub fn new(inner: HashMapDeckRepository) -> Self {
        FlakyRepository {
            inner,
            fail_writes: Arc::new(AtomicBool::new(false)),
            fail_reads: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<(), RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(RepositoryError::Storage("disk unreadable".into()))
        } else {
            Ok(())
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(RepositoryError::Storage("disk full".into()))
        } else {
            Ok(())
        }
    }
}

impl DeckRepository for FlakyRepository {
    fn save(&self, deck: &Deck) -> Result<(), RepositoryError> {
        self.check()?;
        self.inner.save(deck)
    }

    fn save_arena(&self, deck: &Deck) -> Result<(), RepositoryError> {
        self.check()?;
        self.inner.save_arena(deck)
    }

    fn list_decks(&self, class_index: Option<i32>) -> Result<Vec<Deck>, RepositoryError> {
        self.check_read()?;
        self.inner.list_decks(class_index)
    }

    fn create_deck(&self, class_index: i32) -> Result<Deck, RepositoryError> {
        self.inner.create_deck(class_index)
    }

    fn arena_deck(&self) -> Result<Deck, RepositoryError> {
        self.inner.arena_deck()
    }

    fn opponent_deck(&self) -> Result<Deck, RepositoryError> {
        self.inner.opponent_deck()
    }
}

/// Reporting client that records every call.
pub struct RecordingClient {
    identity: Option<Identity>,
    results: mpsc::UnboundedSender<ResultData>,
    result_error: Option<UploadError>,
    upload_response: Result<UploadAck, UploadError>,
    pub uploads: Mutex<Vec<(UploadRequest, String)>>,
}

impl RecordingClient {
    pub fn new(identity: Option<&str>) -> (Self, mpsc::UnboundedReceiver<ResultData>) {
        let (results, rx) = mpsc::unbounded_channel();
        let client = RecordingClient {
            identity: identity.map(Identity::new),
            results,
            result_error: None,
            upload_response: Ok(UploadAck {
                url: "https://replays.example/r/1".into(),
            }),
            uploads: Mutex::new(Vec::new()),
        };
        (client, rx)
    }

    pub fn failing_results(mut self, error: UploadError) -> Self {
        self.result_error = Some(error);
        self
    }

    pub fn upload_response(mut self, response: Result<UploadAck, UploadError>) -> Self {
        self.upload_response = response;
        self
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ReportingClient for RecordingClient {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }

    async fn send_result(&self, result: ResultData) -> Result<(), UploadError> {
        let _ = self.results.send(result);
        match &self.result_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn upload_game(
        &self,
        request: UploadRequest,
        game_log: String,
    ) -> Result<UploadAck, UploadError> {
        self.uploads.lock().unwrap().push((request, game_log));
        self.upload_response.clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Analytics sink that always fails.
pub struct BrokenAnalytics;

impl AnalyticsSink for BrokenAnalytics {
    fn log_event(&self, _: &str, _: &Properties) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::Rejected("offline".into()))
    }
}
