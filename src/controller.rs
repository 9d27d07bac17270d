//! Per-match state machine driven by the log parser.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::analytics::{AnalyticsSink, Properties};
use crate::cards::{Deck, OPPONENT_DECK_ID};
use crate::classifier::{classify, GameplayMode, ModeSignals};
use crate::clock::{iso8601, Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::enricher::enrich;
use crate::entity::{hand_snapshot, revealed_snapshot, Game};
use crate::error::TrackerError;
use crate::listener::GameListener;
use crate::record::{FinishedMatch, LifecycleState, MatchRecord, PlayerSummary};
use crate::report::{LogNotifier, Notice, Notifier, ReportingClient, ResultData};
use crate::repository::{CounterStore, DeckRepository};
use crate::selector::{DeckSelector, Selection, SelectionReason};
use crate::shared::SharedDeck;

/// What a lifecycle event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Started {
        deck_id: String,
        reason: SelectionReason,
    },
    Finished {
        deck_id: String,
        victory: bool,
    },
    /// Duplicate or out-of-order event; nothing changed.
    Ignored,
}

/// Tracks one match at a time: picks the deck at start, updates and stores
/// it at the end, and hands results to the reporting services.
///
/// Transitions run synchronously on the caller's thread. Network work is
/// spawned on the configured runtime and never awaited here.
pub struct GameLifecycleController {
    config: TrackerConfig,
    repo: Arc<dyn DeckRepository>,
    counters: Option<Arc<dyn CounterStore>>,
    reporting: Option<Arc<dyn ReportingClient>>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    runtime: Option<Handle>,
    player_deck: SharedDeck,
    opponent_deck: SharedDeck,
    signals: ModeSignals,
    state: LifecycleState,
    current: Option<MatchRecord>,
    /// Decks whose last save failed, keyed by id. Written again at every
    /// save point until the repository accepts them.
    unsaved: HashMap<String, Deck>,
    finished: watch::Sender<Option<FinishedMatch>>,
}

impl GameLifecycleController {
    pub fn new(config: TrackerConfig, repo: Arc<dyn DeckRepository>) -> Self {
        let (finished, _) = watch::channel(None);
        GameLifecycleController {
            config,
            repo,
            counters: None,
            reporting: None,
            analytics: None,
            notifier: Arc::new(LogNotifier),
            clock: Arc::new(SystemClock),
            runtime: None,
            player_deck: SharedDeck::new(Deck::new("default", -1).with_name("Default")),
            opponent_deck: SharedDeck::new(Deck::new(OPPONENT_DECK_ID, -1)),
            signals: ModeSignals::default(),
            state: LifecycleState::Idle,
            current: None,
            unsaved: HashMap::new(),
            finished,
        }
    }

    pub fn with_active_deck(mut self, deck: Deck) -> Self {
        self.player_deck = SharedDeck::new(deck);
        self
    }

    pub fn with_counters(mut self, counters: Arc<dyn CounterStore>) -> Self {
        self.counters = Some(counters);
        self
    }

    pub fn with_reporting(mut self, client: Arc<dyn ReportingClient>) -> Self {
        self.reporting = Some(client);
        self
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Runtime used for background uploads. Without one, result summaries
    /// are dropped with a warning.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn current_match(&self) -> Option<&MatchRecord> {
        self.current.as_ref()
    }

    /// Handle to the player's deck as shown to the UI.
    pub fn player_deck(&self) -> SharedDeck {
        self.player_deck.clone()
    }

    pub fn opponent_deck(&self) -> SharedDeck {
        self.opponent_deck.clone()
    }

    /// Latest mode/format/rank signals from the parser; read at match start.
    pub fn update_mode_signals(&mut self, signals: ModeSignals) {
        self.signals = signals;
    }

    /// The last finished match, until the next one starts.
    pub fn finished_match(&self) -> Option<FinishedMatch> {
        self.finished.borrow().clone()
    }

    /// Receives the finished match when `match_ended` lands and `None` when
    /// a new match starts.
    pub fn subscribe_finished(&self) -> watch::Receiver<Option<FinishedMatch>> {
        self.finished.subscribe()
    }

    pub fn match_started(&mut self, game: &Game) -> Result<Transition, TrackerError> {
        let player = PlayerSummary::from_player(game.player.as_ref(), "player")?;
        let opponent = PlayerSummary::from_player(game.opponent.as_ref(), "opponent")?;

        let observed = hand_snapshot(game, &player.player_id);
        let active = self.player_deck.snapshot()?;
        let gameplay = self.signals.gameplay;

        // The repository must hold the latest copy of every deck before
        // selection reads from it.
        self.flush_unsaved();

        let mut selection = DeckSelector::new(self.repo.as_ref(), &self.config)
            .select(&active, player.class_index, gameplay, &observed)
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "deck selection failed, keeping active deck");
                Selection {
                    deck: (*active).clone(),
                    reason: SelectionReason::Fallback,
                }
            });
        if let Some(pending) = self.unsaved.get(&selection.deck.id) {
            selection.deck = pending.clone();
        }

        tracing::info!(
            class = player.class_index,
            deck = %selection.deck.id,
            reason = ?selection.reason,
            ?gameplay,
            "game started"
        );

        let deck_id = selection.deck.id.clone();
        self.player_deck.publish(selection.deck)?;
        self.reset_opponent_deck(opponent.class_index);

        self.current = Some(MatchRecord {
            category: classify(&self.signals),
            player,
            opponent,
            victory: false,
            spectator: game.spectator,
            plays: game.plays.clone(),
            gameplay,
            started_at: self.clock.now(),
        });
        self.state = LifecycleState::Running;
        self.finished.send_replace(None);

        Ok(Transition::Started {
            deck_id,
            reason: selection.reason,
        })
    }

    pub fn match_ended(&mut self, game: &Game) -> Result<Transition, TrackerError> {
        match self.state {
            LifecycleState::Finished => {
                tracing::debug!("game already finished, ignoring game over");
                return Ok(Transition::Ignored);
            }
            LifecycleState::Idle => {
                tracing::debug!("no game in progress, ignoring game over");
                return Ok(Transition::Ignored);
            }
            LifecycleState::Running => {}
        }

        let mut deck = (*self.player_deck.snapshot()?).clone();
        let Some(mut record) = self.current.take() else {
            return Ok(Transition::Ignored);
        };

        record.victory = game.victory;
        record.spectator = game.spectator;
        record.plays = game.plays.clone();
        if let Some(player) = game.player.as_ref() {
            record.player.has_coin = player.has_coin;
        }

        if self.config.auto_add_cards {
            let revealed = revealed_snapshot(game, &record.player.player_id);
            let raises = enrich(&mut deck, &revealed, self.config.max_deck_cards);
            if !raises.is_empty() {
                self.persist(&deck);
            }
        }

        deck.record_result(record.victory);
        if let Err(err) = self.player_deck.publish(deck.clone()) {
            tracing::warn!(error = %err, "failed to publish player deck");
        }
        self.persist(&deck);
        self.increment_counters(&deck, record.victory);

        tracing::info!(
            outcome = if record.victory { "victory" } else { "lost" },
            gameplay = ?record.gameplay,
            identity = self.has_identity(),
            "game over"
        );

        self.submit_result(&record);
        self.log_game_ended(&record);

        let finished = FinishedMatch {
            record: record.clone(),
            deck,
            finished_at: self.clock.now(),
        };
        let transition = Transition::Finished {
            deck_id: finished.deck.id.clone(),
            victory: record.victory,
        };

        self.current = Some(record);
        self.state = LifecycleState::Finished;
        self.finished.send_replace(Some(finished));

        Ok(transition)
    }

    fn reset_opponent_deck(&self, class_index: i32) {
        let mut deck = self.repo.opponent_deck().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load opponent deck");
            Deck::new(OPPONENT_DECK_ID, class_index)
        });
        deck.reset(class_index);
        if let Err(err) = self.opponent_deck.publish(deck) {
            tracing::warn!(error = %err, "failed to publish opponent deck");
        }
    }

    /// Saves `deck` along with any deck an earlier save point failed to write.
    fn persist(&mut self, deck: &Deck) {
        self.unsaved.insert(deck.id.clone(), deck.clone());
        self.flush_unsaved();
    }

    fn flush_unsaved(&mut self) {
        let repo = &self.repo;
        self.unsaved.retain(|id, deck| {
            let saved = if deck.is_arena() {
                repo.save_arena(deck)
            } else {
                repo.save(deck)
            };
            match saved {
                Ok(()) => false,
                Err(err) => {
                    tracing::warn!(deck = %id, error = %err, "failed to save deck");
                    true
                }
            }
        });
    }

    fn increment_counters(&self, deck: &Deck, victory: bool) {
        let Some(counters) = &self.counters else {
            return;
        };
        let (wins, losses) = if victory { (1, 0) } else { (0, 1) };
        if let Err(err) = counters.increment(&deck.id, wins, losses) {
            tracing::warn!(deck = %deck.id, error = %err, "failed to increment deck counters");
        }
    }

    fn has_identity(&self) -> bool {
        self.reporting
            .as_ref()
            .map_or(false, |client| client.current_identity().is_some())
    }

    fn should_report(&self, record: &MatchRecord) -> bool {
        self.config.debug_reporting
            || matches!(record.gameplay, GameplayMode::Draft | GameplayMode::Tournament)
    }

    fn submit_result(&self, record: &MatchRecord) {
        let Some(client) = &self.reporting else {
            return;
        };
        if !self.should_report(record) || client.current_identity().is_none() {
            return;
        }
        let Some(runtime) = &self.runtime else {
            tracing::warn!("no runtime for result upload, dropping result");
            return;
        };

        let result = ResultData::from_record(record, iso8601(self.clock.now()));
        let client = Arc::clone(client);
        let notifier = Arc::clone(&self.notifier);
        runtime.spawn(async move {
            if let Err(err) = client.send_result(result).await {
                tracing::warn!(error = %err, "result upload failed");
                notifier.notify(Notice::ResultFailed {
                    reason: err.to_string(),
                });
            }
        });
    }

    fn log_game_ended(&self, record: &MatchRecord) {
        let Some(analytics) = &self.analytics else {
            return;
        };
        let mut properties = Properties::new();
        properties.insert(
            "bnet_game_type".to_string(),
            record.category.game_type.name().to_string(),
        );
        if let Err(err) = analytics.log_event("game_ended", &properties) {
            tracing::warn!(error = %err, "failed to log game_ended");
        }
    }
}

impl GameListener for GameLifecycleController {
    fn game_started(&mut self, game: &Game) {
        if let Err(err) = self.match_started(game) {
            tracing::warn!(error = %err, "game start rejected");
        }
    }

    fn game_over(&mut self, game: &Game) {
        if let Err(err) = self.match_ended(game) {
            tracing::warn!(error = %err, "game over rejected");
        }
    }

    fn something_changed(&mut self) {}
}
