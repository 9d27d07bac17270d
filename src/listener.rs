use crate::entity::Game;

/// Lifecycle hooks the log parser invokes synchronously on its own thread.
pub trait GameListener {
    fn game_started(&mut self, game: &Game);

    fn game_over(&mut self, game: &Game);

    fn something_changed(&mut self) {}
}
