#![cfg(feature = "std")]

use rand::rngs::SmallRng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};

use crate::{
    common::TileState,
    config::{Difficulty, Timing, BEST_SCORE_PLACEHOLDER},
    game::{GameSnapshot, MemoryGame, SelectOutcome},
    session::Event,
    store::ScoreStore,
    surface::{CompletionSummary, DisplaySurface},
};

/// Text shown for a stored best score.
pub fn best_score_text(best: Option<u32>) -> String {
    match best {
        Some(moves) => format!("{} moves", moves),
        None => BEST_SCORE_PLACEHOLDER.to_string(),
    }
}

/// Owns one game session: the round state, both scheduled tasks and the two
/// collaborators.
///
/// Timer ticks and settle callbacks come back as [`Event`]s tagged with the
/// generation of the game that scheduled them. Starting a game aborts both
/// tasks and bumps the generation, so anything still queued from the
/// previous game is dropped on arrival.
pub struct GameController<D: DisplaySurface, S: ScoreStore> {
    surface: D,
    store: S,
    rng: SmallRng,
    timing: Timing,
    events: UnboundedSender<Event>,
    game: MemoryGame,
    generation: u64,
    elapsed_seconds: u64,
    ticker: Option<JoinHandle<()>>,
    settle: Option<JoinHandle<()>>,
}

impl<D: DisplaySurface, S: ScoreStore> GameController<D, S> {
    /// Create the controller and start a first game, or return `None` if the
    /// surface is not mounted. Must be called from within a tokio runtime.
    pub fn mount(
        surface: D,
        store: S,
        mut rng: SmallRng,
        difficulty: Difficulty,
        timing: Timing,
        events: UnboundedSender<Event>,
    ) -> Option<Self> {
        if !surface.mounted() {
            log::debug!("display surface not mounted, memory game inactive");
            return None;
        }
        let game = MemoryGame::new(difficulty, &mut rng);
        let mut controller = Self {
            surface,
            store,
            rng,
            timing,
            events,
            game,
            generation: 0,
            elapsed_seconds: 0,
            ticker: None,
            settle: None,
        };
        controller.begin();
        controller.surface.flush();
        Some(controller)
    }

    pub fn game(&self) -> &MemoryGame {
        &self.game
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Counter bumped by every game start; tags scheduled events.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the elapsed-time task is still scheduled.
    pub fn timer_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot(self.elapsed_seconds)
    }

    /// Throw away the current round and deal a fresh deck for `difficulty`.
    pub fn start_game(&mut self, difficulty: Difficulty) {
        self.game = MemoryGame::new(difficulty, &mut self.rng);
        self.begin();
    }

    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.start_game(difficulty);
    }

    pub fn restart(&mut self) {
        self.start_game(self.game.difficulty());
    }

    fn begin(&mut self) {
        self.cancel_settle();
        self.stop_timer();
        self.generation += 1;
        self.elapsed_seconds = 0;

        let difficulty = self.game.difficulty();
        self.surface.render_tiles(self.game.tiles(), difficulty);
        self.surface.set_move_count(0);
        self.surface.set_matched_count(0, self.game.total_pairs());
        self.surface.set_elapsed_seconds(0);
        self.surface.clear_message();
        self.show_best();
        self.start_timer();

        log::info!(
            "new {} game: {} tiles (game {})",
            difficulty,
            self.game.tiles().len(),
            self.generation
        );
    }

    /// Handle a click on the tile at `index`.
    pub fn select_tile(&mut self, index: usize) {
        let outcome = match self.game.select(index) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("rejected click: {}", e);
                return;
            }
        };

        match outcome {
            SelectOutcome::Ignored => {
                log::debug!("click on tile {} ignored", index);
            }
            SelectOutcome::FirstReveal { index } => {
                self.surface.set_tile_state(index, TileState::FaceUp);
            }
            SelectOutcome::Matched { pair, finished } => {
                for i in pair {
                    self.surface.set_tile_state(i, TileState::Matched);
                }
                self.surface.set_move_count(self.game.moves());
                self.surface
                    .set_matched_count(self.game.matched_pairs(), self.game.total_pairs());
                if finished {
                    self.complete();
                }
            }
            SelectOutcome::Mismatch { pair } => {
                self.surface.set_tile_state(pair[1], TileState::FaceUp);
                self.surface.set_move_count(self.game.moves());
                self.schedule_settle(pair);
            }
        }
    }

    /// Apply one event. Returns `false` for [`Event::Quit`].
    pub fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::TileClicked(index) => self.select_tile(index),
            Event::ChangeDifficulty(difficulty) => self.change_difficulty(difficulty),
            Event::Restart => self.restart(),
            Event::Tick { generation } => self.on_tick(generation),
            Event::Settle { generation, pair } => self.on_settle(generation, pair),
            Event::Quit => {
                self.cancel_settle();
                self.stop_timer();
                return false;
            }
        }
        self.surface.flush();
        true
    }

    fn on_tick(&mut self, generation: u64) {
        if generation != self.generation || self.ticker.is_none() {
            log::trace!("dropping stale tick from game {}", generation);
            return;
        }
        self.elapsed_seconds += 1;
        self.surface.set_elapsed_seconds(self.elapsed_seconds);
    }

    fn on_settle(&mut self, generation: u64, pair: [usize; 2]) {
        if generation != self.generation {
            log::trace!("dropping stale settle from game {}", generation);
            return;
        }
        self.settle = None;
        if self.game.settle(pair) {
            for i in pair {
                self.surface.set_tile_state(i, TileState::FaceDown);
            }
        }
    }

    fn complete(&mut self) {
        self.stop_timer();
        let new_best = self.record_result();
        let summary = CompletionSummary {
            difficulty: self.game.difficulty(),
            moves: self.game.moves(),
            elapsed_seconds: self.elapsed_seconds,
            new_best,
        };
        log::info!(
            "{} game complete in {} moves, {}s",
            summary.difficulty,
            summary.moves,
            summary.elapsed_seconds
        );
        self.surface.show_completion_message(&summary);
    }

    /// Store the move count if it beats the stored best. Returns whether it
    /// was stored.
    fn record_result(&mut self) -> bool {
        let key = self.game.difficulty().key();
        let moves = self.game.moves();
        if self.store.get(key).is_some_and(|best| moves >= best) {
            return false;
        }
        if let Err(e) = self.store.set(key, moves) {
            log::warn!("could not save best score for {}: {:#}", key, e);
            return false;
        }
        log::info!("new best for {}: {} moves", key, moves);
        self.show_best();
        true
    }

    fn show_best(&mut self) {
        let best = self.store.get(self.game.difficulty().key());
        self.surface.set_best_score_text(&best_score_text(best));
    }

    fn start_timer(&mut self) {
        let tx = self.events.clone();
        let generation = self.generation;
        let period = self.timing.tick_interval;
        self.ticker = Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                if tx.send(Event::Tick { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    fn stop_timer(&mut self) {
        if let Some(task) = self.ticker.take() {
            task.abort();
        }
    }

    fn schedule_settle(&mut self, pair: [usize; 2]) {
        self.cancel_settle();
        let tx = self.events.clone();
        let generation = self.generation;
        let delay = self.timing.settle_delay;
        self.settle = Some(tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(Event::Settle { generation, pair });
        }));
    }

    fn cancel_settle(&mut self) {
        if let Some(task) = self.settle.take() {
            task.abort();
        }
    }
}

impl<D: DisplaySurface, S: ScoreStore> Drop for GameController<D, S> {
    fn drop(&mut self) {
        self.cancel_settle();
        self.stop_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_score_placeholder() {
        assert_eq!(best_score_text(None), BEST_SCORE_PLACEHOLDER);
        assert_eq!(best_score_text(Some(9)), "9 moves");
    }
}
