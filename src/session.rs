#![cfg(feature = "std")]

use rand::rngs::SmallRng;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    config::{Difficulty, Timing},
    controller::GameController,
    game::GameSnapshot,
    store::ScoreStore,
    surface::DisplaySurface,
};

/// Everything that can happen to a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    TileClicked(usize),
    ChangeDifficulty(Difficulty),
    Restart,
    Quit,
    /// One period of the elapsed-time counter, tagged with the game it belongs to.
    Tick { generation: u64 },
    /// The settle delay for `pair` ran out.
    Settle { generation: u64, pair: [usize; 2] },
}

/// Surface-side sender for user input. Cheap to clone, usable from any thread.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: UnboundedSender<Event>,
}

impl SessionHandle {
    /// Queue any event, typically one produced by [`parse_input`](crate::parse_input).
    pub fn send(&self, event: Event) -> anyhow::Result<()> {
        self.tx
            .send(event)
            .map_err(|_| anyhow::anyhow!("game session has ended"))
    }

    pub fn click(&self, index: usize) -> anyhow::Result<()> {
        self.send(Event::TileClicked(index))
    }

    pub fn change_difficulty(&self, difficulty: Difficulty) -> anyhow::Result<()> {
        self.send(Event::ChangeDifficulty(difficulty))
    }

    pub fn restart(&self) -> anyhow::Result<()> {
        self.send(Event::Restart)
    }

    pub fn quit(&self) -> anyhow::Result<()> {
        self.send(Event::Quit)
    }
}

/// A controller plus the queue feeding it. All state changes happen on the
/// task that drives the session.
pub struct Session<D: DisplaySurface, S: ScoreStore> {
    controller: GameController<D, S>,
    rx: UnboundedReceiver<Event>,
}

impl<D: DisplaySurface, S: ScoreStore> Session<D, S> {
    /// Mount a game on `surface` and start it. Returns `None` when the surface
    /// is not mounted. Must be called from within a tokio runtime.
    pub fn mount(
        surface: D,
        store: S,
        rng: SmallRng,
        difficulty: Difficulty,
    ) -> Option<(Self, SessionHandle)> {
        Self::mount_with_timing(surface, store, rng, difficulty, Timing::default())
    }

    pub fn mount_with_timing(
        surface: D,
        store: S,
        rng: SmallRng,
        difficulty: Difficulty,
        timing: Timing,
    ) -> Option<(Self, SessionHandle)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller =
            GameController::mount(surface, store, rng, difficulty, timing, tx.clone())?;
        Some((Self { controller, rx }, SessionHandle { tx }))
    }

    pub fn controller(&self) -> &GameController<D, S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GameController<D, S> {
        &mut self.controller
    }

    /// Wait for the next queued event.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Apply one event. Returns `false` once the session should stop.
    pub fn dispatch(&mut self, event: Event) -> bool {
        self.controller.handle(event)
    }

    /// Wait for one event and apply it.
    pub async fn step(&mut self) -> bool {
        match self.next_event().await {
            Some(event) => self.dispatch(event),
            None => false,
        }
    }

    /// Apply every event already queued without waiting for new ones.
    pub fn drain(&mut self) -> bool {
        while let Ok(event) = self.rx.try_recv() {
            if !self.dispatch(event) {
                return false;
            }
        }
        true
    }

    /// Drive the game until a [`Event::Quit`] arrives.
    pub async fn run(mut self) -> anyhow::Result<GameSnapshot> {
        while self.step().await {}
        log::info!("session closed");
        Ok(self.controller.snapshot())
    }
}
