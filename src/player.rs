use alloc::vec::Vec;

use rand::{rngs::SmallRng, seq::IteratorRandom};

use crate::{common::TileState, deck::Symbol, game::MemoryGame};

/// Interface implemented by automated players.
pub trait Player {
    /// Choose the next tile to click, or `None` while nothing can be clicked.
    fn select_tile(&mut self, rng: &mut SmallRng, game: &MemoryGame) -> Option<usize>;

    /// Look at the board after a click has been applied.
    fn observe(&mut self, _game: &MemoryGame) {}
}

fn clickable(game: &MemoryGame) -> impl Iterator<Item = usize> + '_ {
    (0..game.tiles().len()).filter(move |&i| game.is_selectable(i))
}

/// Clicks any selectable tile at random and remembers nothing.
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn select_tile(&mut self, rng: &mut SmallRng, game: &MemoryGame) -> Option<usize> {
        clickable(game).choose(rng)
    }
}

/// Remembers every symbol it has seen face up and never wastes a known pair.
///
/// Only reads symbols of tiles that are revealed, so it plays by the same
/// information a person at the board has.
pub struct RecallPlayer {
    seen: Vec<Option<Symbol>>,
}

impl RecallPlayer {
    pub fn new() -> Self {
        Self { seen: Vec::new() }
    }

    fn fit(&mut self, game: &MemoryGame) {
        if self.seen.len() != game.tiles().len() {
            self.seen = game.tiles().iter().map(|_| None).collect();
        }
    }

    fn remembered(&self, index: usize) -> Option<Symbol> {
        self.seen.get(index).copied().flatten()
    }

    fn known_partner(&self, game: &MemoryGame, index: usize, symbol: Symbol) -> Option<usize> {
        clickable(game).find(|&i| i != index && self.remembered(i) == Some(symbol))
    }

    fn known_pair(&self, game: &MemoryGame) -> Option<usize> {
        clickable(game).find(|&i| {
            self.remembered(i)
                .is_some_and(|symbol| self.known_partner(game, i, symbol).is_some())
        })
    }
}

impl Default for RecallPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RecallPlayer {
    fn select_tile(&mut self, rng: &mut SmallRng, game: &MemoryGame) -> Option<usize> {
        if game.is_locked() || game.is_complete() {
            return None;
        }
        self.fit(game);

        let unseen = |i: &usize| self.remembered(*i).is_none();
        match game.first_selected() {
            None => self
                .known_pair(game)
                .or_else(|| clickable(game).filter(unseen).choose(rng)),
            Some(first) => {
                let symbol = game.tiles()[first].symbol;
                self.known_partner(game, first, symbol)
                    .or_else(|| clickable(game).filter(unseen).choose(rng))
                    .or_else(|| clickable(game).choose(rng))
            }
        }
    }

    fn observe(&mut self, game: &MemoryGame) {
        self.fit(game);
        for (slot, tile) in self.seen.iter_mut().zip(game.tiles()) {
            if tile.state != TileState::FaceDown {
                *slot = Some(tile.symbol);
            }
        }
    }
}
