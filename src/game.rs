use alloc::vec::Vec;

use rand::Rng;

use crate::{
    common::{GameError, TileState},
    config::Difficulty,
    deck::{generate_deck, validate_deck, Tile},
};

/// Where a round currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No tile selected.
    Idle,
    /// One tile revealed, waiting for its partner.
    OneSelected,
    /// Two different tiles revealed; input is locked until they settle.
    MismatchLocked,
    /// Every pair has been matched.
    Complete,
}

/// Result of selecting a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Locked input, matched tile, or the tile already selected first.
    Ignored,
    FirstReveal { index: usize },
    Matched { pair: [usize; 2], finished: bool },
    Mismatch { pair: [usize; 2] },
}

/// Serializable view of a game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub difficulty: Difficulty,
    pub tiles: Vec<TileState>,
    pub moves: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub locked: bool,
    pub elapsed_seconds: u64,
}

/// Round state for one deck: selections, lock flag and counters.
///
/// Holds no timers. The settle delay after a mismatch is the caller's job;
/// it ends the lock with [`MemoryGame::settle`].
#[derive(Debug, Clone)]
pub struct MemoryGame {
    difficulty: Difficulty,
    tiles: Vec<Tile>,
    first: Option<usize>,
    second: Option<usize>,
    locked: bool,
    moves: u32,
    matched_pairs: usize,
}

impl MemoryGame {
    /// Start a round on a freshly shuffled deck.
    pub fn new<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        Self::from_deck(difficulty, generate_deck(difficulty, rng))
    }

    /// Start a round on a prepared deck. All tiles are turned face down.
    pub fn with_tiles(difficulty: Difficulty, mut tiles: Vec<Tile>) -> Result<Self, GameError> {
        validate_deck(difficulty, &tiles)?;
        for tile in tiles.iter_mut() {
            tile.state = TileState::FaceDown;
        }
        Ok(Self::from_deck(difficulty, tiles))
    }

    fn from_deck(difficulty: Difficulty, tiles: Vec<Tile>) -> Self {
        Self {
            difficulty,
            tiles,
            first: None,
            second: None,
            locked: false,
            moves: 0,
            matched_pairs: 0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs()
    }

    pub fn first_selected(&self) -> Option<usize> {
        self.first
    }

    /// The two revealed tiles while a mismatch is settling.
    pub fn pending_pair(&self) -> Option<[usize; 2]> {
        match (self.first, self.second) {
            (Some(a), Some(b)) => Some([a, b]),
            _ => None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_complete() {
            Phase::Complete
        } else if self.locked {
            Phase::MismatchLocked
        } else if self.first.is_some() {
            Phase::OneSelected
        } else {
            Phase::Idle
        }
    }

    /// Whether a click on `index` would do anything right now.
    pub fn is_selectable(&self, index: usize) -> bool {
        !self.locked
            && self.first != Some(index)
            && self.tiles.get(index).is_some_and(|t| !t.is_matched())
    }

    /// Reveal the tile at `index` and resolve the pair once two are up.
    pub fn select(&mut self, index: usize) -> Result<SelectOutcome, GameError> {
        if index >= self.tiles.len() {
            return Err(GameError::InvalidTile(index));
        }
        if !self.is_selectable(index) {
            return Ok(SelectOutcome::Ignored);
        }

        self.tiles[index].state = TileState::FaceUp;
        let Some(first) = self.first else {
            self.first = Some(index);
            return Ok(SelectOutcome::FirstReveal { index });
        };

        self.second = Some(index);
        self.moves += 1;
        Ok(self.resolve(first, index))
    }

    fn resolve(&mut self, first: usize, second: usize) -> SelectOutcome {
        let pair = [first, second];
        if self.tiles[first].symbol == self.tiles[second].symbol {
            self.tiles[first].state = TileState::Matched;
            self.tiles[second].state = TileState::Matched;
            self.first = None;
            self.second = None;
            self.matched_pairs += 1;
            SelectOutcome::Matched {
                pair,
                finished: self.is_complete(),
            }
        } else {
            self.locked = true;
            SelectOutcome::Mismatch { pair }
        }
    }

    /// Flip a settled mismatch back face down and unlock input.
    ///
    /// Returns `false` without touching anything unless `pair` is the pair
    /// currently pending.
    pub fn settle(&mut self, pair: [usize; 2]) -> bool {
        if !self.locked || self.pending_pair() != Some(pair) {
            return false;
        }
        for index in pair {
            self.tiles[index].state = TileState::FaceDown;
        }
        self.first = None;
        self.second = None;
        self.locked = false;
        true
    }

    pub fn snapshot(&self, elapsed_seconds: u64) -> GameSnapshot {
        GameSnapshot {
            difficulty: self.difficulty,
            tiles: self.tiles.iter().map(|t| t.state).collect(),
            moves: self.moves,
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs(),
            locked: self.locked,
            elapsed_seconds,
        }
    }
}
