use alloc::vec::Vec;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    common::{GameError, TileState},
    config::{Difficulty, SYMBOLS},
};

/// Index into the fixed symbol palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
    /// Symbol at `index` in the palette, if the palette is that large.
    pub fn new(index: usize) -> Option<Self> {
        (index < SYMBOLS.len()).then(|| Symbol(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn glyph(self) -> &'static str {
        SYMBOLS[self.index()]
    }
}

/// A single card on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub symbol: Symbol,
    pub state: TileState,
}

impl Tile {
    pub const fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            state: TileState::FaceDown,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.state == TileState::Matched
    }
}

/// Unshuffled deck for `difficulty`: each of the first `pair_count` symbols
/// twice, in palette order.
pub fn ordered_deck(difficulty: Difficulty) -> Vec<Tile> {
    (0..difficulty.pair_count())
        .map(|i| Tile::new(Symbol(i as u8)))
        .flat_map(|tile| [tile, tile])
        .collect()
}

/// Freshly shuffled deck for `difficulty`.
///
/// `SliceRandom::shuffle` is an in-place Fisher-Yates pass, so every ordering
/// of the `2 * pair_count` tiles is equally likely for a uniform `rng`.
pub fn generate_deck<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Vec<Tile> {
    let mut tiles = ordered_deck(difficulty);
    tiles.shuffle(rng);
    tiles
}

/// Check that `tiles` is a valid deck for `difficulty`.
pub fn validate_deck(difficulty: Difficulty, tiles: &[Tile]) -> Result<(), GameError> {
    if tiles.len() != difficulty.tile_count() {
        return Err(GameError::MalformedDeck);
    }
    let mut counts = [0u8; SYMBOLS.len()];
    for tile in tiles {
        let slot = counts
            .get_mut(tile.symbol.index())
            .filter(|_| tile.symbol.index() < difficulty.pair_count())
            .ok_or(GameError::MalformedDeck)?;
        *slot += 1;
    }
    if counts[..difficulty.pair_count()].iter().all(|&c| c == 2) {
        Ok(())
    } else {
        Err(GameError::MalformedDeck)
    }
}
