//! Common types for the memory game: tile faces and game errors.

/// Visible state of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TileState {
    FaceDown,
    FaceUp,
    /// Paired with its twin; stays revealed for the rest of the game.
    Matched,
}

/// Errors returned by game operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Tile index outside the current deck.
    InvalidTile(usize),
    /// A prepared deck does not hold exactly two copies of each palette symbol.
    MalformedDeck,
    /// Difficulty name not recognised.
    UnknownDifficulty,
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidTile(index) => write!(f, "Tile {} is not on the board", index),
            GameError::MalformedDeck => write!(f, "Deck must hold exactly two of each symbol"),
            GameError::UnknownDifficulty => write!(f, "Unknown difficulty (expected easy or hard)"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
