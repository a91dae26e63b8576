use core::str::FromStr;
use core::time::Duration;

use crate::common::GameError;

/// Symbol palette in fixed order. A deck for `n` pairs always uses the first `n`.
pub const SYMBOLS: [&str; 12] = [
    "🍎", "🍌", "🍇", "🍒", "🍋", "🍉", "🍓", "🍑", "🥥", "🥝", "🍊", "🍍",
];

/// How long a mismatched pair stays visible before flipping back.
pub const SETTLE_DELAY: Duration = Duration::from_millis(800);

/// Period of the elapsed-time counter.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Text shown when no best score is recorded for a difficulty.
pub const BEST_SCORE_PLACEHOLDER: &str = "--";

/// Board size selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Difficulty::Easy, Difficulty::Hard];

    /// Number of distinct symbols on the board.
    pub const fn pair_count(self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Hard => 12,
        }
    }

    pub const fn tile_count(self) -> usize {
        self.pair_count() * 2
    }

    /// Key under which the best score for this difficulty is stored.
    pub const fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }

    /// Tiles per row when the board is drawn as a grid.
    pub const fn columns(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Hard => 6,
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

impl core::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

/// Delays driving the scheduled callbacks of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub settle_delay: Duration,
    pub tick_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle_delay: SETTLE_DELAY,
            tick_interval: TICK_INTERVAL,
        }
    }
}

#[cfg(feature = "std")]
pub use settings::*;

#[cfg(feature = "std")]
mod settings {
    use std::env;
    use std::path::PathBuf;

    use super::Difficulty;

    /// Environment variable naming the best-score file.
    pub const SCORES_ENV: &str = "MEMORY_MATCH_SCORES";
    pub const DEFAULT_SCORES_FILE: &str = "memory_match_scores.bin";

    /// Runtime settings for the terminal front end.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Settings {
        pub scores_path: PathBuf,
        pub difficulty: Difficulty,
        pub seed: Option<u64>,
    }

    impl Settings {
        /// Settings taken from the environment, falling back to defaults.
        pub fn from_env() -> Self {
            let scores_path = env::var_os(SCORES_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_FILE));
            Self {
                scores_path,
                difficulty: Difficulty::default(),
                seed: None,
            }
        }
    }
}
