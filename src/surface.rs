#![cfg(feature = "std")]

use crate::{common::TileState, config::Difficulty, deck::Tile};

/// Details handed to the surface when the last pair is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionSummary {
    pub difficulty: Difficulty,
    pub moves: u32,
    pub elapsed_seconds: u64,
    /// The result replaced (or set) the stored best score.
    pub new_best: bool,
}

/// Whatever draws the board. Tile clicks travel the other way, through a
/// [`SessionHandle`](crate::session::SessionHandle).
pub trait DisplaySurface {
    /// `false` when the widget markup is missing; the controller then stays inactive.
    fn mounted(&self) -> bool {
        true
    }

    fn render_tiles(&mut self, tiles: &[Tile], difficulty: Difficulty);
    fn set_tile_state(&mut self, index: usize, state: TileState);
    fn set_move_count(&mut self, moves: u32);
    fn set_matched_count(&mut self, matched: usize, total: usize);
    fn set_elapsed_seconds(&mut self, seconds: u64);
    fn set_best_score_text(&mut self, text: &str);
    fn show_completion_message(&mut self, summary: &CompletionSummary);
    fn clear_message(&mut self);

    /// Called once after each handled event, after all updates for it.
    fn flush(&mut self) {}
}

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    RenderTiles { count: usize, difficulty: Difficulty },
    TileState { index: usize, state: TileState },
    MoveCount(u32),
    MatchedCount { matched: usize, total: usize },
    ElapsedSeconds(u64),
    BestScoreText(String),
    Completion(CompletionSummary),
    ClearMessage,
}

/// Headless surface that keeps the latest view and a log of every call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub tiles: Vec<TileState>,
    pub moves: u32,
    pub matched: usize,
    pub elapsed_seconds: u64,
    pub best_score_text: String,
    pub completion: Option<CompletionSummary>,
    unmounted: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose markup is absent.
    pub fn unmounted() -> Self {
        Self {
            unmounted: true,
            ..Self::default()
        }
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl DisplaySurface for RecordingSurface {
    fn mounted(&self) -> bool {
        !self.unmounted
    }

    fn render_tiles(&mut self, tiles: &[Tile], difficulty: Difficulty) {
        self.tiles = tiles.iter().map(|t| t.state).collect();
        self.calls.push(SurfaceCall::RenderTiles {
            count: tiles.len(),
            difficulty,
        });
    }

    fn set_tile_state(&mut self, index: usize, state: TileState) {
        if let Some(slot) = self.tiles.get_mut(index) {
            *slot = state;
        }
        self.calls.push(SurfaceCall::TileState { index, state });
    }

    fn set_move_count(&mut self, moves: u32) {
        self.moves = moves;
        self.calls.push(SurfaceCall::MoveCount(moves));
    }

    fn set_matched_count(&mut self, matched: usize, total: usize) {
        self.matched = matched;
        self.calls.push(SurfaceCall::MatchedCount { matched, total });
    }

    fn set_elapsed_seconds(&mut self, seconds: u64) {
        self.elapsed_seconds = seconds;
        self.calls.push(SurfaceCall::ElapsedSeconds(seconds));
    }

    fn set_best_score_text(&mut self, text: &str) {
        self.best_score_text = text.to_string();
        self.calls.push(SurfaceCall::BestScoreText(text.to_string()));
    }

    fn show_completion_message(&mut self, summary: &CompletionSummary) {
        self.completion = Some(*summary);
        self.calls.push(SurfaceCall::Completion(*summary));
    }

    fn clear_message(&mut self) {
        self.completion = None;
        self.calls.push(SurfaceCall::ClearMessage);
    }
}
