#![cfg(feature = "std")]

use std::io::Write;

use crate::{
    common::TileState,
    config::Difficulty,
    deck::Tile,
    session::Event,
    surface::{CompletionSummary, DisplaySurface},
};

/// Draw the board as a grid. Face-down tiles show their 1-based number.
pub fn render_board(tiles: &[Tile], columns: usize) -> String {
    let mut out = String::new();
    let columns = columns.max(1);
    for (r, cells) in tiles.chunks(columns).enumerate() {
        out.push_str("   ");
        for (c, tile) in cells.iter().enumerate() {
            let number = r * columns + c + 1;
            let cell = match tile.state {
                TileState::FaceDown => format!("[{:>2}]", number),
                TileState::FaceUp => format!("[{}]", tile.symbol.glyph()),
                TileState::Matched => format!(" {} ", tile.symbol.glyph()),
            };
            out.push(' ');
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}

fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Map one line of terminal input to a session event.
pub fn parse_input(input: &str) -> Result<Event, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    match input.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Event::Quit),
        "r" | "restart" => return Ok(Event::Restart),
        other => {
            if let Ok(difficulty) = other.parse::<Difficulty>() {
                return Ok(Event::ChangeDifficulty(difficulty));
            }
        }
    }
    let number: usize = input.parse().map_err(|_| {
        format!(
            "Unknown command '{}' - enter a tile number, easy, hard, restart or quit",
            input
        )
    })?;
    if number == 0 {
        return Err("Tiles are numbered from 1".to_string());
    }
    Ok(Event::TileClicked(number - 1))
}

/// Surface that prints the board to a terminal.
///
/// Updates are buffered and the board is redrawn once per handled event.
/// Timer ticks alone do not trigger a redraw.
pub struct TerminalSurface<W: Write> {
    out: W,
    tiles: Vec<Tile>,
    difficulty: Difficulty,
    moves: u32,
    matched: usize,
    total: usize,
    elapsed_seconds: u64,
    best: String,
    message: Option<String>,
    dirty: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            tiles: Vec::new(),
            difficulty: Difficulty::default(),
            moves: 0,
            matched: 0,
            total: 0,
            elapsed_seconds: 0,
            best: String::new(),
            message: None,
            dirty: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self) -> std::io::Result<()> {
        let mut frame = String::new();
        frame.push_str(&format!(
            "\n  Memory ({})  moves {}  pairs {}/{}  time {}  best {}\n\n",
            self.difficulty,
            self.moves,
            self.matched,
            self.total,
            format_clock(self.elapsed_seconds),
            self.best
        ));
        frame.push_str(&render_board(&self.tiles, self.difficulty.columns()));
        if let Some(message) = &self.message {
            frame.push('\n');
            frame.push_str(message);
            frame.push('\n');
        }
        frame.push_str("\n> ");
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn render_tiles(&mut self, tiles: &[Tile], difficulty: Difficulty) {
        self.tiles = tiles.to_vec();
        self.difficulty = difficulty;
        self.dirty = true;
    }

    fn set_tile_state(&mut self, index: usize, state: TileState) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.state = state;
            self.dirty = true;
        }
    }

    fn set_move_count(&mut self, moves: u32) {
        self.moves = moves;
        self.dirty = true;
    }

    fn set_matched_count(&mut self, matched: usize, total: usize) {
        self.matched = matched;
        self.total = total;
        self.dirty = true;
    }

    fn set_elapsed_seconds(&mut self, seconds: u64) {
        self.elapsed_seconds = seconds;
    }

    fn set_best_score_text(&mut self, text: &str) {
        self.best = text.to_string();
        self.dirty = true;
    }

    fn show_completion_message(&mut self, summary: &CompletionSummary) {
        let mut message = format!(
            "  All pairs found in {} moves ({}).",
            summary.moves,
            format_clock(summary.elapsed_seconds)
        );
        if summary.new_best {
            message.push_str(" New best!");
        }
        message.push_str(" Type restart, easy or hard for another round.");
        self.message = Some(message);
        self.dirty = true;
    }

    fn clear_message(&mut self) {
        self.message = None;
        self.dirty = true;
    }

    fn flush(&mut self) {
        if self.dirty {
            self.dirty = false;
            if let Err(e) = self.draw() {
                log::warn!("failed to draw board: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::ordered_deck;

    #[test]
    fn parse_commands() {
        assert_eq!(parse_input("3"), Ok(Event::TileClicked(2)));
        assert_eq!(parse_input(" 12 \n"), Ok(Event::TileClicked(11)));
        assert_eq!(parse_input("Hard"), Ok(Event::ChangeDifficulty(Difficulty::Hard)));
        assert_eq!(parse_input("restart"), Ok(Event::Restart));
        assert_eq!(parse_input("q"), Ok(Event::Quit));
        assert!(parse_input("0").is_err());
        assert!(parse_input("").is_err());
        assert!(parse_input("flip").is_err());
    }

    #[test]
    fn board_shows_numbers_and_faces() {
        let mut tiles = ordered_deck(Difficulty::Easy);
        tiles[0].state = TileState::FaceUp;
        tiles[2].state = TileState::Matched;
        let board = render_board(&tiles, 4);
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains(&format!("[{}]", tiles[0].symbol.glyph())));
        assert!(lines[0].contains("[ 2]"));
        assert!(lines[0].contains(&format!(" {} ", tiles[2].symbol.glyph())));
        assert!(lines[2].contains("[12]"));
    }

    #[test]
    fn redraws_only_when_dirty() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.render_tiles(&ordered_deck(Difficulty::Easy), Difficulty::Easy);
        surface.flush();
        let first = surface.out.len();
        assert!(first > 0);

        surface.set_elapsed_seconds(5);
        surface.flush();
        assert_eq!(surface.out.len(), first);

        surface.set_move_count(1);
        surface.flush();
        let text = String::from_utf8(surface.into_inner()).unwrap();
        assert!(text.contains("moves 1"));
        assert!(text.contains("time 00:05"));
    }
}
