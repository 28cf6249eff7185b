use std::io::{self, Write};

use badgesweep_core::{Frame, GameState, Renderer};

/// Text stand-ins for the tile sprites, indexed by glyph.
const SYMBOLS: [char; 15] = [
    '1', '2', '3', '4', '5', '6', '7', '8', '.', 'F', '?', '*', '@', ' ', '#',
];

const CLEAR: &str = "\x1b[2J\x1b[H";

/// Draws frames as text, one character per tile with the cursor in brackets.
pub(crate) struct TextRenderer<W> {
    out: W,
    clear: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, clear: false }
    }

    /// Wipe the terminal before every frame.
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = io::Error;

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let cursor = (
            frame.cursor.0.saturating_sub(frame.offset.0),
            frame.cursor.1.saturating_sub(frame.offset.1),
        );

        if self.clear {
            write!(self.out, "{CLEAR}")?;
        }
        for (y, row) in frame.tiles.rows().enumerate() {
            let mut line = String::new();
            for (x, tile) in row.enumerate() {
                let symbol = SYMBOLS[usize::from(tile.glyph())];
                if (x, y) == (usize::from(cursor.0), usize::from(cursor.1)) {
                    line.push('[');
                    line.push(symbol);
                    line.push(']');
                } else {
                    line.push(' ');
                    line.push(symbol);
                    line.push(' ');
                }
            }
            writeln!(self.out, "{}", line.trim_end())?;
        }

        write!(self.out, "Mines: {}", frame.mines_left)?;
        match frame.state {
            GameState::Playing => writeln!(self.out)?,
            GameState::Won => writeln!(self.out, "  You Win =D")?,
            GameState::Lost => writeln!(self.out, "  Game Over")?,
        }
        self.out.flush()
    }
}
