use serde::{Deserialize, Serialize};

/// Glyph indices of `Count(0)..=Count(8)` in the sprite sheet.
const COUNT_GLYPHS: [u8; 9] = [8, 0, 1, 2, 3, 4, 5, 6, 7];

const FLAGGED_GLYPH: u8 = 9;
const QUESTION_MARK_GLYPH: u8 = 10;
const BOMB_GLYPH: u8 = 11;
const CURSOR_GLYPH: u8 = 12;
const EMPTY_GLYPH: u8 = 13;
const HIDDEN_GLYPH: u8 = 14;

/// Everything a board cell can show, both in the truth map and in what the player sees.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Outside the board.
    Empty,
    Hidden,
    Flagged,
    QuestionMark,
    Bomb,
    /// Number of bombs among the 8 neighbors, `0..=8`. Larger values draw as [`TileKind::Empty`].
    Count(u8),
    Cursor,
}

impl TileKind {
    pub const MAX_COUNT: u8 = 8;

    /// Sprite sheet index used to draw this tile.
    pub const fn glyph(self) -> u8 {
        use TileKind::*;
        match self {
            Count(n) if n <= Self::MAX_COUNT => COUNT_GLYPHS[n as usize],
            Count(_) | Empty => EMPTY_GLYPH,
            Hidden => HIDDEN_GLYPH,
            Flagged => FLAGGED_GLYPH,
            QuestionMark => QUESTION_MARK_GLYPH,
            Bomb => BOMB_GLYPH,
            Cursor => CURSOR_GLYPH,
        }
    }

    /// A safe cell with no bombs around it, the tiles a flood reveal spreads through.
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Count(0))
    }

    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb)
    }

    /// Hidden, flagged or question-marked: not yet cleared by the player.
    pub const fn is_uncleared(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::QuestionMark)
    }
}

impl Default for TileKind {
    fn default() -> Self {
        Self::Empty
    }
}
