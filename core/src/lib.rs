#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use camera::*;
pub use driver::*;
pub use error::*;
pub use evaluator::*;
pub use generator::*;
pub use input::*;
pub use reveal::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod board;
mod camera;
mod driver;
mod error;
mod evaluator;
mod generator;
mod input;
mod reveal;
mod session;
mod tile;
mod types;

/// Board shape and rules of one game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: Coord2,
    pub bombs: CellCount,
    /// Cursor position at game start and after every restart.
    pub start: Coord2,
    /// Let the secondary button cycle flag -> question mark -> hidden.
    pub question_marks: bool,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord2 = (12, 10);
    pub const DEFAULT_BOMBS: CellCount = 12;
    pub const DEFAULT_START: Coord2 = (4, 3);

    pub const fn new_unchecked(size: Coord2, bombs: CellCount) -> Self {
        Self {
            size,
            bombs,
            start: Self::DEFAULT_START,
            question_marks: false,
        }
    }

    pub fn new(size: Coord2, bombs: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, bombs);
        config.validate()?;
        Ok(config)
    }

    pub const fn with_start(mut self, start: Coord2) -> Self {
        self.start = start;
        self
    }

    pub const fn with_question_marks(mut self, enabled: bool) -> Self {
        self.question_marks = enabled;
        self
    }

    /// Rejects boards that could never finish generating.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.bombs >= self.total_cells() {
            return Err(GameError::TooManyBombs);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.bombs)
    }

    /// The configured start clamped onto the board.
    pub fn start_cursor(&self) -> Coord2 {
        (
            self.start.0.min(self.size.0.saturating_sub(1)),
            self.start.1.min(self.size.1.saturating_sub(1)),
        )
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, Self::DEFAULT_BOMBS)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed(TileKind),
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed(_) => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    /// Number of cells uncovered.
    Revealed(CellCount),
    HitBomb,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed(_) => true,
            HitBomb => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_device() {
        let config = GameConfig::default();
        assert_eq!(config.size, (12, 10));
        assert_eq!(config.bombs, 12);
        assert_eq!(config.start, (4, 3));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn bombs_must_leave_a_safe_cell() {
        assert_eq!(GameConfig::new((3, 3), 9), Err(GameError::TooManyBombs));
        assert_eq!(GameConfig::new((3, 3), 10), Err(GameError::TooManyBombs));
        assert!(GameConfig::new((3, 3), 8).is_ok());
        assert!(GameConfig::new((3, 3), 0).is_ok());
    }

    #[test]
    fn zero_sized_board_is_rejected() {
        assert_eq!(GameConfig::new((0, 5), 0), Err(GameError::EmptyBoard));
        assert_eq!(GameConfig::new((5, 0), 0), Err(GameError::EmptyBoard));
    }

    #[test]
    fn start_cursor_is_clamped_onto_board() {
        let config = GameConfig::new((3, 3), 0).unwrap();
        assert_eq!(config.start_cursor(), (2, 2));
        assert_eq!(config.with_start((1, 0)).start_cursor(), (1, 0));
    }
}
