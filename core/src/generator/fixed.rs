use alloc::vec::Vec;

use super::*;

/// Always lays out the same bombs, for scripted games and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    bombs: Vec<Coord2>,
}

impl FixedBoardGenerator {
    pub fn new(bombs: &[Coord2]) -> Self {
        Self {
            bombs: bombs.to_vec(),
        }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<TruthMap> {
        let truth = TruthMap::from_bomb_coords(config.size, &self.bombs)?;
        if truth.bomb_count() >= truth.total_cells() {
            return Err(GameError::TooManyBombs);
        }
        if truth.bomb_count() != config.bombs {
            log::warn!(
                "Fixed layout count mismatch, actual: {}, requested: {}",
                truth.bomb_count(),
                config.bombs
            );
        }
        Ok(truth)
    }
}
