use alloc::collections::BTreeSet;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where the bombs are and what every safe cell counts. Fixed for the whole game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TruthMap {
    tiles: Array2<TileKind>,
    bomb_count: CellCount,
}

impl TruthMap {
    /// Places `config.bombs` distinct bombs by rejection sampling, then fills in the counts.
    pub fn generate<R: Rng>(config: &GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let (size_x, size_y) = config.size;
        let target = usize::from(config.bombs);
        let mut bombs = BTreeSet::new();
        let mut draws = 0u32;

        while bombs.len() < target {
            let coords = (rng.random_range(0..size_x), rng.random_range(0..size_y));
            draws += 1;
            if !bombs.insert(coords) {
                log::trace!("Bomb already at {:?}, drawing again", coords);
            }
        }
        log::debug!(
            "Placed {} bombs on {}x{} in {} draws",
            target,
            size_x,
            size_y,
            draws
        );

        let mut bomb_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for coords in bombs {
            bomb_mask[coords.to_nd_index()] = true;
        }
        Ok(Self::from_bomb_mask(bomb_mask))
    }

    /// Builds the map for a known bomb layout; repeated coordinates count once.
    pub fn from_bomb_coords(size: Coord2, bomb_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut bomb_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in bomb_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            bomb_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_bomb_mask(bomb_mask))
    }

    fn from_bomb_mask(bomb_mask: Array2<bool>) -> Self {
        let size = grid_size(&bomb_mask);
        let mut tiles = Array2::from_elem(size.to_nd_index(), TileKind::Count(0));
        let mut bomb_count: CellCount = 0;

        for coords in iter_coords(size) {
            tiles[coords.to_nd_index()] = if bomb_mask[coords.to_nd_index()] {
                bomb_count += 1;
                TileKind::Bomb
            } else {
                let adjacent = bomb_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| bomb_mask[pos.to_nd_index()])
                    .count();
                // at most 8 neighbors
                TileKind::Count(adjacent as u8)
            };
        }

        Self { tiles, bomb_count }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.tiles)
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    /// Bounds-checked lookup.
    pub fn get(&self, coords: Coord2) -> Option<TileKind> {
        self.tiles.get(coords.to_nd_index()).copied()
    }

    pub fn is_bomb(&self, coords: Coord2) -> bool {
        self[coords].is_bomb()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    pub fn bomb_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self.is_bomb(coords))
    }
}

impl Index<Coord2> for TruthMap {
    type Output = TileKind;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

/// The board as the player currently sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibleMap {
    tiles: Array2<TileKind>,
}

impl VisibleMap {
    /// Every cell hidden.
    pub fn new(size: Coord2) -> Self {
        Self {
            tiles: Array2::from_elem(size.to_nd_index(), TileKind::Hidden),
        }
    }

    /// An independent copy of the whole truth map.
    pub fn reveal_all(truth: &TruthMap) -> Self {
        Self {
            tiles: truth.tiles.clone(),
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.tiles)
    }

    /// Bounds-checked lookup.
    pub fn get(&self, coords: Coord2) -> Option<TileKind> {
        self.tiles.get(coords.to_nd_index()).copied()
    }

    /// Copies the truth value of one cell. Returns whether the cell changed.
    pub fn reveal_from(&mut self, truth: &TruthMap, coords: Coord2) -> bool {
        let revealed = truth[coords];
        let tile = &mut self[coords];
        if *tile == revealed {
            false
        } else {
            *tile = revealed;
            true
        }
    }

    pub fn count_where(&self, mut pred: impl FnMut(TileKind) -> bool) -> CellCount {
        let count = self.tiles.iter().filter(|&&tile| pred(tile)).count();
        CellCount::try_from(count).unwrap_or(CellCount::MAX)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_where(|tile| tile == TileKind::Flagged)
    }

    /// Every cell with its coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, TileKind)> + '_ {
        iter_coords(self.size()).map(|coords| (coords, self[coords]))
    }
}

impl Index<Coord2> for VisibleMap {
    type Output = TileKind;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for VisibleMap {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.tiles[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};

    #[test]
    fn counts_match_known_layout() {
        let truth = TruthMap::from_bomb_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(truth.bomb_count(), 2);
        assert_eq!(truth[(0, 0)], TileKind::Bomb);
        assert_eq!(truth[(1, 1)], TileKind::Count(2));
        assert_eq!(truth[(1, 0)], TileKind::Count(1));
        assert_eq!(truth[(2, 0)], TileKind::Count(0));
        assert_eq!(truth[(0, 2)], TileKind::Count(0));
    }

    #[test]
    fn surrounded_cell_counts_eight() {
        let bombs = [
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 1),
            (2, 1),
            (0, 2),
            (1, 2),
            (2, 2),
        ];
        let truth = TruthMap::from_bomb_coords((3, 3), &bombs).unwrap();
        assert_eq!(truth[(1, 1)], TileKind::Count(8));
    }

    #[test]
    fn duplicate_bomb_coords_collapse() {
        let truth = TruthMap::from_bomb_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(truth.bomb_count(), 1);
    }

    #[test]
    fn out_of_bounds_bomb_is_rejected() {
        assert_eq!(
            TruthMap::from_bomb_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn generate_places_exact_bomb_count() {
        let config = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let truth = TruthMap::generate(&config, &mut rng).unwrap();

        assert_eq!(truth.size(), (12, 10));
        assert_eq!(truth.bomb_count(), 12);
        assert_eq!(truth.bomb_coords().count(), 12);
    }

    #[test]
    fn generate_fills_all_but_one_cell() {
        let config = GameConfig::new((3, 2), 5).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let truth = TruthMap::generate(&config, &mut rng).unwrap();

        let safe: alloc::vec::Vec<_> = iter_coords(truth.size())
            .filter(|&coords| !truth.is_bomb(coords))
            .collect();
        assert_eq!(safe.len(), 1);
        assert_eq!(truth[safe[0]], TileKind::Count(truth.iter_neighbors(safe[0]).count() as u8));
    }

    #[test]
    fn generate_rejects_full_board() {
        let config = GameConfig::new_unchecked((2, 2), 4);
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(
            TruthMap::generate(&config, &mut rng),
            Err(GameError::TooManyBombs)
        );
    }

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::default();
        let a = TruthMap::generate(&config, &mut SmallRng::seed_from_u64(42)).unwrap();
        let b = TruthMap::generate(&config, &mut SmallRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reveal_all_is_independent_copy() {
        let truth = TruthMap::from_bomb_coords((2, 2), &[(0, 0)]).unwrap();
        let mut visible = VisibleMap::reveal_all(&truth);

        visible[(1, 1)] = TileKind::Flagged;

        assert_eq!(truth[(1, 1)], TileKind::Count(1));
        assert_eq!(visible[(0, 0)], TileKind::Bomb);
    }

    #[test]
    fn visible_get_is_bounds_checked() {
        let visible = VisibleMap::new((2, 3));
        assert_eq!(visible.get((1, 2)), Some(TileKind::Hidden));
        assert_eq!(visible.get((2, 0)), None);
        assert_eq!(visible.get((0, 3)), None);
    }

    #[test]
    #[should_panic]
    fn visible_index_out_of_bounds_panics() {
        let visible = VisibleMap::new((2, 2));
        let _ = visible[(2, 2)];
    }

    #[test]
    fn reveal_from_reports_change_once() {
        let truth = TruthMap::from_bomb_coords((2, 1), &[(0, 0)]).unwrap();
        let mut visible = VisibleMap::new(truth.size());

        assert!(visible.reveal_from(&truth, (1, 0)));
        assert!(!visible.reveal_from(&truth, (1, 0)));
        assert_eq!(visible[(1, 0)], TileKind::Count(1));
    }
}
