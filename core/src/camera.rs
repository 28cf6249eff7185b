use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Size of the on-screen window in tiles and how far the camera trails the cursor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub size: Coord2,
    /// Columns left of and rows above the cursor kept in view.
    pub lead: Coord2,
}

impl Viewport {
    pub const DEFAULT_SIZE: Coord2 = (10, 8);
    pub const DEFAULT_LEAD: Coord2 = (4, 3);

    pub fn new(size: Coord2, lead: Coord2) -> Result<Self> {
        let viewport = Self { size, lead };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            Err(GameError::EmptyViewport)
        } else {
            Ok(())
        }
    }

    /// Top-left board cell to show so the cursor sits roughly centered without scrolling past
    /// the board edge.
    pub fn top_left(&self, cursor: Coord2, board_size: Coord2) -> Coord2 {
        (
            axis_offset(cursor.0, self.lead.0, board_size.0, self.size.0),
            axis_offset(cursor.1, self.lead.1, board_size.1, self.size.1),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            lead: Self::DEFAULT_LEAD,
        }
    }
}

fn axis_offset(cursor: Coord, lead: Coord, board: Coord, view: Coord) -> Coord {
    let wanted = i16::from(cursor) - i16::from(lead);
    let furthest = i16::from(board) - i16::from(view);
    // a board narrower than the view pins the camera to 0
    wanted.min(furthest).max(0) as Coord
}

/// Copies the `size` window at `top_left` out of the visible map; cells past the board are
/// [`TileKind::Empty`].
pub fn project(visible: &VisibleMap, top_left: Coord2, size: Coord2) -> ViewportGrid {
    let mut tiles = Array2::from_elem(size.to_nd_index(), TileKind::Empty);
    for (i, j) in iter_coords(size) {
        let board_coords = top_left
            .0
            .checked_add(i)
            .zip(top_left.1.checked_add(j));
        if let Some(tile) = board_coords.and_then(|coords| visible.get(coords)) {
            tiles[(i, j).to_nd_index()] = tile;
        }
    }
    ViewportGrid { tiles }
}

/// Pixel position of the cursor sprite inside the viewport.
pub fn cursor_pixel(cursor: Coord2, offset: Coord2, tile_px: u16) -> (i32, i32) {
    let tile_px = i32::from(tile_px);
    (
        (i32::from(cursor.0) - i32::from(offset.0)) * tile_px,
        (i32::from(cursor.1) - i32::from(offset.1)) * tile_px,
    )
}

/// The tiles handed to the renderer, indexed by viewport column and row.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportGrid {
    tiles: Array2<TileKind>,
}

impl ViewportGrid {
    pub fn size(&self) -> Coord2 {
        grid_size(&self.tiles)
    }

    /// [`TileKind::Empty`] outside the viewport.
    pub fn get(&self, coords: Coord2) -> TileKind {
        self.tiles
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(TileKind::Empty)
    }

    pub fn glyph(&self, coords: Coord2) -> u8 {
        self.get(coords).glyph()
    }

    /// Rows from top to bottom, each from left to right.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = TileKind> + '_> + '_ {
        let (size_x, size_y) = self.size();
        (0..size_y).map(move |y| (0..size_x).map(move |x| self.get((x, y))))
    }
}
