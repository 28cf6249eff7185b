use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

bitflags! {
    /// Buttons held down during one sample.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Buttons: u8 {
        const UP    = 1;
        const DOWN  = 1 << 1;
        const LEFT  = 1 << 2;
        const RIGHT = 1 << 3;
        /// Primary action: reveal, or start over once the game ended.
        const A     = 1 << 4;
        /// Secondary action: flag.
        const B     = 1 << 5;
    }
}

/// Turns sampled button levels into release events.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EdgeDetector {
    previous: Buttons,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buttons that were down on the previous sample and are up now.
    pub fn released(&mut self, current: Buttons) -> Buttons {
        let released = self.previous - current;
        self.previous = current;
        if !released.is_empty() {
            log::trace!("released: {:?}", released);
        }
        released
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    /// Dispatch order within one tick.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Right, Self::Left];

    pub const fn button(self) -> Buttons {
        match self {
            Self::Up => Buttons::UP,
            Self::Down => Buttons::DOWN,
            Self::Right => Buttons::RIGHT,
            Self::Left => Buttons::LEFT,
        }
    }

    /// One cell over, staying put at the board edge.
    pub fn step(self, (x, y): Coord2, (size_x, size_y): Coord2) -> Coord2 {
        let max_x = size_x.saturating_sub(1);
        let max_y = size_y.saturating_sub(1);
        match self {
            Self::Up => (x, y.saturating_sub(1)),
            Self::Down => (x, y.saturating_add(1).min(max_y)),
            Self::Right => (x.saturating_add(1).min(max_x), y),
            Self::Left => (x.saturating_sub(1), y),
        }
    }
}
