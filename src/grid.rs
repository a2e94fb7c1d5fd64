use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Values outside the board are representable so a head that has just left
/// the grid can be inspected before the move is rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one unit away in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Square playing field of `size × size` cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: u16,
}

impl Grid {
    /// Creates a grid, rejecting sizes that leave no room to move.
    pub fn new(size: u16) -> Result<Self, ConfigError> {
        if size < 2 {
            return Err(ConfigError::GridTooSmall(size));
        }

        Ok(Self { size })
    }

    /// Returns the side length in cells.
    #[must_use]
    pub fn size(self) -> u16 {
        self.size
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn cell_count(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    /// Returns true when the position lies inside the grid.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        let upper = i32::from(self.size);
        (0..upper).contains(&position.x) && (0..upper).contains(&position.y)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let upper = i32::from(self.size);
        (0..upper).flat_map(move |y| (0..upper).map(move |x| Position { x, y }))
    }
}
