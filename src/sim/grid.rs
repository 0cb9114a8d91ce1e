//! Toroidal board geometry
//!
//! Movement never leaves the board: anything that walks off one edge
//! re-enters on the opposite one.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Cell;

/// Fixed-size board with wraparound topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
}

impl Grid {
    pub fn new(cols: i32, rows: i32) -> Self {
        debug_assert!(cols > 0 && rows > 0, "grid must be non-empty");
        Self { cols, rows }
    }

    /// Map any integer coordinate onto the board
    #[inline]
    pub fn wrap(&self, cell: Cell) -> Cell {
        IVec2::new(cell.x.rem_euclid(self.cols), cell.y.rem_euclid(self.rows))
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.cols).contains(&cell.x) && (0..self.rows).contains(&cell.y)
    }

    /// Starting cell for a fresh snake
    pub fn center(&self) -> Cell {
        IVec2::new(self.cols / 2, self.rows / 2)
    }

    /// Uniformly random cell on the board
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        IVec2::new(rng.random_range(0..self.cols), rng.random_range(0..self.rows))
    }
}
