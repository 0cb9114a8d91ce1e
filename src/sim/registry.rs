//! Entity registry: where everything on the board currently is

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::state::{Cell, Friend, Powerup};

/// Positions of every board entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entities {
    /// Snake segments, head first (never empty during play)
    pub snake: VecDeque<Cell>,
    pub food: Option<Cell>,
    pub obstacles: Vec<Cell>,
    pub powerups: Vec<Powerup>,
    /// Decorative markers left behind on each food pickup
    pub friends: Vec<Friend>,
}

impl Entities {
    /// Fresh registry with a one-segment snake at `start`
    pub fn with_snake_at(start: Cell) -> Self {
        Self {
            snake: VecDeque::from([start]),
            ..Default::default()
        }
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.front().copied()
    }

    pub fn tail(&self) -> Option<Cell> {
        self.snake.back().copied()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// True if the cell is on any segment after the head
    pub fn body_contains(&self, cell: Cell) -> bool {
        self.snake.iter().skip(1).any(|&s| s == cell)
    }

    pub fn obstacle_at(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// True if a new entity may not be placed on `cell`
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
            || self.obstacles.contains(&cell)
            || self.powerups.iter().any(|p| p.cell == cell)
            || self.food == Some(cell)
    }

    /// Remove and return every powerup sitting on `cell`
    pub fn take_powerups_at(&mut self, cell: Cell) -> Vec<Powerup> {
        let mut taken = Vec::new();
        self.powerups.retain(|p| {
            if p.cell == cell {
                taken.push(*p);
                false
            } else {
                true
            }
        });
        taken
    }

    /// Append copies of the tail cell; they separate as the snake moves on
    pub fn extend_tail(&mut self, segments: usize) {
        if let Some(tail) = self.tail() {
            self.snake.extend(std::iter::repeat_n(tail, segments));
        }
    }
}
