//! Demo-mode steering
//!
//! Picks a neighbouring cell that will not end the run, preferring the one
//! closest to the food on the wrapped board.

use super::state::{Cell, Direction, GameState};

/// Wrapped Manhattan distance between two cells
fn torus_distance(a: Cell, b: Cell, cols: i32, rows: i32) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    dx.min(cols - dx) + dy.min(rows - dy)
}

/// Choose the next direction for an unattended snake
pub fn choose_direction(state: &GameState) -> Direction {
    let Some(head) = state.entities.head() else {
        return state.direction;
    };
    let target = state.entities.food.or_else(|| state.entities.powerups.first().map(|p| p.cell));

    let mut best: Option<(Direction, i32)> = None;
    for dir in Direction::ALL {
        if dir.is_opposite(state.direction) {
            continue;
        }
        let next = state.grid.wrap(head + dir.vector());
        if state.entities.body_contains(next) || state.entities.obstacle_at(next) {
            continue;
        }
        let score = target
            .map(|t| torus_distance(next, t, state.grid.cols, state.grid.rows))
            .unwrap_or(0);
        // Ties keep the current heading to avoid zig-zagging
        let better = match best {
            None => true,
            Some((_, s)) => score < s || (score == s && dir == state.direction),
        };
        if better {
            best = Some((dir, score));
        }
    }

    best.map(|(d, _)| d).unwrap_or(state.direction)
}
