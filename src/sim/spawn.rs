//! Randomized placement of food, obstacles and powerups
//!
//! Every placement is bounded rejection sampling over the whole board. When
//! the attempt budget runs out the entity is simply not placed; the board is
//! never expected to be that full.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::grid::Grid;
use super::registry::Entities;
use super::state::{Cell, Powerup, PowerupKind};

/// Sample a cell no entity occupies, giving up after `attempts` tries
fn sample_free_cell<R: Rng + ?Sized>(
    entities: &Entities,
    grid: &Grid,
    rng: &mut R,
    attempts: u32,
) -> Option<Cell> {
    (0..attempts)
        .map(|_| grid.random_cell(rng))
        .find(|&cell| !entities.is_occupied(cell))
}

/// Place one food cell. Leaves the food unset if sampling is exhausted.
pub fn place_food<R: Rng + ?Sized>(
    entities: &mut Entities,
    grid: &Grid,
    rng: &mut R,
    attempts: u32,
) -> bool {
    match sample_free_cell(entities, grid, rng, attempts) {
        Some(cell) => {
            entities.food = Some(cell);
            true
        }
        None => {
            log::debug!("No free cell for food after {} attempts", attempts);
            false
        }
    }
}

/// Replace all obstacles with `count` fresh ones. Returns how many were placed.
pub fn spawn_obstacles<R: Rng + ?Sized>(
    entities: &mut Entities,
    grid: &Grid,
    rng: &mut R,
    count: usize,
    attempts: u32,
) -> usize {
    entities.obstacles.clear();
    for _ in 0..count {
        match sample_free_cell(entities, grid, rng, attempts) {
            Some(cell) => entities.obstacles.push(cell),
            None => {
                log::debug!(
                    "Obstacle spawn exhausted: placed {} of {}",
                    entities.obstacles.len(),
                    count
                );
                break;
            }
        }
    }
    entities.obstacles.len()
}

/// Replace all powerups with `count` fresh ones of uniformly random kinds
pub fn spawn_powerups<R: Rng + ?Sized>(
    entities: &mut Entities,
    grid: &Grid,
    rng: &mut R,
    count: usize,
    attempts: u32,
) -> usize {
    entities.powerups.clear();
    for _ in 0..count {
        let Some(cell) = sample_free_cell(entities, grid, rng, attempts) else {
            log::debug!(
                "Powerup spawn exhausted: placed {} of {}",
                entities.powerups.len(),
                count
            );
            break;
        };
        let kind = *PowerupKind::ALL
            .choose(rng)
            .unwrap_or(&PowerupKind::Grow);
        entities.powerups.push(Powerup { cell, kind });
    }
    entities.powerups.len()
}
