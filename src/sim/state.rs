//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there is no
//! ambient state anywhere else in the simulation.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::ActiveEffects;
use super::grid::Grid;
use super::registry::Entities;
use super::spawn;
use crate::error::{Error, Result};
use crate::tuning::Tuning;

/// A board coordinate
pub type Cell = IVec2;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not ticking: freshly reset or paused
    Stopped,
    /// Ticks are being applied
    Running,
    /// Collided; only a reset leaves this phase
    GameOver,
}

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step on the board (y grows downward)
    pub fn vector(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerupKind {
    /// Three extra segments and bonus points
    Grow,
    /// Temporary speed level boost
    Speed,
    /// Temporary invincibility
    Shield,
    /// Temporary double food score
    Score,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 4] = [
        PowerupKind::Grow,
        PowerupKind::Speed,
        PowerupKind::Shield,
        PowerupKind::Score,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Grow => "grow",
            PowerupKind::Speed => "speed",
            PowerupKind::Shield => "shield",
            PowerupKind::Score => "score",
        }
    }
}

/// A pickup on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Powerup {
    pub cell: Cell,
    pub kind: PowerupKind,
}

/// Decorative marker dropped where food was eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub cell: Cell,
    /// Index into [`crate::consts::FRIENDS_PALETTE`]
    pub color: usize,
}

/// Things that happened during a tick, for sound and UI cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { points: u64 },
    PowerupCollected(PowerupKind),
    SpeedBoostExpired,
    GameOver,
}

/// Values shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub speed_level: u8,
    pub length: usize,
}

/// Read-only view of the board for a renderer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub cols: i32,
    pub rows: i32,
    pub entities: &'a Entities,
    pub shielded: bool,
    pub multiplier_active: bool,
    pub phase: GamePhase,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub grid: Grid,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub entities: Entities,
    pub direction: Direction,
    /// Latest steering request, consumed by the next tick
    pub pending_direction: Option<Direction>,
    pub score: u64,
    pub speed_level: u8,
    pub effects: ActiveEffects,
    /// Ticks applied since the last reset
    pub time_ticks: u64,
}

impl GameState {
    /// Create a populated, stopped game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    /// Create a game with custom tuning; invalid tuning falls back to defaults
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("{}; using default tuning", e);
                Tuning::default()
            }
        };
        let grid = Grid::new(tuning.cols, tuning.rows);
        let mut state = Self {
            grid,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Stopped,
            entities: Entities::with_snake_at(grid.center()),
            direction: Direction::Right,
            pending_direction: None,
            score: 0,
            speed_level: tuning.min_speed_level,
            effects: ActiveEffects::default(),
            time_ticks: 0,
            tuning,
        };
        state.reset();
        state
    }

    /// Return to a fresh, stopped board. Valid from any phase.
    pub fn reset(&mut self) {
        self.entities = Entities::with_snake_at(self.grid.center());
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.score = 0;
        self.speed_level = self.tuning.min_speed_level;
        self.effects = ActiveEffects::default();
        self.time_ticks = 0;
        self.phase = GamePhase::Stopped;

        let attempts = self.tuning.spawn_attempts;
        spawn::spawn_obstacles(
            &mut self.entities,
            &self.grid,
            &mut self.rng,
            self.tuning.initial_obstacles,
            attempts,
        );
        spawn::spawn_powerups(
            &mut self.entities,
            &self.grid,
            &mut self.rng,
            self.tuning.powerup_count,
            attempts,
        );
        spawn::place_food(&mut self.entities, &self.grid, &mut self.rng, attempts);

        log::info!(
            "Board reset: {} obstacles, {} powerups, food {:?}",
            self.entities.obstacles.len(),
            self.entities.powerups.len(),
            self.entities.food
        );
    }

    /// Stopped -> Running
    pub fn start(&mut self) -> Result<()> {
        match self.phase {
            GamePhase::Stopped => {
                self.phase = GamePhase::Running;
                Ok(())
            }
            phase => Err(Error::InvalidTransition {
                command: "start",
                phase,
            }),
        }
    }

    /// Running -> Stopped
    pub fn pause(&mut self) -> Result<()> {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Stopped;
                Ok(())
            }
            phase => Err(Error::InvalidTransition {
                command: "pause",
                phase,
            }),
        }
    }

    /// Record a steering request; the last one before a tick wins
    pub fn steer(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            speed_level: self.speed_level,
            length: self.entities.snake_len(),
        }
    }

    pub fn snapshot(&self, now_ms: u64) -> Snapshot<'_> {
        Snapshot {
            cols: self.grid.cols,
            rows: self.grid.rows,
            entities: &self.entities,
            shielded: self.effects.is_shielded(now_ms),
            multiplier_active: self.effects.multiplier_active(now_ms),
            phase: self.phase,
        }
    }

    /// Current tick interval derived from the speed level
    pub fn interval_ms(&self) -> u32 {
        self.tuning.interval_for_level(self.speed_level)
    }

    /// Human-readable phase label
    pub fn status(&self) -> &'static str {
        match self.phase {
            GamePhase::Stopped if self.time_ticks == 0 => "Ready",
            GamePhase::Stopped => "Paused",
            GamePhase::Running => "Running",
            GamePhase::GameOver => "Game Over — Press Start",
        }
    }
}
