//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time arrives as an argument, never read from a clock
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod effects;
pub mod grid;
pub mod registry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::choose_direction;
pub use effects::{ActiveEffects, SpeedBoost};
pub use grid::Grid;
pub use registry::Entities;
pub use state::{
    Cell, Direction, Friend, GameEvent, GamePhase, GameState, Hud, Powerup, PowerupKind, Snapshot,
};
pub use tick::{TickOutcome, apply_powerup, tick};
