//! Data-driven game balance
//!
//! Every gameplay constant lives here so tests and alternate modes can
//! override them without touching the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Largest accepted board side
const MAX_GRID_SIDE: i32 = 1024;
/// Longest accepted effect window (ten minutes)
const MAX_EFFECT_MS: u64 = 10 * 60 * 1000;
/// Slowest accepted tick interval
const MAX_INTERVAL_MS: u32 = 10_000;

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Board width in cells
    pub cols: i32,
    /// Board height in cells
    pub rows: i32,

    // === Spawning ===
    /// Rejection-sampling attempts per placed entity
    pub spawn_attempts: u32,
    /// Obstacles placed on reset
    pub initial_obstacles: usize,
    /// Powerups placed per respawn
    pub powerup_count: usize,
    /// Chance of a powerup respawn after eating
    pub powerup_respawn_chance: f64,
    /// Chance of an obstacle respawn (one more than before) after eating
    pub obstacle_respawn_chance: f64,

    // === Scoring ===
    pub food_points: u64,
    pub grow_bonus_points: u64,
    /// Segments appended by a grow pickup
    pub grow_segments: usize,

    // === Effects (wall-clock milliseconds) ===
    pub speed_boost_levels: u8,
    pub speed_boost_ms: u64,
    pub shield_ms: u64,
    pub score_multiplier_ms: u64,
    pub score_multiplier: u64,

    // === Tick interval curve ===
    pub base_interval_ms: u32,
    pub interval_step_ms: u32,
    pub min_interval_ms: u32,
    pub min_speed_level: u8,
    pub max_speed_level: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cols: COLS,
            rows: ROWS,

            spawn_attempts: 200,
            initial_obstacles: 8,
            powerup_count: 3,
            powerup_respawn_chance: 0.4,
            obstacle_respawn_chance: 0.35,

            food_points: 10,
            grow_bonus_points: 5,
            grow_segments: 3,

            speed_boost_levels: 2,
            speed_boost_ms: 7000,
            shield_ms: 8000,
            score_multiplier_ms: 7000,
            score_multiplier: 2,

            base_interval_ms: 140,
            interval_step_ms: 10,
            min_interval_ms: 30,
            min_speed_level: MIN_SPEED_LEVEL,
            max_speed_level: MAX_SPEED_LEVEL,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document; missing keys keep defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let sides = 1..=MAX_GRID_SIDE;
        if !sides.contains(&self.cols) || !sides.contains(&self.rows) {
            return Err(Error::InvalidTuning(format!(
                "grid sides must be in 1..={MAX_GRID_SIDE}, got {}x{}",
                self.cols, self.rows
            )));
        }
        if self.spawn_attempts < 100 {
            return Err(Error::InvalidTuning(format!(
                "spawn_attempts must be at least 100, got {}",
                self.spawn_attempts
            )));
        }
        for (name, p) in [
            ("powerup_respawn_chance", self.powerup_respawn_chance),
            ("obstacle_respawn_chance", self.obstacle_respawn_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidTuning(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        if self.min_speed_level == 0 || self.min_speed_level > self.max_speed_level {
            return Err(Error::InvalidTuning(format!(
                "speed levels must satisfy 1 <= min <= max, got {}..={}",
                self.min_speed_level, self.max_speed_level
            )));
        }
        for (name, ms) in [
            ("speed_boost_ms", self.speed_boost_ms),
            ("shield_ms", self.shield_ms),
            ("score_multiplier_ms", self.score_multiplier_ms),
        ] {
            if ms > MAX_EFFECT_MS {
                return Err(Error::InvalidTuning(format!(
                    "{name} must be at most {MAX_EFFECT_MS}, got {ms}"
                )));
            }
        }
        if self.min_interval_ms == 0
            || self.min_interval_ms > self.base_interval_ms
            || self.base_interval_ms > MAX_INTERVAL_MS
        {
            return Err(Error::InvalidTuning(format!(
                "intervals must satisfy 0 < min <= base <= {MAX_INTERVAL_MS}, got {}..={}",
                self.min_interval_ms, self.base_interval_ms
            )));
        }
        if self.interval_step_ms > self.base_interval_ms {
            return Err(Error::InvalidTuning(format!(
                "interval_step_ms must not exceed base_interval_ms, got {}",
                self.interval_step_ms
            )));
        }
        Ok(())
    }

    /// Tick interval for a speed level: linear in the level, floor-clamped
    pub fn interval_for_level(&self, level: u8) -> u32 {
        let steps = u32::from(level.saturating_sub(self.min_speed_level));
        self.base_interval_ms
            .saturating_sub(steps.saturating_mul(self.interval_step_ms))
            .max(self.min_interval_ms)
    }
}
