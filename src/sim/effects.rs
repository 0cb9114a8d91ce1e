//! Timed powerup effects
//!
//! Expiries are wall-clock timestamps compared lazily when they matter, so an
//! effect lasts the same real time regardless of the tick rate. Nothing here
//! schedules callbacks.

use serde::{Deserialize, Serialize};

/// An in-flight speed boost and the levels it actually added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedBoost {
    pub until_ms: u64,
    /// Levels added after clamping; this is what gets reverted
    pub applied: u8,
}

/// Active power-up effects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Collisions are ignored while `now < shield_until_ms`
    pub shield_until_ms: u64,
    /// Food scores the multiplier while `now < score_multiplier_until_ms`
    pub score_multiplier_until_ms: u64,
    pub speed_boost: Option<SpeedBoost>,
}

impl ActiveEffects {
    pub fn is_shielded(&self, now_ms: u64) -> bool {
        now_ms < self.shield_until_ms
    }

    pub fn multiplier_active(&self, now_ms: u64) -> bool {
        now_ms < self.score_multiplier_until_ms
    }

    /// Re-triggering resets the window rather than extending it
    pub fn grant_shield(&mut self, now_ms: u64, duration_ms: u64) {
        self.shield_until_ms = now_ms.saturating_add(duration_ms);
    }

    pub fn grant_score_multiplier(&mut self, now_ms: u64, duration_ms: u64) {
        self.score_multiplier_until_ms = now_ms.saturating_add(duration_ms);
    }

    /// Raise `level` by `levels` (clamped to `max`) and remember what to revert
    pub fn grant_speed_boost(
        &mut self,
        level: &mut u8,
        levels: u8,
        max: u8,
        now_ms: u64,
        duration_ms: u64,
    ) {
        let boosted = level.saturating_add(levels).min(max);
        let applied = boosted.saturating_sub(*level);
        *level = boosted;

        let carried = self.speed_boost.map(|b| b.applied).unwrap_or(0);
        self.speed_boost = Some(SpeedBoost {
            until_ms: now_ms.saturating_add(duration_ms),
            applied: carried.saturating_add(applied),
        });
    }

    /// Revert an expired speed boost. Returns true if one expired.
    pub fn expire_speed_boost(&mut self, level: &mut u8, min: u8, now_ms: u64) -> bool {
        match self.speed_boost {
            Some(boost) if now_ms >= boost.until_ms => {
                *level = level.saturating_sub(boost.applied).max(min);
                self.speed_boost = None;
                true
            }
            _ => false,
        }
    }
}
