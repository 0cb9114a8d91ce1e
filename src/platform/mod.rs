//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time: wall clock and the fixed-interval tick scheduler
//! - Input: key and swipe mapping to steering commands
//! - Output: the presenter that receives each published frame

pub mod input;
pub mod time;

pub use input::{Command, command_for_key, direction_for_swipe};
pub use time::{Clock, ManualClock, TickScheduler};
#[cfg(target_arch = "wasm32")]
pub use time::BrowserClock;
#[cfg(not(target_arch = "wasm32"))]
pub use time::SystemClock;

use crate::sim::{GameEvent, Hud, Snapshot};

/// Consumer of published frames (renderer, HUD, audio)
pub trait Presenter {
    /// Called once after every applied tick and after lifecycle changes
    fn present(&mut self, snapshot: &Snapshot<'_>, hud: &Hud, status: &str);

    /// Cues raised during the tick; ignored by default
    fn events(&mut self, _events: &[GameEvent]) {}
}

/// Presenter that drops everything, for headless runs
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _snapshot: &Snapshot<'_>, _hud: &Hud, _status: &str) {}
}
