//! Friends Snake - a wraparound snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, entities, effects, spawning, tick)
//! - `session`: Lifecycle commands, tick scheduling and publishing
//! - `platform`: Clock and presenter seams between the core and the browser
//! - `tuning`: Data-driven game balance
//! - `renderer` / `audio`: Browser-only output shims

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Default board width in cells
    pub const COLS: i32 = 30;
    /// Default board height in cells
    pub const ROWS: i32 = 30;
    /// Pixel size of one cell on the canvas
    pub const TILE: f64 = 20.0;

    /// Slowest and fastest speed levels
    pub const MIN_SPEED_LEVEL: u8 = 1;
    pub const MAX_SPEED_LEVEL: u8 = 10;

    /// Maximum ticks run in one frame after a stall, to prevent a spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 4;

    /// Decorative friend marker palette (CSS colours)
    pub const FRIENDS_PALETTE: [&str; 4] = ["#ff6b6b", "#4ecdc4", "#ffd166", "#5f27cd"];
}
