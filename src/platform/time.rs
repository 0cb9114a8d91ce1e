//! Wall clock and tick scheduling
//!
//! The scheduler is a fixed-interval accumulator fed by the frame loop. It
//! never owns a timer, so changing the interval or cancelling cannot race a
//! tick that is already executing.

use crate::consts::MAX_CATCHUP_TICKS;

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Clock advanced by hand (tests, headless simulation)
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: u64,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self { now_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    pub fn set(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Native monotonic clock
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Browser clock backed by `performance.now()`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct BrowserClock {
    performance: Option<web_sys::Performance>,
}

#[cfg(target_arch = "wasm32")]
impl Default for BrowserClock {
    fn default() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        match &self.performance {
            Some(p) => p.now() as u64,
            None => js_sys::Date::now() as u64,
        }
    }
}

/// Fixed-interval tick scheduler
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval_ms: u32,
    accumulator_ms: u64,
    armed: bool,
    /// Ticks still allowed in the current frame
    budget: u32,
    max_catchup: u32,
}

impl TickScheduler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            accumulator_ms: 0,
            armed: false,
            budget: 0,
            max_catchup: MAX_CATCHUP_TICKS,
        }
    }

    /// Start firing every `interval_ms`, discarding any stale time
    pub fn arm(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
        self.accumulator_ms = 0;
        self.armed = true;
    }

    /// Stop firing. Takes effect for the very next `poll`.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.accumulator_ms = 0;
        self.budget = 0;
    }

    /// Change the period without re-arming; accumulated time carries over
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed elapsed frame time
    pub fn advance(&mut self, elapsed_ms: u64) {
        if !self.armed {
            return;
        }
        self.accumulator_ms += elapsed_ms;
        self.budget = self.max_catchup;
    }

    /// Consume one due tick, if any
    pub fn poll(&mut self) -> bool {
        if !self.armed || self.budget == 0 {
            return false;
        }
        let interval = u64::from(self.interval_ms);
        if self.accumulator_ms < interval {
            return false;
        }
        self.accumulator_ms -= interval;
        self.budget -= 1;
        if self.budget == 0 && self.accumulator_ms >= interval {
            log::trace!("Dropping {}ms of tick backlog", self.accumulator_ms);
            self.accumulator_ms %= interval;
        }
        true
    }
}
