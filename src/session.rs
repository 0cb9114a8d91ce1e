//! A playable game: state, tick scheduling, clock and output in one place
//!
//! The session is the only thing the platform shells talk to. It turns
//! lifecycle commands into state transitions, runs due ticks, keeps the
//! scheduler in step with the speed level and publishes each frame.

use crate::error::{Error, Result};
use crate::platform::{Clock, Presenter, TickScheduler};
use crate::sim::{self, Direction, GamePhase, GameState};

pub struct Session<C: Clock, P: Presenter> {
    state: GameState,
    scheduler: TickScheduler,
    clock: C,
    presenter: P,
    autopilot: bool,
    last_frame_ms: u64,
}

impl<C: Clock, P: Presenter> Session<C, P> {
    pub fn new(state: GameState, clock: C, presenter: P) -> Self {
        let scheduler = TickScheduler::new(state.interval_ms());
        let last_frame_ms = clock.now_ms();
        let mut session = Self {
            state,
            scheduler,
            clock,
            presenter,
            autopilot: false,
            last_frame_ms,
        };
        session.publish();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn status(&self) -> &'static str {
        self.state.status()
    }

    /// Stopped -> Running, arming the tick scheduler
    pub fn start(&mut self) -> Result<()> {
        self.state.start()?;
        self.last_frame_ms = self.clock.now_ms();
        self.scheduler.arm(self.state.interval_ms());
        log::info!("Running at {}ms per tick", self.scheduler.interval_ms());
        self.publish();
        Ok(())
    }

    /// Running -> Stopped; in-flight effects keep their wall-clock expiries
    pub fn pause(&mut self) -> Result<()> {
        self.state.pause()?;
        self.scheduler.cancel();
        log::info!("Paused");
        self.publish();
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        self.start()
    }

    pub fn toggle_pause(&mut self) -> Result<()> {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Stopped => self.resume(),
            phase => Err(Error::InvalidTransition {
                command: "toggle pause",
                phase,
            }),
        }
    }

    /// Fresh board, stopped. Valid from any phase.
    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.state.reset();
        self.publish();
    }

    /// Reset and immediately start (the Start button)
    pub fn restart(&mut self) {
        self.reset();
        if let Err(e) = self.start() {
            log::warn!("Restart failed: {}", e);
        }
    }

    pub fn steer(&mut self, direction: Direction) {
        self.state.steer(direction);
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Run every tick that has come due since the last frame.
    /// Returns the number of ticks applied.
    pub fn frame(&mut self) -> u32 {
        let now = self.clock.now_ms();
        let elapsed = now.saturating_sub(self.last_frame_ms);
        self.last_frame_ms = now;

        self.scheduler.advance(elapsed);
        let mut ticks = 0;
        while self.scheduler.poll() {
            self.step(now);
            ticks += 1;
        }
        ticks
    }

    fn step(&mut self, now_ms: u64) {
        if self.autopilot {
            let dir = sim::choose_direction(&self.state);
            self.state.steer(dir);
        }

        let outcome = sim::tick(&mut self.state, now_ms);
        if outcome.interval_changed {
            log::debug!("Tick interval now {}ms", outcome.interval_ms);
            self.scheduler.set_interval(outcome.interval_ms);
        }
        if self.state.phase == GamePhase::GameOver {
            self.scheduler.cancel();
        }

        self.presenter.events(&outcome.events);
        self.publish();
    }

    fn publish(&mut self) {
        let now = self.clock.now_ms();
        let snapshot = self.state.snapshot(now);
        let hud = self.state.hud();
        self.presenter.present(&snapshot, &hud, self.state.status());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualClock;
    use crate::sim::{GameEvent, Hud, Powerup, PowerupKind, Snapshot};
    use crate::tuning::Tuning;
    use glam::IVec2;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Hud, String)>,
        events: Vec<GameEvent>,
        last_shielded: bool,
    }

    impl Presenter for Recorder {
        fn present(&mut self, snapshot: &Snapshot<'_>, hud: &Hud, status: &str) {
            self.frames.push((*hud, status.to_string()));
            self.last_shielded = snapshot.shielded;
        }

        fn events(&mut self, events: &[GameEvent]) {
            self.events.extend_from_slice(events);
        }
    }

    fn quiet_session() -> Session<ManualClock, Recorder> {
        let tuning = Tuning {
            initial_obstacles: 0,
            powerup_count: 0,
            powerup_respawn_chance: 0.0,
            obstacle_respawn_chance: 0.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(tuning, 42);
        state.entities.snake = VecDeque::from([IVec2::new(5, 5)]);
        state.entities.food = None;
        Session::new(state, ManualClock::new(0), Recorder::default())
    }

    #[test]
    fn test_no_ticks_before_start() {
        let mut session = quiet_session();
        session.clock_mut().advance(1_000);
        assert_eq!(session.frame(), 0);
        assert_eq!(session.status(), "Ready");
    }

    #[test]
    fn test_ticks_follow_interval() {
        let mut session = quiet_session();
        session.start().unwrap();

        session.clock_mut().advance(139);
        assert_eq!(session.frame(), 0);
        session.clock_mut().advance(1);
        assert_eq!(session.frame(), 1);
        assert_eq!(session.state().entities.head(), Some(IVec2::new(6, 5)));
        assert_eq!(session.presenter_mut().frames.last().unwrap().1, "Running");
    }

    #[test]
    fn test_pause_stops_ticking_and_resume_restarts() {
        let mut session = quiet_session();
        session.start().unwrap();
        session.clock_mut().advance(140);
        session.frame();

        session.pause().unwrap();
        assert_eq!(session.status(), "Paused");
        session.clock_mut().advance(5_000);
        assert_eq!(session.frame(), 0);

        // Paused time is not replayed on resume
        session.resume().unwrap();
        assert_eq!(session.frame(), 0);
        session.clock_mut().advance(140);
        assert_eq!(session.frame(), 1);
    }

    #[test]
    fn test_toggle_pause() {
        let mut session = quiet_session();
        session.toggle_pause().unwrap();
        assert_eq!(session.state().phase, GamePhase::Running);
        session.toggle_pause().unwrap();
        assert_eq!(session.state().phase, GamePhase::Stopped);
    }

    #[test]
    fn test_game_over_cancels_scheduler() {
        let mut session = quiet_session();
        session.state.entities.obstacles.push(IVec2::new(6, 5));
        session.start().unwrap();

        session.clock_mut().advance(1_000);
        assert_eq!(session.frame(), 1);
        assert_eq!(session.state().phase, GamePhase::GameOver);
        assert!(!session.scheduler().is_armed());
        assert_eq!(session.status(), "Game Over — Press Start");
        assert_eq!(session.presenter_mut().events, vec![GameEvent::GameOver]);

        assert!(session.start().is_err());
        assert!(session.toggle_pause().is_err());

        session.restart();
        assert_eq!(session.state().phase, GamePhase::Running);
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn test_speed_powerup_retimes_scheduler() {
        let mut session = quiet_session();
        session.state.entities.powerups.push(Powerup {
            cell: IVec2::new(6, 5),
            kind: PowerupKind::Speed,
        });
        session.start().unwrap();

        session.clock_mut().advance(140);
        session.frame();
        assert_eq!(session.state().speed_level, 3);
        assert_eq!(session.scheduler().interval_ms(), 120);

        // Still boosted just before the window closes
        for _ in 0..57 {
            session.clock_mut().advance(120);
            session.frame();
        }
        assert_eq!(session.state().speed_level, 3);

        session.clock_mut().advance(120);
        session.frame();
        assert_eq!(session.state().speed_level, 1);
        assert_eq!(session.scheduler().interval_ms(), 140);
    }

    #[test]
    fn test_reset_mid_boost_does_not_drift() {
        let mut session = quiet_session();
        session.state.entities.powerups.push(Powerup {
            cell: IVec2::new(6, 5),
            kind: PowerupKind::Speed,
        });
        session.start().unwrap();
        session.clock_mut().advance(140);
        session.frame();
        assert_eq!(session.state().speed_level, 3);

        session.reset();
        session.start().unwrap();
        session.clock_mut().advance(10_000);
        session.frame();
        assert_eq!(session.state().speed_level, 1);
    }

    #[test]
    fn test_shield_flag_published() {
        let mut session = quiet_session();
        session.state.entities.powerups.push(Powerup {
            cell: IVec2::new(6, 5),
            kind: PowerupKind::Shield,
        });
        session.start().unwrap();
        session.clock_mut().advance(140);
        session.frame();
        assert!(session.presenter_mut().last_shielded);
    }

    #[test]
    fn test_autopilot_finds_food() {
        let mut session = quiet_session();
        session.state.entities.food = Some(IVec2::new(12, 9));
        session.set_autopilot(true);
        session.start().unwrap();
        for _ in 0..200 {
            session.clock_mut().advance(50);
            session.frame();
        }

        let eaten = session
            .presenter_mut()
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::FoodEaten { .. }))
            .count();
        assert!(eaten >= 1);
        assert!(session.state().time_ticks >= 20);
        assert_eq!(session.state().score, 10 * eaten as u64);
    }
}
