//! The tick: one authoritative simulation step
//!
//! Advances a running game by exactly one cell and resolves every interaction
//! in a fixed order: effect expiry, steering, movement, collision, food,
//! powerups, speed.

use rand::Rng;

use super::spawn;
use super::state::{Friend, GameEvent, GamePhase, GameState, Hud, PowerupKind};
use crate::consts::FRIENDS_PALETTE;

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the tick ran at all (false unless Running)
    pub advanced: bool,
    pub events: Vec<GameEvent>,
    pub hud: Hud,
    /// Tick interval after this step
    pub interval_ms: u32,
    /// The scheduler must switch to `interval_ms`
    pub interval_changed: bool,
}

/// Advance the game state by one tick at wall-clock time `now_ms`
pub fn tick(state: &mut GameState, now_ms: u64) -> TickOutcome {
    let interval_before = state.interval_ms();
    let mut events = Vec::new();

    if state.phase != GamePhase::Running {
        return TickOutcome {
            advanced: false,
            events,
            hud: state.hud(),
            interval_ms: interval_before,
            interval_changed: false,
        };
    }

    // Speed boosts revert here rather than from a detached timer
    if state.effects.expire_speed_boost(
        &mut state.speed_level,
        state.tuning.min_speed_level,
        now_ms,
    ) {
        log::debug!("Speed boost expired, level {}", state.speed_level);
        events.push(GameEvent::SpeedBoostExpired);
    }

    // Steering: never reverse into yourself; pending is consumed either way
    if let Some(pending) = state.pending_direction.take() {
        if !pending.is_opposite(state.direction) {
            state.direction = pending;
        } else {
            log::trace!("Ignored reversal {:?} -> {:?}", state.direction, pending);
        }
    }

    let Some(old_head) = state.entities.head() else {
        log::error!("Tick on an empty snake");
        return finish(state, events, interval_before, false);
    };
    let head = state.grid.wrap(old_head + state.direction.vector());

    // The old head is skipped: only segments after index 0 count
    if !state.effects.is_shielded(now_ms)
        && (state.entities.body_contains(head) || state.entities.obstacle_at(head))
    {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at ({}, {}): score {}, length {}",
            head.x,
            head.y,
            state.score,
            state.entities.snake_len()
        );
        events.push(GameEvent::GameOver);
        return finish(state, events, interval_before, true);
    }

    state.time_ticks += 1;
    state.entities.snake.push_front(head);

    if state.entities.food == Some(head) {
        eat_food(state, now_ms, &mut events);
    } else {
        state.entities.snake.pop_back();
    }

    for powerup in state.entities.take_powerups_at(head) {
        apply_powerup(state, powerup.kind, now_ms);
        events.push(GameEvent::PowerupCollected(powerup.kind));
    }

    log::trace!(
        "Tick {}: head ({}, {}), len {}",
        state.time_ticks,
        head.x,
        head.y,
        state.entities.snake_len()
    );

    finish(state, events, interval_before, true)
}

fn finish(
    state: &GameState,
    events: Vec<GameEvent>,
    interval_before: u32,
    advanced: bool,
) -> TickOutcome {
    let interval_ms = state.interval_ms();
    TickOutcome {
        advanced,
        events,
        hud: state.hud(),
        interval_ms,
        interval_changed: interval_ms != interval_before,
    }
}

/// Score the food, respawn it, maybe reshuffle the board, leave a friend behind
fn eat_food(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    let Some(head) = state.entities.head() else {
        return;
    };
    let tuning = &state.tuning;
    let multiplier = if state.effects.multiplier_active(now_ms) {
        tuning.score_multiplier
    } else {
        1
    };
    let points = tuning.food_points * multiplier;
    state.score += points;
    events.push(GameEvent::FoodEaten { points });

    let attempts = tuning.spawn_attempts;
    state.entities.food = None;
    spawn::place_food(&mut state.entities, &state.grid, &mut state.rng, attempts);

    if state.rng.random_bool(tuning.powerup_respawn_chance) {
        spawn::spawn_powerups(
            &mut state.entities,
            &state.grid,
            &mut state.rng,
            tuning.powerup_count,
            attempts,
        );
    }
    if state.rng.random_bool(tuning.obstacle_respawn_chance) {
        let count = state.entities.obstacles.len() + 1;
        spawn::spawn_obstacles(
            &mut state.entities,
            &state.grid,
            &mut state.rng,
            count,
            attempts,
        );
    }

    let color = state.rng.random_range(0..FRIENDS_PALETTE.len());
    state.entities.friends.push(Friend { cell: head, color });

    log::debug!("Ate food: +{} (score {})", points, state.score);
}

/// Apply a collected powerup's effect
pub fn apply_powerup(state: &mut GameState, kind: PowerupKind, now_ms: u64) {
    let tuning = &state.tuning;
    match kind {
        PowerupKind::Grow => {
            state.entities.extend_tail(tuning.grow_segments);
            state.score += tuning.grow_bonus_points;
        }
        PowerupKind::Speed => {
            state.effects.grant_speed_boost(
                &mut state.speed_level,
                tuning.speed_boost_levels,
                tuning.max_speed_level,
                now_ms,
                tuning.speed_boost_ms,
            );
        }
        PowerupKind::Shield => state.effects.grant_shield(now_ms, tuning.shield_ms),
        PowerupKind::Score => state
            .effects
            .grant_score_multiplier(now_ms, tuning.score_multiplier_ms),
    }
    log::debug!("Collected {} powerup", kind.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Direction, Powerup};
    use crate::tuning::Tuning;
    use glam::IVec2;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    /// Running game with an empty board and no random reshuffles
    fn quiet_state() -> GameState {
        let tuning = Tuning {
            initial_obstacles: 0,
            powerup_count: 0,
            powerup_respawn_chance: 0.0,
            obstacle_respawn_chance: 0.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(tuning, 12345);
        state.entities.snake = VecDeque::from([IVec2::new(5, 5)]);
        state.entities.food = None;
        state.entities.obstacles.clear();
        state.entities.powerups.clear();
        state.direction = Direction::Right;
        state.start().unwrap();
        state
    }

    fn snake(state: &GameState) -> Vec<IVec2> {
        state.entities.snake.iter().copied().collect()
    }

    #[test]
    fn test_tick_only_while_running() {
        let mut state = quiet_state();
        state.pause().unwrap();
        let outcome = tick(&mut state, 0);
        assert!(!outcome.advanced);
        assert_eq!(snake(&state), vec![IVec2::new(5, 5)]);
    }

    #[test]
    fn test_tick_plain_move() {
        let mut state = quiet_state();
        let outcome = tick(&mut state, 0);

        assert!(outcome.advanced);
        assert_eq!(snake(&state), vec![IVec2::new(6, 5)]);
        assert_eq!(state.score, 0);
        assert_eq!(outcome.hud.length, 1);
        assert!(outcome.events.is_empty());
        assert!(!outcome.interval_changed);
    }

    #[test]
    fn test_tick_eats_food() {
        let mut state = quiet_state();
        state.entities.food = Some(IVec2::new(6, 5));

        let outcome = tick(&mut state, 0);
        assert_eq!(snake(&state), vec![IVec2::new(6, 5), IVec2::new(5, 5)]);
        assert_eq!(state.score, 10);
        assert_eq!(outcome.events, vec![GameEvent::FoodEaten { points: 10 }]);

        let food = state.entities.food.expect("food respawned");
        assert_ne!(food, IVec2::new(6, 5));
        assert!(!state.entities.snake.contains(&food));

        assert_eq!(state.entities.friends.len(), 1);
        assert_eq!(state.entities.friends[0].cell, IVec2::new(6, 5));
        assert!(state.entities.friends[0].color < FRIENDS_PALETTE.len());
    }

    #[test]
    fn test_tick_food_respawns_board() {
        let tuning = Tuning {
            powerup_respawn_chance: 1.0,
            obstacle_respawn_chance: 1.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(tuning, 12345);
        let (start, food) = (IVec2::new(5, 5), IVec2::new(6, 5));
        state.entities.snake = VecDeque::from([start]);
        state.entities.food = Some(food);
        state.entities.obstacles.retain(|&c| c != start && c != food);
        state.entities.powerups.retain(|p| p.cell != start && p.cell != food);
        state.direction = Direction::Right;
        state.start().unwrap();
        let obstacles_before = state.entities.obstacles.len();

        tick(&mut state, 0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.entities.obstacles.len(), obstacles_before + 1);
        assert_eq!(state.entities.powerups.len(), 3);

        let new_food = state.entities.food.expect("food respawned");
        let e = &state.entities;
        for &cell in &e.obstacles {
            assert!(!e.snake.contains(&cell));
            assert_ne!(cell, new_food);
            assert!(!e.powerups.iter().any(|p| p.cell == cell));
        }
        for p in &e.powerups {
            assert!(!e.snake.contains(&p.cell));
            assert_ne!(p.cell, new_food);
        }
    }

    #[test]
    fn test_tick_food_with_multiplier() {
        let mut state = quiet_state();
        state.entities.food = Some(IVec2::new(6, 5));
        state.effects.grant_score_multiplier(0, 7_000);

        tick(&mut state, 100);
        assert_eq!(state.score, 20);

        // Expired multiplier scores normally
        state.entities.food = Some(IVec2::new(7, 5));
        tick(&mut state, 7_000);
        assert_eq!(state.score, 30);
    }

    #[test]
    fn test_tick_obstacle_game_over() {
        let mut state = quiet_state();
        state.entities.obstacles.push(IVec2::new(6, 5));

        let outcome = tick(&mut state, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(snake(&state), vec![IVec2::new(5, 5)]);
        assert_eq!(outcome.events, vec![GameEvent::GameOver]);

        // Terminal until reset
        assert!(!tick(&mut state, 0).advanced);
    }

    #[test]
    fn test_tick_self_collision() {
        let mut state = quiet_state();
        // A hook shape: moving up from (5,5) lands on (5,4)
        state.entities.snake = VecDeque::from([
            IVec2::new(5, 5),
            IVec2::new(6, 5),
            IVec2::new(6, 4),
            IVec2::new(5, 4),
            IVec2::new(4, 4),
        ]);
        state.direction = Direction::Left;
        state.steer(Direction::Up);

        tick(&mut state, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.entities.snake_len(), 5);
    }

    #[test]
    fn test_tick_shield_ignores_collisions() {
        let mut state = quiet_state();
        state.entities.obstacles.push(IVec2::new(6, 5));
        state.effects.grant_shield(0, 8_000);

        tick(&mut state, 1_000);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(snake(&state), vec![IVec2::new(6, 5)]);

        // Shield gone: the next obstacle ends the run
        state.entities.obstacles.push(IVec2::new(7, 5));
        tick(&mut state, 8_000);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_tick_rejects_reversal() {
        let mut state = quiet_state();
        state.steer(Direction::Left);
        tick(&mut state, 0);
        assert_eq!(state.direction, Direction::Right);
        assert!(state.pending_direction.is_none());
        assert_eq!(snake(&state), vec![IVec2::new(6, 5)]);
    }

    #[test]
    fn test_tick_accepts_turn() {
        let mut state = quiet_state();
        state.steer(Direction::Down);
        tick(&mut state, 0);
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(snake(&state), vec![IVec2::new(5, 6)]);
    }

    #[test]
    fn test_tick_wraps_both_axes() {
        let mut state = quiet_state();
        let cols = state.grid.cols;
        let rows = state.grid.rows;

        state.entities.snake = VecDeque::from([IVec2::new(cols - 1, 3)]);
        tick(&mut state, 0);
        assert_eq!(snake(&state), vec![IVec2::new(0, 3)]);

        state.entities.snake = VecDeque::from([IVec2::new(3, 0)]);
        state.direction = Direction::Up;
        tick(&mut state, 0);
        assert_eq!(snake(&state), vec![IVec2::new(3, rows - 1)]);
    }

    #[test]
    fn test_tick_grow_powerup() {
        let mut state = quiet_state();
        state.entities.powerups.push(Powerup {
            cell: IVec2::new(6, 5),
            kind: PowerupKind::Grow,
        });

        let outcome = tick(&mut state, 0);
        assert_eq!(state.entities.snake_len(), 4);
        assert_eq!(state.score, 5);
        assert!(state.entities.powerups.is_empty());
        assert_eq!(outcome.events, vec![GameEvent::PowerupCollected(PowerupKind::Grow)]);
    }

    #[test]
    fn test_tick_food_and_powerup_same_tick() {
        let mut state = quiet_state();
        state.entities.food = Some(IVec2::new(6, 5));
        state.entities.powerups.push(Powerup {
            cell: IVec2::new(6, 5),
            kind: PowerupKind::Grow,
        });

        tick(&mut state, 0);
        assert_eq!(state.score, 15);
        // +1 for food, +3 for grow
        assert_eq!(state.entities.snake_len(), 5);
    }

    #[test]
    fn test_tick_speed_powerup_reverts_after_duration() {
        let mut state = quiet_state();
        state.entities.powerups.push(Powerup {
            cell: IVec2::new(6, 5),
            kind: PowerupKind::Speed,
        });

        let outcome = tick(&mut state, 1_000);
        assert_eq!(state.speed_level, 3);
        assert!(outcome.interval_changed);
        assert_eq!(outcome.interval_ms, 120);

        // Many ticks inside the window do not revert it
        for t in 0..50 {
            tick(&mut state, 1_000 + t * 100);
        }
        assert_eq!(state.speed_level, 3);

        let outcome = tick(&mut state, 8_000);
        assert_eq!(state.speed_level, 1);
        assert!(outcome.interval_changed);
        assert!(outcome.events.contains(&GameEvent::SpeedBoostExpired));
    }

    #[test]
    fn test_tick_shield_and_score_powerups() {
        let mut state = quiet_state();
        state.entities.powerups.push(Powerup {
            cell: IVec2::new(6, 5),
            kind: PowerupKind::Shield,
        });
        state.entities.powerups.push(Powerup {
            cell: IVec2::new(7, 5),
            kind: PowerupKind::Score,
        });

        tick(&mut state, 0);
        tick(&mut state, 100);
        assert!(state.effects.is_shielded(7_999));
        assert!(state.effects.multiplier_active(7_099));
        assert!(!state.effects.multiplier_active(7_100));
        assert!(state.entities.powerups.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.start().unwrap();
        state2.start().unwrap();

        let steering = [None, Some(Direction::Down), None, Some(Direction::Left), None];
        for (i, dir) in steering.iter().cycle().take(60).enumerate() {
            if let Some(d) = dir {
                state1.steer(*d);
                state2.steer(*d);
            }
            tick(&mut state1, i as u64 * 100);
            tick(&mut state2, i as u64 * 100);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.entities.snake, state2.entities.snake);
        assert_eq!(state1.entities.food, state2.entities.food);
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_length_tracks_food(
            seed in any::<u64>(),
            turns in prop::collection::vec(prop::option::of(direction()), 1..80),
        ) {
            let mut state = GameState::new(seed);
            state.start().unwrap();
            state.effects.grant_shield(0, u64::MAX / 2);

            for (i, turn) in turns.into_iter().enumerate() {
                if let Some(d) = turn {
                    state.steer(d);
                }
                let before = state.entities.snake_len();
                let outcome = tick(&mut state, i as u64);
                prop_assert!(outcome.advanced);

                let ate = outcome
                    .events
                    .iter()
                    .any(|e| matches!(e, GameEvent::FoodEaten { .. }));
                let grew = outcome
                    .events
                    .iter()
                    .filter(|e| **e == GameEvent::PowerupCollected(PowerupKind::Grow))
                    .count();
                let expected = before + usize::from(ate) + grew * 3;
                prop_assert_eq!(state.entities.snake_len(), expected);

                if ate {
                    if let Some(food) = state.entities.food {
                        prop_assert!(!state.entities.snake.contains(&food));
                        prop_assert!(!state.entities.obstacles.contains(&food));
                        prop_assert!(state.entities.powerups.iter().all(|p| p.cell != food));
                    }
                }
            }
        }

        #[test]
        fn prop_reversal_never_accepted(start in direction()) {
            let mut state = quiet_state();
            state.direction = start;
            state.steer(start.opposite());
            tick(&mut state, 0);
            prop_assert_eq!(state.direction, start);
        }
    }
}
