//! Keyboard and touch mapping

use crate::sim::Direction;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Command::Steer(Direction::Up)),
        "ArrowDown" | "s" | "S" => Some(Command::Steer(Direction::Down)),
        "ArrowLeft" | "a" | "A" => Some(Command::Steer(Direction::Left)),
        "ArrowRight" | "d" | "D" => Some(Command::Steer(Direction::Right)),
        " " => Some(Command::TogglePause),
        "i" | "I" => Some(Command::ToggleAutopilot),
        _ => None,
    }
}

/// Direction of a swipe from its screen-space delta (y grows downward).
/// The dominant axis wins; ties go vertical.
pub fn direction_for_swipe(dx: f64, dy: f64) -> Direction {
    if dx.abs() > dy.abs() {
        if dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}
