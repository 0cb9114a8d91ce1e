//! Crate error type
//!
//! Gameplay itself never fails; these cover the command and config surfaces.

use thiserror::Error;

use crate::sim::GamePhase;

#[derive(Debug, Error)]
pub enum Error {
    /// A lifecycle command was issued in a phase that does not accept it
    #[error("cannot {command} while {phase:?}")]
    InvalidTransition {
        command: &'static str,
        phase: GamePhase,
    },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to parse tuning: {0}")]
    TuningParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
