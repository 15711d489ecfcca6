//! Session error types.
//!
//! These errors are transition rejections from the quiz session state
//! machine. None of them is fatal: the session stays in the phase it was in
//! and the caller may try again.

use thiserror::Error;

use crate::session::Phase;

/// Reasons a quiz session refuses a transition or an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Participant name or position is blank.
    #[error("participant name and position are required")]
    MissingParticipant,

    /// Difficulty outside the supported tiers.
    #[error("difficulty must be between 1 and 5, got {0}")]
    InvalidDifficulty(u8),

    /// The pool has no question at the chosen tier.
    #[error("insufficient questions available for difficulty tier {difficulty}")]
    NoQuestionsAvailable { difficulty: u8 },

    /// Advancing without an answer for the current question.
    #[error("select an answer before moving on")]
    NoSelection,

    /// The action is not allowed in the current phase.
    #[error("cannot {action} while the session is in {phase}")]
    WrongPhase { action: &'static str, phase: Phase },
}

impl SessionError {
    /// Returns `true` if the participant can fix this by changing their input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SessionError::WrongPhase { .. })
    }
}
