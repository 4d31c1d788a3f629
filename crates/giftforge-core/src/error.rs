//! Error types for GiftForge

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::constraint::Violation;
use crate::domain::{ParticipantId, TierId};

/// Why a search ended without an acceptable assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfeasibleReason {
    /// Every branch of the search tree was explored.
    SearchExhausted,
    /// The configured attempt budget ran out.
    AttemptLimit(u64),
    /// The configured wall-clock budget ran out.
    TimeLimit(Duration),
    /// The engine produced a set the validator refused.
    ValidationRejected,
}

impl fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfeasibleReason::SearchExhausted => write!(f, "no valid assignment exists"),
            InfeasibleReason::AttemptLimit(limit) => {
                write!(f, "attempt limit of {} reached", limit)
            }
            InfeasibleReason::TimeLimit(limit) => {
                write!(f, "time limit of {} ms reached", limit.as_millis())
            }
            InfeasibleReason::ValidationRejected => {
                write!(f, "produced assignment failed validation")
            }
        }
    }
}

/// Main error type for GiftForge operations
#[derive(Debug, Error)]
pub enum GiftForgeError {
    /// Fewer active participants than a gift exchange needs
    #[error("At least {required} active participants are required, found {actual}")]
    InsufficientParticipants { required: usize, actual: usize },

    /// Contact address already registered for the event
    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    /// Mutation attempted against a committed assignment
    #[error("Assignment locked: {0}")]
    AssignmentLocked(String),

    /// No assignment satisfying the constraints was found
    #[error("Infeasible constraints: {reason}")]
    InfeasibleConstraints { reason: InfeasibleReason },

    /// Produced assignment broke an invariant (internal, never returned by the engine)
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] Violation),

    /// Participant request failed presence checks
    #[error("Invalid participant: {0}")]
    InvalidParticipant(String),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("Unknown budget tier: {0}")]
    UnknownTier(TierId),

    /// Two tiers of one event may not share a minimum
    #[error("A budget tier with minimum {0} already exists")]
    DuplicateTierMinimum(u64),

    /// Invalid operation for the current exchange state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// Notification collaborator reported a failure
    #[error("Notification error: {0}")]
    Notification(String),
}

impl GiftForgeError {
    /// Shorthand for an infeasibility error.
    pub fn infeasible(reason: InfeasibleReason) -> Self {
        GiftForgeError::InfeasibleConstraints { reason }
    }

    /// Returns true for failures the caller can resolve by relaxing
    /// constraints or adding participants and retrying.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            GiftForgeError::InfeasibleConstraints { .. }
                | GiftForgeError::InsufficientParticipants { .. }
        )
    }
}

/// Result type alias for GiftForge operations
pub type Result<T> = std::result::Result<T, GiftForgeError>;
