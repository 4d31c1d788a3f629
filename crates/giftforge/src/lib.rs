//! GiftForge - Constrained gift exchange assignments in Rust
//!
//! Register participants, describe who must not draw whom, and let the
//! engine find an assignment where nobody draws themselves.
//!
//! # Example
//!
//! ```rust
//! use giftforge::prelude::*;
//!
//! let mut exchange = GiftExchange::new(
//!     EventCode::parse("DEMO").unwrap(),
//!     "Demo",
//!     2000,
//!     EngineConfig::new().with_random_seed(1),
//! );
//! let ids: Vec<ParticipantId> = ["ann", "ben", "cas", "dee"]
//!     .iter()
//!     .map(|name| {
//!         exchange
//!             .register(NewParticipant::new(*name, format!("{}@example.com", name)).active())
//!             .unwrap()
//!     })
//!     .collect();
//! exchange.add_exclusion(ids[0], ids[1]).unwrap();
//!
//! let draft = exchange.shuffle().unwrap();
//! assert!(!draft.contains_edge(AssignmentEdge::new(ids[0], ids[1])));
//! ```

// Domain model
pub use giftforge_core::{
    AssignmentEdge, AssignmentSet, AssignmentView, BudgetTier, ConstraintModel, ExclusionPair,
    ExclusionSet, GiftForgeError, InfeasibleReason, NewParticipant, Participant, ParticipantId,
    ParticipationStatus, Result, TierId, TierRule, TierTable, Violation,
};

// Configuration
pub use giftforge_config::{ConfigError, EngineConfig, TerminationConfig, TierMode};

// Engine and lifecycle
pub use giftforge_engine::{
    validate, AssignmentEngine, AssignmentNotifier, AssignmentState, EventCode, ExchangeManager,
    ExchangeSummary, GiftExchange, LoggingNotifier, Notice, NotifyError, ParticipantRegistry,
    RecordingNotifier, SearchStatistics, Solved, TierShare,
};

/// Lower-level engine building blocks.
pub mod engine {
    pub use giftforge_engine::{
        partial, scope, termination, validator, PartialAssignment, SearchScope,
        MIN_PARTICIPANTS,
    };
}

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        AssignmentEdge, AssignmentSet, AssignmentView, ConstraintModel, EngineConfig, EventCode,
        ExchangeManager, GiftExchange, GiftForgeError, NewParticipant, Participant,
        ParticipantId, ParticipationStatus, TierId, TierMode,
    };
    pub use super::{AssignmentNotifier, LoggingNotifier, Notice};
}
