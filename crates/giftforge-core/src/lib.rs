//! GiftForge Core - Core types for constrained gift-exchange assignment
//!
//! This crate provides the fundamental abstractions for GiftForge:
//! - Domain types for participants and budget tiers
//! - Assignment edges and assignment sets
//! - The constraint model shared by the engine and the validator
//! - The error taxonomy

pub mod assignment;
pub mod constraint;
pub mod domain;
pub mod error;

#[cfg(test)]
mod constraint_tests;

pub use assignment::{AssignmentEdge, AssignmentSet};
pub use constraint::{
    AssignmentView, ConstraintModel, ExclusionPair, ExclusionSet, TierRule, Violation,
};
pub use domain::{
    BudgetTier, NewParticipant, Participant, ParticipantId, ParticipationStatus, TierId, TierTable,
};
pub use error::{GiftForgeError, InfeasibleReason, Result};
