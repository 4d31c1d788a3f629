//! Domain types: participants and budget tiers.

mod participant;
mod tier;

#[cfg(test)]
mod tests;

pub use participant::{
    normalize_contact, NewParticipant, Participant, ParticipantId, ParticipationStatus,
};
pub use tier::{BudgetTier, TierId, TierTable};
