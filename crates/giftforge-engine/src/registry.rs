//! Participant registry for a single event.

use std::collections::{BTreeMap, HashSet};

use giftforge_core::domain::normalize_contact;
use giftforge_core::{
    GiftForgeError, NewParticipant, Participant, ParticipantId, ParticipationStatus, Result,
    TierId,
};
use tracing::debug;

/// Stores an event's participants and tracks which of them are locked by a
/// committed assignment.
///
/// Participants are kept in registration order; ids are never reused.
///
/// # Example
///
/// ```
/// use giftforge_core::NewParticipant;
/// use giftforge_engine::registry::ParticipantRegistry;
///
/// let mut registry = ParticipantRegistry::new();
/// let alice = registry
///     .register(NewParticipant::new("Alice", "alice@example.com").active())
///     .unwrap();
/// registry
///     .register(NewParticipant::new("Carol", "carol@example.com"))
///     .unwrap();
///
/// // Same address, different case
/// assert!(registry
///     .register(NewParticipant::new("Alice Again", "ALICE@example.com"))
///     .is_err());
///
/// let active = registry.list_active();
/// assert_eq!(active.len(), 1);
/// assert_eq!(active[0].id, alice);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParticipantRegistry {
    participants: BTreeMap<ParticipantId, Participant>,
    locked: HashSet<ParticipantId>,
    next_id: u64,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a participant.
    ///
    /// Joining with a non-empty wishlist signs the participant up.
    ///
    /// # Errors
    ///
    /// - `InvalidParticipant` if name or contact is blank
    /// - `DuplicateIdentity` if the contact is already registered
    pub fn register(&mut self, request: NewParticipant) -> Result<ParticipantId> {
        request.validate()?;
        let key = normalize_contact(&request.contact);
        if self.participants.values().any(|p| p.contact_key() == key) {
            return Err(GiftForgeError::DuplicateIdentity(request.contact.trim().to_string()));
        }

        let id = ParticipantId::new(self.next_id);
        self.next_id += 1;
        let mut participant = Participant::from_request(id, request);
        if !participant.wishlist.is_empty() {
            participant.status = ParticipationStatus::Active;
        }
        debug!(
            event = "participant_registered",
            participant = %id,
            status = ?participant.status,
        );
        self.participants.insert(id, participant);
        Ok(id)
    }

    /// Removes a participant.
    ///
    /// # Errors
    ///
    /// - `AssignmentLocked` if a committed assignment references them
    /// - `UnknownParticipant` if no such participant exists
    pub fn remove(&mut self, id: ParticipantId) -> Result<Participant> {
        self.ensure_unlocked(id)?;
        let removed = self
            .participants
            .remove(&id)
            .ok_or(GiftForgeError::UnknownParticipant(id))?;
        debug!(event = "participant_removed", participant = %id);
        Ok(removed)
    }

    /// Active participants in registration order.
    pub fn list_active(&self) -> Vec<Participant> {
        self.participants
            .values()
            .filter(|p| p.is_active())
            .cloned()
            .collect()
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.participants.contains_key(&id)
    }

    pub fn find_by_contact(&self, contact: &str) -> Option<&Participant> {
        let key = normalize_contact(contact);
        self.participants.values().find(|p| p.contact_key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Changes a participant's status.
    ///
    /// A locked participant cannot be moved back to pending.
    pub fn set_status(&mut self, id: ParticipantId, status: ParticipationStatus) -> Result<()> {
        if status == ParticipationStatus::Pending {
            self.ensure_unlocked(id)?;
        }
        self.participant_mut(id)?.status = status;
        Ok(())
    }

    /// Replaces a participant's wishlist.
    ///
    /// Submitting a non-empty wishlist signs a pending participant up.
    pub fn update_wishlist(&mut self, id: ParticipantId, wishlist: Vec<String>) -> Result<()> {
        let participant = self.participant_mut(id)?;
        if !wishlist.is_empty() {
            participant.status = ParticipationStatus::Active;
        }
        participant.wishlist = wishlist;
        Ok(())
    }

    pub fn set_tier(&mut self, id: ParticipantId, tier: Option<TierId>) -> Result<()> {
        self.participant_mut(id)?.tier = tier;
        Ok(())
    }

    pub fn set_on_site(&mut self, id: ParticipantId, on_site: bool) -> Result<()> {
        self.participant_mut(id)?.on_site = on_site;
        Ok(())
    }

    /// Marks participants as referenced by a committed assignment.
    pub fn lock(&mut self, ids: impl IntoIterator<Item = ParticipantId>) {
        self.locked.extend(ids);
    }

    pub fn unlock_all(&mut self) {
        self.locked.clear();
    }

    pub fn is_locked(&self, id: ParticipantId) -> bool {
        self.locked.contains(&id)
    }

    /// Returns true if any participant references `tier`.
    pub fn uses_tier(&self, tier: TierId) -> bool {
        self.participants.values().any(|p| p.tier == Some(tier))
    }

    fn ensure_unlocked(&self, id: ParticipantId) -> Result<()> {
        if self.is_locked(id) {
            Err(GiftForgeError::AssignmentLocked(format!(
                "{} is part of a committed assignment",
                id
            )))
        } else {
            Ok(())
        }
    }

    fn participant_mut(&mut self, id: ParticipantId) -> Result<&mut Participant> {
        self.participants
            .get_mut(&id)
            .ok_or(GiftForgeError::UnknownParticipant(id))
    }
}
