//! Partial assignment built up during search.
//!
//! Keeps the giver -> receiver mapping together with its inverse so that
//! "is this receiver taken?" and "whom does this giver draw?" are both
//! O(1) while the engine assigns and unassigns edges.

use std::collections::HashMap;

use giftforge_core::{AssignmentEdge, AssignmentSet, AssignmentView, ParticipantId};

/// Giver -> receiver edges chosen so far, indexed both ways.
///
/// # Example
///
/// ```
/// use giftforge_core::{AssignmentView, ParticipantId};
/// use giftforge_engine::partial::PartialAssignment;
///
/// let a = ParticipantId::new(0);
/// let b = ParticipantId::new(1);
///
/// let mut partial = PartialAssignment::with_capacity(2);
/// partial.assign(a, b);
///
/// assert_eq!(partial.receiver_of(a), Some(b));
/// assert_eq!(partial.giver_of(b), Some(a));
/// assert!(partial.is_receiver_taken(b));
///
/// partial.unassign(a);
/// assert!(partial.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PartialAssignment {
    forward: HashMap<ParticipantId, ParticipantId>,
    inverse: HashMap<ParticipantId, ParticipantId>,
}

impl PartialAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: HashMap::with_capacity(capacity),
            inverse: HashMap::with_capacity(capacity),
        }
    }

    /// Records `giver -> receiver`, replacing any earlier choice of `giver`.
    pub fn assign(&mut self, giver: ParticipantId, receiver: ParticipantId) {
        if let Some(previous) = self.forward.insert(giver, receiver) {
            self.inverse.remove(&previous);
        }
        self.inverse.insert(receiver, giver);
    }

    /// Drops the edge leaving `giver`, returning its receiver.
    pub fn unassign(&mut self, giver: ParticipantId) -> Option<ParticipantId> {
        let receiver = self.forward.remove(&giver)?;
        self.inverse.remove(&receiver);
        Some(receiver)
    }

    #[inline]
    pub fn giver_of(&self, receiver: ParticipantId) -> Option<ParticipantId> {
        self.inverse.get(&receiver).copied()
    }

    #[inline]
    pub fn is_receiver_taken(&self, receiver: ParticipantId) -> bool {
        self.inverse.contains_key(&receiver)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// View of this assignment with one extra edge, without mutating it.
    pub fn extended(&self, edge: AssignmentEdge) -> Extended<'_> {
        Extended { base: self, edge }
    }

    /// Materializes the edges in `giver_order`.
    ///
    /// Givers without a receiver are skipped.
    pub fn to_assignment_set(&self, giver_order: &[ParticipantId]) -> AssignmentSet {
        giver_order
            .iter()
            .filter_map(|&giver| {
                self.forward
                    .get(&giver)
                    .map(|&receiver| AssignmentEdge::new(giver, receiver))
            })
            .collect()
    }
}

impl AssignmentView for PartialAssignment {
    #[inline]
    fn receiver_of(&self, giver: ParticipantId) -> Option<ParticipantId> {
        self.forward.get(&giver).copied()
    }
}

/// A [`PartialAssignment`] plus one hypothetical edge.
#[derive(Debug, Clone, Copy)]
pub struct Extended<'a> {
    base: &'a PartialAssignment,
    edge: AssignmentEdge,
}

impl AssignmentView for Extended<'_> {
    fn receiver_of(&self, giver: ParticipantId) -> Option<ParticipantId> {
        if giver == self.edge.giver {
            Some(self.edge.receiver)
        } else {
            self.base.receiver_of(giver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> ParticipantId {
        ParticipantId::new(n)
    }

    #[test]
    fn test_assign_and_lookup() {
        let mut partial = PartialAssignment::new();
        partial.assign(id(0), id(1));
        partial.assign(id(1), id(2));

        assert_eq!(partial.receiver_of(id(0)), Some(id(1)));
        assert_eq!(partial.giver_of(id(2)), Some(id(1)));
        assert_eq!(partial.giver_of(id(0)), None);
        assert_eq!(partial.len(), 2);
    }

    #[test]
    fn test_reassign_frees_previous_receiver() {
        let mut partial = PartialAssignment::new();
        partial.assign(id(0), id(1));
        partial.assign(id(0), id(2));

        assert!(!partial.is_receiver_taken(id(1)));
        assert!(partial.is_receiver_taken(id(2)));
        assert_eq!(partial.len(), 1);
    }

    #[test]
    fn test_unassign() {
        let mut partial = PartialAssignment::new();
        partial.assign(id(0), id(1));

        assert_eq!(partial.unassign(id(0)), Some(id(1)));
        assert_eq!(partial.unassign(id(0)), None);
        assert!(!partial.is_receiver_taken(id(1)));
    }

    #[test]
    fn test_extended_view() {
        let mut partial = PartialAssignment::new();
        partial.assign(id(0), id(1));

        let view = partial.extended(AssignmentEdge::new(id(1), id(2)));
        assert_eq!(view.receiver_of(id(0)), Some(id(1)));
        assert_eq!(view.receiver_of(id(1)), Some(id(2)));
        assert_eq!(partial.receiver_of(id(1)), None);
    }

    #[test]
    fn test_to_assignment_set_keeps_giver_order() {
        let mut partial = PartialAssignment::new();
        partial.assign(id(2), id(0));
        partial.assign(id(0), id(1));
        partial.assign(id(1), id(2));

        let set = partial.to_assignment_set(&[id(1), id(2), id(0)]);
        let givers: Vec<ParticipantId> = set.iter().map(|e| e.giver).collect();
        assert_eq!(givers, vec![id(1), id(2), id(0)]);
    }
}
