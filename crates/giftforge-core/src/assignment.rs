//! Assignment edges and assignment sets.

use std::collections::HashMap;
use std::fmt;

use crate::constraint::AssignmentView;
use crate::domain::ParticipantId;

/// Ordered pair: `giver` buys a gift for `receiver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentEdge {
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
}

impl AssignmentEdge {
    #[inline]
    pub const fn new(giver: ParticipantId, receiver: ParticipantId) -> Self {
        Self { giver, receiver }
    }

    /// The edge pointing the other way.
    #[inline]
    pub const fn reversed(&self) -> Self {
        Self {
            giver: self.receiver,
            receiver: self.giver,
        }
    }

    #[inline]
    pub fn is_self_assignment(&self) -> bool {
        self.giver == self.receiver
    }
}

impl fmt::Display for AssignmentEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.giver, self.receiver)
    }
}

/// The edges produced by one assignment run.
///
/// Holds edges in the order they were produced together with lookup
/// indexes in both directions. Construction does not check invariants;
/// that is the validator's job.
///
/// # Example
///
/// ```
/// use giftforge_core::{AssignmentEdge, AssignmentSet, AssignmentView, ParticipantId};
///
/// let a = ParticipantId::new(0);
/// let b = ParticipantId::new(1);
/// let c = ParticipantId::new(2);
///
/// let set = AssignmentSet::new(vec![
///     AssignmentEdge::new(a, b),
///     AssignmentEdge::new(b, c),
///     AssignmentEdge::new(c, a),
/// ]);
///
/// assert_eq!(set.receiver_of(a), Some(b));
/// assert_eq!(set.giver_of(a), Some(c));
/// assert!(!set.has_reciprocal_pair());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssignmentSet {
    edges: Vec<AssignmentEdge>,
    by_giver: HashMap<ParticipantId, ParticipantId>,
    by_receiver: HashMap<ParticipantId, ParticipantId>,
}

impl AssignmentSet {
    pub fn new(edges: Vec<AssignmentEdge>) -> Self {
        let mut by_giver = HashMap::with_capacity(edges.len());
        let mut by_receiver = HashMap::with_capacity(edges.len());
        for edge in &edges {
            by_giver.entry(edge.giver).or_insert(edge.receiver);
            by_receiver.entry(edge.receiver).or_insert(edge.giver);
        }
        Self {
            edges,
            by_giver,
            by_receiver,
        }
    }

    pub fn edges(&self) -> &[AssignmentEdge] {
        &self.edges
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssignmentEdge> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns who `receiver` was drawn by.
    pub fn giver_of(&self, receiver: ParticipantId) -> Option<ParticipantId> {
        self.by_receiver.get(&receiver).copied()
    }

    pub fn contains_edge(&self, edge: AssignmentEdge) -> bool {
        self.by_giver.get(&edge.giver) == Some(&edge.receiver)
    }

    /// Returns true if the set references `participant` as giver or receiver.
    pub fn references(&self, participant: ParticipantId) -> bool {
        self.by_giver.contains_key(&participant) || self.by_receiver.contains_key(&participant)
    }

    /// All participants referenced by the set, in giver order.
    pub fn participants(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.edges.iter().map(|e| e.giver)
    }

    /// Returns true if any two participants drew each other.
    pub fn has_reciprocal_pair(&self) -> bool {
        self.edges
            .iter()
            .any(|e| !e.is_self_assignment() && self.contains_edge(e.reversed()))
    }
}

impl AssignmentView for AssignmentSet {
    fn receiver_of(&self, giver: ParticipantId) -> Option<ParticipantId> {
        self.by_giver.get(&giver).copied()
    }
}

impl PartialEq for AssignmentSet {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges
    }
}

impl Eq for AssignmentSet {}

impl<'a> IntoIterator for &'a AssignmentSet {
    type Item = &'a AssignmentEdge;
    type IntoIter = std::slice::Iter<'a, AssignmentEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

impl FromIterator<AssignmentEdge> for AssignmentSet {
    fn from_iter<I: IntoIterator<Item = AssignmentEdge>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
