//! Constraint model.
//!
//! The rules an assignment must satisfy, expressed as a pure predicate over
//! an edge and the edges chosen so far. The engine uses it to prune
//! candidates during construction and the validator re-runs it against the
//! finished set, so both always agree on what is permitted.
//!
//! Rules are checked in a fixed order:
//! 1. self-assignment
//! 2. exclusion pairs
//! 3. reciprocal pairs (unless allowed)
//! 4. tier compatibility (when enabled)

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

use crate::assignment::AssignmentEdge;
use crate::domain::{Participant, ParticipantId, TierTable};
use crate::error::Result;

/// Read access to the giver -> receiver mapping built so far.
///
/// Implemented by the engine's partial assignment and by a finished
/// [`AssignmentSet`](crate::AssignmentSet).
pub trait AssignmentView {
    /// Returns the receiver already assigned to `giver`, if any.
    fn receiver_of(&self, giver: ParticipantId) -> Option<ParticipantId>;
}

/// An invariant an assignment broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{0} is assigned to themselves")]
    SelfAssignment(ParticipantId),

    #[error("edge {0} crosses an exclusion pair")]
    Excluded(AssignmentEdge),

    #[error("edge {0} closes a reciprocal pair")]
    Reciprocal(AssignmentEdge),

    #[error("edge {edge}: receiver tier minimum {receiver_minimum} is below giver floor {giver_floor}")]
    TierBelowFloor {
        edge: AssignmentEdge,
        receiver_minimum: u64,
        giver_floor: u64,
    },

    #[error("{0} has no receiver")]
    MissingGiver(ParticipantId),

    #[error("{0} gives more than one gift")]
    DuplicateGiver(ParticipantId),

    #[error("{0} receives more than one gift")]
    DuplicateReceiver(ParticipantId),

    #[error("{0} receives no gift")]
    MissingReceiver(ParticipantId),

    #[error("{0} is not an active participant")]
    UnknownParticipant(ParticipantId),
}

/// Unordered pair of participants that must never draw each other.
///
/// # Example
///
/// ```
/// use giftforge_core::{ExclusionPair, ParticipantId};
///
/// let a = ParticipantId::new(1);
/// let b = ParticipantId::new(2);
///
/// assert_eq!(ExclusionPair::new(a, b), ExclusionPair::new(b, a));
/// assert!(ExclusionPair::new(a, a).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusionPair {
    low: ParticipantId,
    high: ParticipantId,
}

impl ExclusionPair {
    /// Creates a normalized pair. Returns `None` when both ids are equal.
    pub fn new(a: ParticipantId, b: ParticipantId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn members(&self) -> (ParticipantId, ParticipantId) {
        (self.low, self.high)
    }

    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.low == participant || self.high == participant
    }
}

/// Symmetric set of exclusion pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusionSet {
    pairs: BTreeSet<ExclusionPair>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pair; returns false if it was already present.
    pub fn insert(&mut self, pair: ExclusionPair) -> bool {
        self.pairs.insert(pair)
    }

    pub fn remove(&mut self, a: ParticipantId, b: ParticipantId) -> bool {
        ExclusionPair::new(a, b).is_some_and(|pair| self.pairs.remove(&pair))
    }

    /// Order-independent membership test.
    pub fn contains(&self, a: ParticipantId, b: ParticipantId) -> bool {
        ExclusionPair::new(a, b).is_some_and(|pair| self.pairs.contains(&pair))
    }

    /// Drops every pair involving `participant`.
    pub fn forget(&mut self, participant: ParticipantId) {
        self.pairs.retain(|pair| !pair.involves(participant));
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExclusionPair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<ExclusionPair> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = ExclusionPair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Tier compatibility rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TierRule {
    /// Tiers never restrict an assignment.
    #[default]
    Off,
    /// A receiver's tier minimum must reach the giver's contribution floor.
    ///
    /// Participants missing from either map count as zero.
    MinFloor {
        receiver_minimum: HashMap<ParticipantId, u64>,
        giver_floor: HashMap<ParticipantId, u64>,
    },
}

impl TierRule {
    /// Builds a min-floor rule from participant tiers.
    ///
    /// A giver's floor is its explicit contribution floor, falling back to
    /// the minimum of its own tier.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTier` if a participant references a tier missing from
    /// `tiers`.
    pub fn min_floor(participants: &[Participant], tiers: &TierTable) -> Result<Self> {
        let mut receiver_minimum = HashMap::with_capacity(participants.len());
        let mut giver_floor = HashMap::with_capacity(participants.len());
        for participant in participants {
            let minimum = tiers.resolve(participant.tier)?.minimum;
            receiver_minimum.insert(participant.id, minimum);
            giver_floor.insert(
                participant.id,
                participant.contribution_floor.unwrap_or(minimum),
            );
        }
        Ok(TierRule::MinFloor {
            receiver_minimum,
            giver_floor,
        })
    }

    fn check(&self, edge: AssignmentEdge) -> std::result::Result<(), Violation> {
        match self {
            TierRule::Off => Ok(()),
            TierRule::MinFloor {
                receiver_minimum,
                giver_floor,
            } => {
                let receiver_minimum = receiver_minimum.get(&edge.receiver).copied().unwrap_or(0);
                let giver_floor = giver_floor.get(&edge.giver).copied().unwrap_or(0);
                if receiver_minimum >= giver_floor {
                    Ok(())
                } else {
                    Err(Violation::TierBelowFloor {
                        edge,
                        receiver_minimum,
                        giver_floor,
                    })
                }
            }
        }
    }
}

/// The rules one assignment run must satisfy.
///
/// # Example
///
/// ```
/// use giftforge_core::{
///     AssignmentEdge, AssignmentSet, ConstraintModel, ExclusionPair, ExclusionSet,
///     ParticipantId,
/// };
///
/// let a = ParticipantId::new(0);
/// let b = ParticipantId::new(1);
/// let c = ParticipantId::new(2);
///
/// let exclusions: ExclusionSet = ExclusionPair::new(a, b).into_iter().collect();
/// let model = ConstraintModel::new(exclusions);
/// let empty = AssignmentSet::default();
///
/// assert!(!model.is_permitted(AssignmentEdge::new(a, a), &empty));
/// assert!(!model.is_permitted(AssignmentEdge::new(b, a), &empty));
/// assert!(model.is_permitted(AssignmentEdge::new(a, c), &empty));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintModel {
    allow_reciprocal: bool,
    exclusions: ExclusionSet,
    tier_rule: TierRule,
}

impl ConstraintModel {
    /// Creates a model with reciprocal pairs forbidden and tiers ignored.
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self {
            allow_reciprocal: false,
            exclusions,
            tier_rule: TierRule::Off,
        }
    }

    pub fn with_allow_reciprocal(mut self, allow: bool) -> Self {
        self.allow_reciprocal = allow;
        self
    }

    pub fn with_tier_rule(mut self, rule: TierRule) -> Self {
        self.tier_rule = rule;
        self
    }

    pub fn allow_reciprocal(&self) -> bool {
        self.allow_reciprocal
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn tier_rule(&self) -> &TierRule {
        &self.tier_rule
    }

    /// Checks `edge` against every rule, given the edges in `view`.
    ///
    /// Returns the first rule the edge breaks.
    pub fn check<V>(&self, edge: AssignmentEdge, view: &V) -> std::result::Result<(), Violation>
    where
        V: AssignmentView + ?Sized,
    {
        if edge.is_self_assignment() {
            return Err(Violation::SelfAssignment(edge.giver));
        }
        if self.exclusions.contains(edge.giver, edge.receiver) {
            return Err(Violation::Excluded(edge));
        }
        if !self.allow_reciprocal && view.receiver_of(edge.receiver) == Some(edge.giver) {
            return Err(Violation::Reciprocal(edge));
        }
        self.tier_rule.check(edge)
    }

    /// Returns true if `edge` breaks no rule given the edges in `view`.
    #[inline]
    pub fn is_permitted<V>(&self, edge: AssignmentEdge, view: &V) -> bool
    where
        V: AssignmentView + ?Sized,
    {
        self.check(edge, view).is_ok()
    }
}
