//! Tests for the constraint model.

use crate::assignment::{AssignmentEdge, AssignmentSet};
use crate::constraint::*;
use crate::domain::{NewParticipant, Participant, ParticipantId, TierTable};

fn id(n: u64) -> ParticipantId {
    ParticipantId::new(n)
}

fn edge(giver: u64, receiver: u64) -> AssignmentEdge {
    AssignmentEdge::new(id(giver), id(receiver))
}

fn pair(a: u64, b: u64) -> ExclusionPair {
    ExclusionPair::new(id(a), id(b)).unwrap()
}

#[test]
fn test_exclusion_pair_is_unordered() {
    assert_eq!(pair(1, 2), pair(2, 1));
    assert_eq!(pair(2, 1).members(), (id(1), id(2)));
}

#[test]
fn test_exclusion_set_symmetric() {
    let set: ExclusionSet = [pair(3, 1)].into_iter().collect();
    assert!(set.contains(id(1), id(3)));
    assert!(set.contains(id(3), id(1)));
    assert!(!set.contains(id(1), id(2)));
    assert!(!set.contains(id(1), id(1)));
}

#[test]
fn test_exclusion_set_insert_twice() {
    let mut set = ExclusionSet::new();
    assert!(set.insert(pair(1, 2)));
    assert!(!set.insert(pair(2, 1)));
    assert_eq!(set.len(), 1);
}

#[test]
fn test_exclusion_set_forget() {
    let mut set: ExclusionSet = [pair(1, 2), pair(2, 3), pair(3, 4)].into_iter().collect();
    set.forget(id(2));
    assert_eq!(set.len(), 1);
    assert!(set.contains(id(4), id(3)));
}

#[test]
fn test_self_assignment_rejected() {
    let model = ConstraintModel::default();
    let empty = AssignmentSet::default();
    assert_eq!(
        model.check(edge(4, 4), &empty),
        Err(Violation::SelfAssignment(id(4)))
    );
}

#[test]
fn test_exclusion_rejected_both_directions() {
    let model = ConstraintModel::new([pair(0, 1)].into_iter().collect());
    let empty = AssignmentSet::default();

    assert_eq!(
        model.check(edge(0, 1), &empty),
        Err(Violation::Excluded(edge(0, 1)))
    );
    assert_eq!(
        model.check(edge(1, 0), &empty),
        Err(Violation::Excluded(edge(1, 0)))
    );
    assert!(model.is_permitted(edge(0, 2), &empty));
}

#[test]
fn test_reciprocal_rejected_unless_allowed() {
    let partial = AssignmentSet::new(vec![edge(0, 1)]);

    let strict = ConstraintModel::default();
    assert_eq!(
        strict.check(edge(1, 0), &partial),
        Err(Violation::Reciprocal(edge(1, 0)))
    );
    assert!(strict.is_permitted(edge(1, 2), &partial));

    let relaxed = ConstraintModel::default().with_allow_reciprocal(true);
    assert!(relaxed.is_permitted(edge(1, 0), &partial));
}

#[test]
fn test_self_check_precedes_exclusion() {
    let model = ConstraintModel::new([pair(0, 1)].into_iter().collect());
    let empty = AssignmentSet::default();
    assert!(matches!(
        model.check(edge(0, 0), &empty),
        Err(Violation::SelfAssignment(_))
    ));
}

fn tiered_roster(tiers: &mut TierTable) -> Vec<Participant> {
    let premium = tiers.add("Premium", 1500).unwrap();
    vec![
        Participant::from_request(id(0), NewParticipant::new("Base", "base@example.com")),
        Participant::from_request(
            id(1),
            NewParticipant::new("Premium", "premium@example.com").with_tier(premium),
        ),
        Participant::from_request(
            id(2),
            NewParticipant::new("Generous", "generous@example.com").with_contribution_floor(100),
        ),
    ]
}

#[test]
fn test_min_floor_rule() {
    let mut tiers = TierTable::new(500);
    let roster = tiered_roster(&mut tiers);
    let model = ConstraintModel::default()
        .with_tier_rule(TierRule::min_floor(&roster, &tiers).unwrap());
    let empty = AssignmentSet::default();

    // Premium giver (floor 1500) cannot give to a base receiver (minimum 500).
    assert_eq!(
        model.check(edge(1, 0), &empty),
        Err(Violation::TierBelowFloor {
            edge: edge(1, 0),
            receiver_minimum: 500,
            giver_floor: 1500,
        })
    );
    assert!(model.is_permitted(edge(0, 1), &empty));
    // Explicit floor overrides the giver's own tier minimum.
    assert!(model.is_permitted(edge(2, 0), &empty));
}

#[test]
fn test_min_floor_unknown_tier() {
    let tiers = TierTable::new(500);
    let mut roster = vec![Participant::from_request(
        id(0),
        NewParticipant::new("Lost", "lost@example.com"),
    )];
    roster[0].tier = Some(crate::domain::TierId::new(7));
    assert!(TierRule::min_floor(&roster, &tiers).is_err());
}

#[test]
fn test_tier_rule_off_permits_everything() {
    let model = ConstraintModel::default();
    assert_eq!(model.tier_rule(), &TierRule::Off);
    assert!(model.is_permitted(edge(1, 0), &AssignmentSet::default()));
}

#[test]
fn test_assignment_set_lookups() {
    let set: AssignmentSet = [edge(0, 2), edge(2, 1), edge(1, 0)].into_iter().collect();

    assert_eq!(set.len(), 3);
    assert_eq!(set.receiver_of(id(0)), Some(id(2)));
    assert_eq!(set.giver_of(id(2)), Some(id(0)));
    assert!(set.contains_edge(edge(2, 1)));
    assert!(!set.contains_edge(edge(1, 2)));
    assert!(set.references(id(1)));
    assert!(!set.references(id(7)));
    assert_eq!(
        set.participants().collect::<Vec<_>>(),
        vec![id(0), id(2), id(1)]
    );
}

#[test]
fn test_assignment_set_reciprocal_detection() {
    let cycle = AssignmentSet::new(vec![edge(0, 1), edge(1, 2), edge(2, 3), edge(3, 0)]);
    assert!(!cycle.has_reciprocal_pair());

    let pairs = AssignmentSet::new(vec![edge(0, 1), edge(1, 0), edge(2, 3), edge(3, 2)]);
    assert!(pairs.has_reciprocal_pair());
}
