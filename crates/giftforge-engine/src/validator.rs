//! Independent re-check of a finished assignment.
//!
//! The validator shares nothing with the search bookkeeping except the
//! [`ConstraintModel`]. It checks the permutation structure first and then
//! every edge against the complete set, returning the first violation.

use std::collections::HashSet;

use giftforge_core::{AssignmentSet, ConstraintModel, Participant, ParticipantId, Violation};

/// Validates `assignments` for the active set `participants`.
///
/// # Example
///
/// ```
/// use giftforge_core::{
///     AssignmentEdge, AssignmentSet, ConstraintModel, NewParticipant, Participant,
///     ParticipantId, Violation,
/// };
/// use giftforge_engine::validator::validate;
///
/// let roster: Vec<Participant> = ["A", "B", "C"]
///     .iter()
///     .enumerate()
///     .map(|(i, name)| {
///         Participant::from_request(
///             ParticipantId::new(i as u64),
///             NewParticipant::new(*name, format!("{}@example.com", name)).active(),
///         )
///     })
///     .collect();
/// let [a, b, c] = [0, 1, 2].map(ParticipantId::new);
/// let model = ConstraintModel::default();
///
/// let cycle = AssignmentSet::new(vec![
///     AssignmentEdge::new(a, b),
///     AssignmentEdge::new(b, c),
///     AssignmentEdge::new(c, a),
/// ]);
/// assert_eq!(validate(&cycle, &roster, &model), Ok(()));
///
/// let fixed_point = AssignmentSet::new(vec![
///     AssignmentEdge::new(a, a),
///     AssignmentEdge::new(b, c),
///     AssignmentEdge::new(c, b),
/// ]);
/// assert_eq!(
///     validate(&fixed_point, &roster, &model),
///     Err(Violation::SelfAssignment(a))
/// );
/// ```
pub fn validate(
    assignments: &AssignmentSet,
    participants: &[Participant],
    model: &ConstraintModel,
) -> Result<(), Violation> {
    check_structure(assignments, participants)?;
    for &edge in assignments.iter() {
        model.check(edge, assignments)?;
    }
    Ok(())
}

/// Returns true if `assignments` passes [`validate`].
pub fn is_valid(
    assignments: &AssignmentSet,
    participants: &[Participant],
    model: &ConstraintModel,
) -> bool {
    validate(assignments, participants, model).is_ok()
}

// Every edge references a known participant and the edges form a
// permutation of the participant set.
fn check_structure(
    assignments: &AssignmentSet,
    participants: &[Participant],
) -> Result<(), Violation> {
    let known: HashSet<ParticipantId> = participants.iter().map(|p| p.id).collect();
    let mut givers = HashSet::with_capacity(known.len());
    let mut receivers = HashSet::with_capacity(known.len());

    for edge in assignments.iter() {
        if !known.contains(&edge.giver) {
            return Err(Violation::UnknownParticipant(edge.giver));
        }
        if !known.contains(&edge.receiver) {
            return Err(Violation::UnknownParticipant(edge.receiver));
        }
        if !givers.insert(edge.giver) {
            return Err(Violation::DuplicateGiver(edge.giver));
        }
        if !receivers.insert(edge.receiver) {
            return Err(Violation::DuplicateReceiver(edge.receiver));
        }
    }

    if let Some(p) = participants.iter().find(|p| !givers.contains(&p.id)) {
        return Err(Violation::MissingGiver(p.id));
    }
    if let Some(p) = participants.iter().find(|p| !receivers.contains(&p.id)) {
        return Err(Violation::MissingReceiver(p.id));
    }
    Ok(())
}
