//! Brute-force reference for small rosters.
//!
//! Enumerates every permutation of the roster and keeps the ones whose
//! edges all pass the constraint model. Only practical up to about eight
//! participants.

use giftforge_core::{AssignmentEdge, AssignmentSet, ConstraintModel, Participant};

/// All assignments of `participants` that satisfy `model`.
///
/// # Example
///
/// ```
/// use giftforge_core::ConstraintModel;
/// use giftforge_test::{enumerate_valid, roster};
///
/// // Derangements of 3 are the two 3-cycles.
/// let valid = enumerate_valid(&roster(3), &ConstraintModel::default());
/// assert_eq!(valid.len(), 2);
/// ```
pub fn enumerate_valid(participants: &[Participant], model: &ConstraintModel) -> Vec<AssignmentSet> {
    let n = participants.len();
    let mut valid = Vec::new();
    let mut perm: Vec<usize> = (0..n).collect();
    permute(&mut perm, 0, &mut |perm| {
        let set: AssignmentSet = perm
            .iter()
            .enumerate()
            .map(|(giver, &receiver)| {
                AssignmentEdge::new(participants[giver].id, participants[receiver].id)
            })
            .collect();
        if set.iter().all(|&edge| model.check(edge, &set).is_ok()) {
            valid.push(set);
        }
    });
    valid
}

/// Returns true if at least one valid assignment exists.
pub fn is_feasible(participants: &[Participant], model: &ConstraintModel) -> bool {
    !enumerate_valid(participants, model).is_empty()
}

/// Number of cycles in the permutation described by `set`.
pub fn cycle_count(set: &AssignmentSet) -> usize {
    let mut seen = std::collections::HashSet::new();
    let mut cycles = 0;
    for edge in set.iter() {
        if seen.contains(&edge.giver) {
            continue;
        }
        cycles += 1;
        let mut current = edge.giver;
        while seen.insert(current) {
            match set.iter().find(|e| e.giver == current) {
                Some(next) => current = next.receiver,
                None => break,
            }
        }
    }
    cycles
}

fn permute(perm: &mut Vec<usize>, k: usize, visit: &mut dyn FnMut(&[usize])) {
    if k == perm.len() {
        visit(perm);
        return;
    }
    for i in k..perm.len() {
        perm.swap(k, i);
        permute(perm, k + 1, visit);
        perm.swap(k, i);
    }
}
