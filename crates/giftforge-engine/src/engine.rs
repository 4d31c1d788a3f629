//! Backtracking assignment engine.
//!
//! Draws a uniformly random giver order, then walks it depth first. Each
//! giver gets a shuffled list of receivers the constraint model permits
//! against the partial assignment; exhausting a giver's list backtracks to
//! the previous giver. The search is bounded by an attempt budget and a
//! wall-clock budget, and every finished assignment is re-checked by the
//! [`validator`](crate::validator) before it is returned.

use giftforge_config::EngineConfig;
use giftforge_core::{
    AssignmentEdge, AssignmentSet, ConstraintModel, GiftForgeError, InfeasibleReason, Participant,
    ParticipantId, Result,
};
use rand::seq::SliceRandom;
use tracing::{debug, error, info, warn};

use crate::partial::PartialAssignment;
use crate::scope::SearchScope;
use crate::statistics::SearchStatistics;
use crate::termination::{AttemptCountTermination, OrTermination, Termination, TimeTermination};
use crate::validator;

/// Smallest active set a gift exchange can be drawn for.
pub const MIN_PARTICIPANTS: usize = 3;

/// A validated assignment together with the cost of finding it.
#[derive(Debug, Clone)]
pub struct Solved {
    /// Edges in the order the participants were passed in.
    pub assignments: AssignmentSet,
    pub statistics: SearchStatistics,
}

/// Finds assignments that satisfy a [`ConstraintModel`].
///
/// # Example
///
/// ```
/// use giftforge_config::EngineConfig;
/// use giftforge_core::{ConstraintModel, NewParticipant, Participant, ParticipantId};
/// use giftforge_engine::engine::AssignmentEngine;
///
/// let roster: Vec<Participant> = ["Ann", "Ben", "Cas", "Dee"]
///     .iter()
///     .enumerate()
///     .map(|(i, name)| {
///         Participant::from_request(
///             ParticipantId::new(i as u64),
///             NewParticipant::new(*name, format!("{}@example.com", name)).active(),
///         )
///     })
///     .collect();
///
/// let engine = AssignmentEngine::new(EngineConfig::new().with_random_seed(42));
/// let solved = engine.solve(&roster, &ConstraintModel::default()).unwrap();
///
/// assert_eq!(solved.assignments.len(), 4);
/// assert!(solved.assignments.iter().all(|e| !e.is_self_assignment()));
/// assert!(!solved.assignments.has_reciprocal_pair());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssignmentEngine {
    config: EngineConfig,
}

impl AssignmentEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Draws an assignment for `participants`.
    ///
    /// The RNG is seeded from `random_seed` when configured, so the same
    /// input and seed always produce the same assignment.
    ///
    /// # Errors
    ///
    /// - `InsufficientParticipants` for fewer than [`MIN_PARTICIPANTS`]
    /// - `InfeasibleConstraints` when no assignment exists, a budget runs
    ///   out, or the validator rejects the result
    pub fn solve(&self, participants: &[Participant], model: &ConstraintModel) -> Result<Solved> {
        let mut scope = SearchScope::from_seed(self.config.random_seed);
        self.solve_with_scope(participants, model, &mut scope)
    }

    /// Same as [`solve`](Self::solve) with a caller-supplied scope.
    pub fn solve_with_scope(
        &self,
        participants: &[Participant],
        model: &ConstraintModel,
        scope: &mut SearchScope,
    ) -> Result<Solved> {
        let n = participants.len();
        if n < MIN_PARTICIPANTS {
            return Err(GiftForgeError::InsufficientParticipants {
                required: MIN_PARTICIPANTS,
                actual: n,
            });
        }

        let termination = OrTermination::new((
            AttemptCountTermination::new(self.config.max_attempts()),
            TimeTermination::new(self.config.time_limit()),
        ));

        scope.start_search();
        info!(
            event = "solve_start",
            participant_count = n,
            exclusions = model.exclusions().len(),
            allow_reciprocal = model.allow_reciprocal(),
            max_attempts = self.config.max_attempts(),
            timeout_ms = self.config.time_limit().as_millis() as u64,
        );

        let registration_order: Vec<ParticipantId> = participants.iter().map(|p| p.id).collect();
        let mut giver_order = registration_order.clone();
        giver_order.shuffle(scope.rng());

        let outcome = search(&giver_order, &registration_order, model, scope, &termination);
        let statistics = scope.statistics();

        let partial = match outcome {
            Ok(partial) => partial,
            Err(reason) => {
                warn!(
                    event = "solve_infeasible",
                    participant_count = n,
                    reason = %reason,
                    attempts = statistics.attempts,
                    backtracks = statistics.backtracks,
                    duration_ms = statistics.duration_ms(),
                );
                return Err(GiftForgeError::infeasible(reason));
            }
        };

        let assignments = partial.to_assignment_set(&registration_order);
        recheck(&assignments, participants, model)?;

        info!(
            event = "solve_end",
            participant_count = n,
            attempts = statistics.attempts,
            backtracks = statistics.backtracks,
            duration_ms = statistics.duration_ms(),
        );
        Ok(Solved {
            assignments,
            statistics,
        })
    }
}

// The validator's verdict is final; a violation is logged and surfaces as
// an infeasible draw.
fn recheck(
    assignments: &AssignmentSet,
    participants: &[Participant],
    model: &ConstraintModel,
) -> Result<()> {
    validator::validate(assignments, participants, model).map_err(|violation| {
        let err = GiftForgeError::from(violation);
        error!(event = "validation_rejected", error = %err);
        GiftForgeError::infeasible(InfeasibleReason::ValidationRejected)
    })
}

/// Candidate receivers for one giver, consumed front to back.
struct Frame {
    candidates: Vec<ParticipantId>,
    next: usize,
}

impl Frame {
    fn next_candidate(&mut self) -> Option<ParticipantId> {
        let candidate = self.candidates.get(self.next).copied()?;
        self.next += 1;
        Some(candidate)
    }
}

fn search<T: Termination>(
    givers: &[ParticipantId],
    receivers: &[ParticipantId],
    model: &ConstraintModel,
    scope: &mut SearchScope,
    termination: &T,
) -> std::result::Result<PartialAssignment, InfeasibleReason> {
    let n = givers.len();
    let mut partial = PartialAssignment::with_capacity(n);
    let mut frames = Vec::with_capacity(n);
    frames.push(candidates(0, givers, receivers, &partial, model, scope));

    while !frames.is_empty() {
        let depth = frames.len() - 1;
        let giver = givers[depth];
        partial.unassign(giver);

        match frames[depth].next_candidate() {
            Some(receiver) => {
                if let Some(reason) = termination.check(scope) {
                    return Err(reason);
                }
                scope.record_attempt();
                partial.assign(giver, receiver);

                if depth + 1 == n {
                    return Ok(partial);
                }
                let next = candidates(depth + 1, givers, receivers, &partial, model, scope);
                frames.push(next);
            }
            None => {
                frames.pop();
                if !frames.is_empty() {
                    let backtracks = scope.record_backtrack();
                    debug!(
                        event = "backtrack",
                        giver = %giver,
                        depth = depth,
                        backtracks = backtracks,
                    );
                }
            }
        }
    }

    Err(InfeasibleReason::SearchExhausted)
}

// Receivers still free for `givers[depth]`, shuffled.
fn candidates(
    depth: usize,
    givers: &[ParticipantId],
    receivers: &[ParticipantId],
    partial: &PartialAssignment,
    model: &ConstraintModel,
    scope: &mut SearchScope,
) -> Frame {
    let giver = givers[depth];
    let lookahead = depth + 2 == givers.len();

    let mut candidates: Vec<ParticipantId> = receivers
        .iter()
        .copied()
        .filter(|&receiver| !partial.is_receiver_taken(receiver))
        .filter(|&receiver| {
            let edge = AssignmentEdge::new(giver, receiver);
            model.is_permitted(edge, partial)
                && (!lookahead
                    || leaves_last_giver_a_receiver(edge, givers, receivers, partial, model))
        })
        .collect();
    candidates.shuffle(scope.rng());

    Frame {
        candidates,
        next: 0,
    }
}

// With `edge` placed by the second-to-last giver exactly one receiver is
// left; the last giver must be allowed to take it.
fn leaves_last_giver_a_receiver(
    edge: AssignmentEdge,
    givers: &[ParticipantId],
    receivers: &[ParticipantId],
    partial: &PartialAssignment,
    model: &ConstraintModel,
) -> bool {
    let Some(&last) = givers.last() else {
        return false;
    };
    let extended = partial.extended(edge);
    receivers
        .iter()
        .copied()
        .filter(|&r| r != edge.receiver && !partial.is_receiver_taken(r))
        .all(|remaining| model.is_permitted(AssignmentEdge::new(last, remaining), &extended))
}
