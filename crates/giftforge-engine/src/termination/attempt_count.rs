//! Attempt count termination.

use giftforge_core::InfeasibleReason;

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once a number of candidate placements has been tried.
///
/// # Example
///
/// ```
/// use giftforge_engine::termination::AttemptCountTermination;
///
/// // Give up after 10 000 attempts
/// let term = AttemptCountTermination::new(10_000);
/// ```
#[derive(Debug, Clone)]
pub struct AttemptCountTermination {
    limit: u64,
}

impl AttemptCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for AttemptCountTermination {
    fn check(&self, scope: &SearchScope) -> Option<InfeasibleReason> {
        (scope.attempts() >= self.limit).then_some(InfeasibleReason::AttemptLimit(self.limit))
    }
}
