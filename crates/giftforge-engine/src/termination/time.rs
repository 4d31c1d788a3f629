//! Time-based termination.

use std::time::Duration;

use giftforge_core::InfeasibleReason;

use super::Termination;
use crate::scope::SearchScope;

/// Terminates after a time limit.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use giftforge_engine::termination::TimeTermination;
///
/// // Terminate after 2 seconds
/// let term = TimeTermination::new(Duration::from_secs(2));
///
/// // Or use the convenience constructor
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Termination for TimeTermination {
    fn check(&self, scope: &SearchScope) -> Option<InfeasibleReason> {
        scope
            .elapsed()
            .is_some_and(|e| e >= self.limit)
            .then_some(InfeasibleReason::TimeLimit(self.limit))
    }
}
