//! Termination conditions for the assignment search.
//!
//! A search stops with an infeasibility result as soon as any condition
//! fires, so pathological constraint sets can never block a caller.

mod attempt_count;
mod composite;
mod time;

use std::fmt::Debug;

use giftforge_core::InfeasibleReason;

use crate::scope::SearchScope;

pub use attempt_count::AttemptCountTermination;
pub use composite::OrTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
pub trait Termination: Send + Debug {
    /// Returns why the search must stop, or `None` to keep going.
    fn check(&self, scope: &SearchScope) -> Option<InfeasibleReason>;

    /// Returns true if searching should terminate.
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.check(scope).is_some()
    }
}

#[cfg(test)]
mod tests;
