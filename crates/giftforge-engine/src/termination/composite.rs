//! Composite termination (OR).
//!
//! Uses macro-generated tuple implementations for zero type erasure.

use giftforge_core::InfeasibleReason;

use super::Termination;
use crate::scope::SearchScope;

/// Combines multiple terminations with OR logic (any must terminate).
///
/// Wraps a tuple of terminations. Reports the reason of the first child
/// that fires, in tuple order.
///
/// # Examples
///
/// ```
/// use giftforge_engine::termination::{
///     AttemptCountTermination, OrTermination, TimeTermination,
/// };
///
/// // Terminate after 500 ms OR 1000 attempts
/// let termination = OrTermination::new((
///     TimeTermination::millis(500),
///     AttemptCountTermination::new(1000),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for OR tuples.
macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn check(&self, scope: &SearchScope) -> Option<InfeasibleReason> {
                $(
                    if let Some(reason) = (self.0).$idx.check(scope) {
                        return Some(reason);
                    }
                )+
                None
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
