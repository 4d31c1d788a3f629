//! Tests for termination conditions.

use std::time::Duration;

use super::*;

#[test]
fn test_attempt_count_termination() {
    let mut scope = SearchScope::with_seed(0);
    scope.start_search();
    let term = AttemptCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.record_attempt();
    scope.record_attempt();
    assert!(!term.is_terminated(&scope));
    scope.record_attempt();
    assert_eq!(term.check(&scope), Some(InfeasibleReason::AttemptLimit(3)));
}

#[test]
fn test_time_termination_not_started() {
    let scope = SearchScope::with_seed(0);
    let term = TimeTermination::new(Duration::ZERO);

    // No clock until the search starts.
    assert!(!term.is_terminated(&scope));
}

#[test]
fn test_time_termination_elapsed() {
    let mut scope = SearchScope::with_seed(0);
    scope.start_search();
    let term = TimeTermination::new(Duration::ZERO);

    assert_eq!(
        term.check(&scope),
        Some(InfeasibleReason::TimeLimit(Duration::ZERO))
    );
}

#[test]
fn test_time_termination_generous_limit() {
    let mut scope = SearchScope::with_seed(0);
    scope.start_search();
    let term = TimeTermination::new(Duration::from_secs(3600));

    assert!(!term.is_terminated(&scope));
}

#[test]
fn test_or_termination_reports_first_reason() {
    let mut scope = SearchScope::with_seed(0);
    scope.start_search();
    scope.record_attempt();

    let term = OrTermination::new((
        AttemptCountTermination::new(1),
        TimeTermination::new(Duration::ZERO),
    ));
    assert_eq!(term.check(&scope), Some(InfeasibleReason::AttemptLimit(1)));
}

#[test]
fn test_or_termination_none_fired() {
    let mut scope = SearchScope::with_seed(0);
    scope.start_search();

    let term = OrTermination::new((
        AttemptCountTermination::new(10),
        TimeTermination::new(Duration::from_secs(3600)),
    ));
    assert!(!term.is_terminated(&scope));
}
