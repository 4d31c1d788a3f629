//! Search statistics.

use std::fmt;
use std::time::Duration;

/// Counters collected by one assignment search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Candidate receivers tried across all givers.
    pub attempts: u64,
    /// Times the search stepped back to an earlier giver.
    pub backtracks: u64,
    /// Wall-clock time spent searching.
    pub duration: Duration,
}

impl SearchStatistics {
    /// Attempts per second, or zero for an instantaneous search.
    pub fn attempts_per_second(&self) -> u64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (self.attempts as f64 / secs) as u64
        } else {
            0
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attempts, {} backtracks in {} ms",
            self.attempts,
            self.backtracks,
            self.duration_ms()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempts_per_second() {
        let stats = SearchStatistics {
            attempts: 500,
            backtracks: 3,
            duration: Duration::from_millis(500),
        };
        assert_eq!(stats.attempts_per_second(), 1000);
        assert_eq!(stats.duration_ms(), 500);
    }

    #[test]
    fn test_zero_duration() {
        let stats = SearchStatistics::default();
        assert_eq!(stats.attempts_per_second(), 0);
    }

    #[test]
    fn test_display() {
        let stats = SearchStatistics {
            attempts: 12,
            backtracks: 2,
            duration: Duration::from_millis(4),
        };
        assert_eq!(stats.to_string(), "12 attempts, 2 backtracks in 4 ms");
    }
}
