//! Search-level scope.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::statistics::SearchStatistics;

/// State shared by one assignment search: RNG, clock and counters.
///
/// A seeded scope replays the same search for the same input, which is
/// what reproducible runs and tests rely on.
#[derive(Debug)]
pub struct SearchScope {
    rng: ChaCha8Rng,
    start_time: Option<Instant>,
    attempts: u64,
    backtracks: u64,
}

impl SearchScope {
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is set, entropy-backed otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            start_time: None,
            attempts: 0,
            backtracks: 0,
        }
    }

    pub fn start_search(&mut self) {
        self.start_time = Some(Instant::now());
        self.attempts = 0;
        self.backtracks = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn record_attempt(&mut self) -> u64 {
        self.attempts += 1;
        self.attempts
    }

    pub fn record_backtrack(&mut self) -> u64 {
        self.backtracks += 1;
        self.backtracks
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn backtracks(&self) -> u64 {
        self.backtracks
    }

    /// Snapshot of the counters and elapsed time.
    pub fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            attempts: self.attempts,
            backtracks: self.backtracks,
            duration: self.elapsed().unwrap_or_default(),
        }
    }
}

impl Default for SearchScope {
    fn default() -> Self {
        Self::new()
    }
}
