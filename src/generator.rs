//! Random event list generator.
//!
//! Produces valid, reproducible show lists for benchmarks, demos and
//! property tests. The same config and seed always yield the same events.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::Event;

/// Configuration for generating event lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventGeneratorConfig {
    /// Number of events.
    pub count: usize,
    /// Events start in `0..horizon`.
    pub horizon: i64,
    /// Event duration range, inclusive (min, max). Both must be positive.
    pub duration_range: (i64, i64),
}

impl Default for EventGeneratorConfig {
    fn default() -> Self {
        Self {
            count: 20,
            horizon: 100,
            duration_range: (1, 10),
        }
    }
}

impl EventGeneratorConfig {
    /// Few short events over a narrow horizon, handy for brute-force checks.
    pub fn small() -> Self {
        Self {
            count: 8,
            horizon: 20,
            duration_range: (1, 6),
        }
    }

    /// Many long events competing for the same window.
    pub fn dense() -> Self {
        Self {
            count: 1_000,
            horizon: 500,
            duration_range: (10, 120),
        }
    }

    /// Sets the number of events.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the start-time horizon.
    pub fn with_horizon(mut self, horizon: i64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the duration range.
    pub fn with_duration_range(mut self, min: i64, max: i64) -> Self {
        self.duration_range = (min, max);
        self
    }
}

/// Seeded event list generator.
#[derive(Debug)]
pub struct EventGenerator {
    config: EventGeneratorConfig,
    rng: SmallRng,
}

impl EventGenerator {
    /// Creates a generator.
    pub fn new(config: EventGeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generates the next event list.
    ///
    /// Labels are `S1`, `S2`, ... in generation order (unsorted by time).
    /// Degenerate config values are clamped so every event has `start < end`;
    /// ends that would pass `i64::MAX` saturate there.
    pub fn generate(&mut self) -> Vec<Event> {
        let horizon = self.config.horizon.max(1);
        let min_len = self.config.duration_range.0.max(1);
        let max_len = self.config.duration_range.1.max(min_len);

        (0..self.config.count)
            .map(|i| {
                let start = self.rng.random_range(0..horizon);
                let len = self.rng.random_range(min_len..=max_len);
                Event::new(format!("S{}", i + 1), start, start.saturating_add(len))
            })
            .collect()
    }
}
