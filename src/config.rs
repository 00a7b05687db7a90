//! Configuration parameters for the solver.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable solver settings. Everything has a sensible default and can be
/// overridden with the builder-style setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Wall-clock search budget, polled at round boundaries.
    pub time_limit: Duration,
    /// Fixed cost charged for every customer left unserved.
    pub drop_penalty: f64,
    /// Weight of the guided-search arc penalties in the augmented cost.
    pub penalty_factor: f64,
    /// Neighbor-list size used to prune move generation.
    pub granularity: usize,
    /// Seed for the shuffled scan orders of the local search.
    pub seed: u64,
    /// Stop after this many penalization rounds without a better true cost.
    pub max_stale_rounds: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            time_limit: Duration::from_secs(180),
            drop_penalty: 1_000_000.0,
            penalty_factor: 0.1,
            granularity: 20,
            seed: 42,
            max_stale_rounds: 64,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the wall-clock search budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Set the penalty charged per dropped customer.
    pub fn with_drop_penalty(mut self, penalty: f64) -> Self {
        self.drop_penalty = penalty;
        self
    }

    /// Set the guided-search penalty weight.
    pub fn with_penalty_factor(mut self, factor: f64) -> Self {
        self.penalty_factor = factor;
        self
    }

    /// Set the neighbor-list size.
    pub fn with_granularity(mut self, granularity: usize) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the random seed for scan-order shuffling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the stagnation cutoff in rounds.
    pub fn with_max_stale_rounds(mut self, rounds: u32) -> Self {
        self.max_stale_rounds = rounds;
        self
    }
}
