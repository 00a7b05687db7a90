//! Local search move library.
//!
//! Each neighborhood lives in its own file and follows the same shape:
//! scan candidate moves in a shuffled order, evaluate the affected routes
//! through the dimension tracker, compare augmented costs, and mutate the
//! solution only when a move is accepted. A sweep applies at most one move
//! and reports whether it did; the driver loops until no neighborhood finds
//! an improvement.

pub mod drop;
pub mod exchange;
pub mod or_opt;
pub mod relocate;
pub mod two_opt;
pub mod utils;

use crate::config::Config;
use crate::gls::ArcPenalties;
use crate::problem::Problem;
use crate::solution::Solution;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct LocalSearch {
    pub granularity: usize,
    /// Nearest customers per customer, used to prune move generation.
    neighbors: HashMap<usize, Vec<usize>>,
    rng: ChaCha8Rng,
}

impl LocalSearch {
    pub fn new(granularity: usize, seed: u64) -> Self {
        LocalSearch {
            granularity,
            neighbors: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Descend to a local optimum of the augmented cost. The stop flag is
    /// polled between sweeps; an in-flight move always finishes, so the
    /// solution is never left with a partially applied mutation.
    pub fn run(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        penalties: &ArcPenalties,
        config: &Config,
        stop: &AtomicBool,
    ) {
        self.prepare(problem);
        solution.evaluate(problem, config.drop_penalty);

        let mut improvement = true;
        while improvement {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            improvement = false;
            improvement |= self.relocate_sweep(solution, problem, penalties, config);
            improvement |= self.exchange_sweep(solution, problem, penalties, config);
            improvement |= self.two_opt_sweep(solution, problem, penalties, config);
            improvement |= self.or_opt_sweep(solution, problem, penalties, config);
            improvement |= self.reinsert_sweep(solution, problem, penalties, config);
            improvement |= self.drop_sweep(solution, problem, penalties, config);
        }

        solution.evaluate(problem, config.drop_penalty);
    }

    /// Precompute the neighbor lists. Called lazily by [`LocalSearch::run`];
    /// required before driving individual sweeps by hand.
    pub fn prepare(&mut self, problem: &Problem) {
        if !self.neighbors.is_empty() {
            return;
        }
        for &customer in problem.customers() {
            let nearest = utils::nearest_customers(customer, problem, self.granularity);
            self.neighbors.insert(customer, nearest);
        }
    }

    pub(crate) fn neighbors_of(&self, customer: usize) -> Vec<usize> {
        self.neighbors.get(&customer).cloned().unwrap_or_default()
    }

    pub(crate) fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}
