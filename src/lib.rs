//! # GLS-VRPTW
//!
//! A guided-local-search solver for the capacitated vehicle routing
//! problem with time windows (CVRPTW) with optional node dropping.
//!
//! A normalized graph of nodes, arcs and vehicles is turned into an
//! immutable [`problem::Problem`]; cheapest feasible insertion builds an
//! initial assignment; a library of local-search moves improves it under
//! cumulative load, distance and time-window constraints; and a guided
//! metaheuristic penalizes overused arcs to push the search out of local
//! optima until a wall-clock budget runs out. Customers that cannot be
//! served feasibly are dropped at a fixed penalty instead of making the
//! instance infeasible.

pub mod config;
pub mod construction;
pub mod dimension;
pub mod error;
pub mod extract;
pub mod gls;
pub mod local_search;
pub mod problem;
pub mod solution;

use crate::config::Config;
use crate::extract::SolutionReport;
use crate::gls::ArcPenalties;
use crate::local_search::LocalSearch;
use crate::problem::Problem;
use crate::solution::Solution;

use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Improvement threshold shared by move acceptance and cost comparisons.
pub const EPS: f64 = 1e-6;

/// The main solver structure: orchestrates construction, local search and
/// the guided penalization rounds, and tracks the best true-cost solution.
pub struct GlsSolver {
    pub problem: Problem,
    pub config: Config,
    pub best_solution: Option<Solution>,
    pub rounds: u32,
    pub run_time: Duration,
    local_search: LocalSearch,
    penalties: ArcPenalties,
    cancelled: Arc<AtomicBool>,
    start_time: Instant,
}

impl GlsSolver {
    /// Create a new solver for the given problem and configuration.
    pub fn new(problem: Problem, config: Config) -> Self {
        let penalties = ArcPenalties::new(&problem, config.penalty_factor);
        let local_search = LocalSearch::new(config.granularity, config.seed);
        GlsSolver {
            problem,
            config,
            best_solution: None,
            rounds: 0,
            run_time: Duration::from_secs(0),
            local_search,
            penalties,
            cancelled: Arc::new(AtomicBool::new(false)),
            start_time: Instant::now(),
        }
    }

    /// Shared flag for cooperative cancellation. Setting it stops the
    /// search at the next round or sweep boundary; the best solution found
    /// so far is still returned.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Run the search until the time budget is exhausted, the search
    /// stagnates, or cancellation is requested.
    pub fn run(&mut self) -> &Solution {
        self.start_time = Instant::now();

        let mut current = construction::build_initial(&self.problem, &self.config);
        let mut best = current.clone();
        let mut stale = 0u32;

        loop {
            self.local_search.run(
                &mut current,
                &self.problem,
                &self.penalties,
                &self.config,
                &self.cancelled,
            );
            self.rounds += 1;

            if current.cost < best.cost - EPS {
                debug!(
                    "round {}: best true cost {:.2} -> {:.2}",
                    self.rounds, best.cost, current.cost
                );
                best = current.clone();
                stale = 0;
            } else {
                stale += 1;
            }

            if self.should_terminate(stale) {
                break;
            }

            // Diversify: surcharge the arcs the local optimum leans on and
            // descend again under the augmented cost.
            self.penalties
                .penalize_local_optimum(&self.problem, &current);
        }

        self.run_time = self.start_time.elapsed();
        if best.vehicles_used() == 0 && !best.dropped.is_empty() {
            info!("no customer could be served; returning the all-dropped solution");
        }
        &*self.best_solution.insert(best)
    }

    /// Extract the report for the best solution found, if `run` has been
    /// called.
    pub fn report(&self) -> Option<SolutionReport> {
        self.best_solution
            .as_ref()
            .map(|s| extract::extract(&self.problem, s, self.config.drop_penalty))
    }

    fn should_terminate(&self, stale: u32) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }
        if stale >= self.config.max_stale_rounds {
            return true;
        }
        self.start_time.elapsed() >= self.config.time_limit
    }
}
