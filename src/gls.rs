//! Guided-local-search arc penalties.
//!
//! The controller keeps a dense per-arc penalty count. Move evaluation sees
//! an augmented cost: the true route cost plus
//! `penalty_factor * count(a, b) * distance(a, b)` for every traversed arc.
//! After each local optimum the arcs with maximal utility
//! `distance / (1 + count)` among those used by the current solution get
//! their count bumped, pushing the next descent away from the optimum.
//! True costs reported to callers never include the surcharge.

use crate::problem::{Problem, Vehicle};
use crate::solution::Solution;
use crate::EPS;
use itertools::Itertools;
use std::iter::once;

/// Dense arc penalty counts, row-major over node indices.
#[derive(Debug, Clone)]
pub struct ArcPenalties {
    counts: Vec<u32>,
    n: usize,
    factor: f64,
}

impl ArcPenalties {
    pub fn new(problem: &Problem, factor: f64) -> Self {
        let n = problem.len();
        ArcPenalties {
            counts: vec![0; n * n],
            n,
            factor,
        }
    }

    pub fn count(&self, from: usize, to: usize) -> u32 {
        self.counts[from * self.n + to]
    }

    fn bump(&mut self, from: usize, to: usize) {
        let c = &mut self.counts[from * self.n + to];
        *c = c.saturating_add(1);
    }

    /// Penalty surcharge for a route walk (start, customers.., end).
    pub fn surcharge(&self, problem: &Problem, vehicle: &Vehicle, customers: &[usize]) -> f64 {
        if customers.is_empty() {
            return 0.0;
        }
        once(vehicle.start)
            .chain(customers.iter().copied())
            .chain(once(vehicle.end))
            .tuple_windows()
            .map(|(a, b)| self.factor * self.count(a, b) as f64 * problem.distance(a, b))
            .sum()
    }

    /// Augmented cost of a candidate route: true cost plus surcharge. The
    /// candidate's distance is supplied by the dimension tracker.
    pub fn route_cost(
        &self,
        problem: &Problem,
        vehicle: &Vehicle,
        customers: &[usize],
        distance: f64,
    ) -> f64 {
        if customers.is_empty() {
            return 0.0;
        }
        vehicle.fixed_cost
            + vehicle.variable_cost * distance
            + self.surcharge(problem, vehicle, customers)
    }

    /// Bump the arcs with maximal utility among the arcs the local optimum
    /// actually uses. Ties within [`EPS`] are all penalized.
    pub fn penalize_local_optimum(&mut self, problem: &Problem, solution: &Solution) {
        let mut used: Vec<(usize, usize, f64)> = Vec::new();
        for route in &solution.routes {
            if route.is_empty() {
                continue;
            }
            let vehicle = &problem.vehicles[route.vehicle];
            for (a, b) in once(vehicle.start)
                .chain(route.customers.iter().copied())
                .chain(once(vehicle.end))
                .tuple_windows()
            {
                let utility = problem.distance(a, b) / (1.0 + self.count(a, b) as f64);
                used.push((a, b, utility));
            }
        }
        let max = used.iter().map(|&(_, _, u)| u).fold(f64::MIN, f64::max);
        if max <= 0.0 {
            return;
        }
        for (a, b, utility) in used {
            if utility >= max - EPS {
                self.bump(a, b);
            }
        }
    }
}
