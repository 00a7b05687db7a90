//! Relocate neighborhood: move one customer to another route.
//!
//! Same-route repositioning is handled by the Or-opt neighborhood with a
//! segment length of one.

use crate::config::Config;
use crate::dimension::{self, RouteTotals};
use crate::gls::ArcPenalties;
use crate::problem::Problem;
use crate::solution::Solution;
use crate::EPS;
use rand::seq::SliceRandom;

use super::{utils, LocalSearch};

impl LocalSearch {
    /// Try to relocate one customer into a neighboring route. Applies the
    /// first improving move found and reports whether one was applied.
    pub fn relocate_sweep(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        penalties: &ArcPenalties,
        config: &Config,
    ) -> bool {
        let mut route_order: Vec<usize> = (0..solution.routes.len()).collect();
        route_order.shuffle(self.rng());

        for &r1 in &route_order {
            if solution.routes[r1].is_empty() {
                continue;
            }
            let mut positions: Vec<usize> = (0..solution.routes[r1].customers.len()).collect();
            positions.shuffle(self.rng());

            for &p1 in &positions {
                let customer = solution.routes[r1].customers[p1];
                for neighbor in self.neighbors_of(customer) {
                    let Some(r2) = solution.route_of(neighbor) else {
                        continue;
                    };
                    if r2 == r1 {
                        continue;
                    }
                    if try_relocate(solution, problem, penalties, config, r1, p1, r2) {
                        return true;
                    }
                }
                // A parked vehicle holds no neighbors, so offer each empty
                // route as a target explicitly.
                let parked: Vec<usize> = (0..solution.routes.len())
                    .filter(|&r| r != r1 && solution.routes[r].is_empty())
                    .collect();
                for r2 in parked {
                    if try_relocate(solution, problem, penalties, config, r1, p1, r2) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

fn try_relocate(
    solution: &mut Solution,
    problem: &Problem,
    penalties: &ArcPenalties,
    config: &Config,
    r1: usize,
    p1: usize,
    r2: usize,
) -> bool {
    let v1 = &problem.vehicles[solution.routes[r1].vehicle];
    let v2 = &problem.vehicles[solution.routes[r2].vehicle];
    let seq1 = solution.routes[r1].customers.clone();
    let seq2 = solution.routes[r2].customers.clone();
    let customer = seq1[p1];

    // Removal must be re-validated: with sentinel arcs the shortcut
    // prev -> next is not guaranteed to be cheaper or reachable.
    let removed = utils::without(&seq1, p1);
    let Ok(dims1) = dimension::evaluate(problem, v1, &removed) else {
        return false;
    };
    let Ok(dims2) = dimension::evaluate(problem, v2, &seq2) else {
        return false;
    };

    let old = penalties.route_cost(problem, v1, &seq1, solution.routes[r1].distance)
        + penalties.route_cost(problem, v2, &seq2, solution.routes[r2].distance);
    let removed_cost = penalties.route_cost(problem, v1, &removed, dims1.distance);

    let mut best: Option<(usize, RouteTotals, f64)> = None;
    for pos in 0..=seq2.len() {
        let Ok(totals) = dimension::try_insert(problem, v2, &seq2, &dims2, pos, customer) else {
            continue;
        };
        let grown = utils::with_inserted(&seq2, pos, customer);
        let delta =
            removed_cost + penalties.route_cost(problem, v2, &grown, totals.distance) - old;
        if delta < -EPS && best.map_or(true, |(_, _, d)| delta < d) {
            best = Some((pos, totals, delta));
        }
    }

    match best {
        Some((pos, totals, _)) => {
            solution.routes[r1].install(removed, RouteTotals::from(&dims1));
            let grown = utils::with_inserted(&seq2, pos, customer);
            solution.routes[r2].install(grown, totals);
            solution.evaluate(problem, config.drop_penalty);
            true
        }
        None => false,
    }
}
