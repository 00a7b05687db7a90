//! Or-opt neighborhood: relocate a short contiguous segment (length 1-3),
//! order preserved, within one route or into another.

use crate::config::Config;
use crate::dimension::{self, RouteTotals};
use crate::gls::ArcPenalties;
use crate::problem::Problem;
use crate::solution::Solution;
use crate::EPS;
use rand::seq::SliceRandom;

use super::{utils, LocalSearch};

/// Longest segment Or-opt will move.
const MAX_SEGMENT: usize = 3;

impl LocalSearch {
    /// Try to move one segment. Applies the first improving move found.
    pub fn or_opt_sweep(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        penalties: &ArcPenalties,
        config: &Config,
    ) -> bool {
        let mut route_order: Vec<usize> = (0..solution.routes.len()).collect();
        route_order.shuffle(self.rng());

        for len in 1..=MAX_SEGMENT {
            for &r1 in &route_order {
                let n = solution.routes[r1].customers.len();
                if n < len {
                    continue;
                }
                let mut starts: Vec<usize> = (0..=n - len).collect();
                starts.shuffle(self.rng());

                for &s in &starts {
                    if try_move_segment(self, solution, problem, penalties, config, r1, s, len) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[allow(clippy::too_many_arguments)]
fn try_move_segment(
    search: &LocalSearch,
    solution: &mut Solution,
    problem: &Problem,
    penalties: &ArcPenalties,
    config: &Config,
    r1: usize,
    s: usize,
    len: usize,
) -> bool {
    let v1 = &problem.vehicles[solution.routes[r1].vehicle];
    let seq1 = solution.routes[r1].customers.clone();
    let segment: Vec<usize> = seq1[s..s + len].to_vec();
    let removed = utils::without_segment(&seq1, s, len);

    let Ok(removed_dims) = dimension::evaluate(problem, v1, &removed) else {
        return false;
    };
    let old1 = penalties.route_cost(problem, v1, &seq1, solution.routes[r1].distance);
    let removed_cost = penalties.route_cost(problem, v1, &removed, removed_dims.distance);

    // Same-route repositioning.
    for pos in 0..=removed.len() {
        if pos == s {
            continue;
        }
        let candidate = utils::with_segment(&removed, pos, &segment);
        let Ok(dims) = dimension::evaluate(problem, v1, &candidate) else {
            continue;
        };
        let new = penalties.route_cost(problem, v1, &candidate, dims.distance);
        if new - old1 < -EPS {
            solution.routes[r1].install(candidate, RouteTotals::from(&dims));
            solution.evaluate(problem, config.drop_penalty);
            return true;
        }
    }

    // Relocation into a neighboring route.
    for neighbor in search.neighbors_of(segment[0]) {
        let Some(r2) = solution.route_of(neighbor) else {
            continue;
        };
        if r2 == r1 {
            continue;
        }
        let v2 = &problem.vehicles[solution.routes[r2].vehicle];
        let seq2 = solution.routes[r2].customers.clone();
        let old = old1
            + penalties.route_cost(problem, v2, &seq2, solution.routes[r2].distance);

        for pos in 0..=seq2.len() {
            let candidate = utils::with_segment(&seq2, pos, &segment);
            let Ok(dims2) = dimension::evaluate(problem, v2, &candidate) else {
                continue;
            };
            let new = removed_cost
                + penalties.route_cost(problem, v2, &candidate, dims2.distance);
            if new - old < -EPS {
                solution.routes[r1].install(removed, RouteTotals::from(&removed_dims));
                solution.routes[r2].install(candidate, RouteTotals::from(&dims2));
                solution.evaluate(problem, config.drop_penalty);
                return true;
            }
        }
    }

    false
}
