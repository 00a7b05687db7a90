//! 2-opt neighborhood: reverse a contiguous intra-route segment.
//!
//! Unlike the pure-distance case, a reversal can flip a feasible schedule
//! into one that misses a window, so every candidate goes through the
//! dimension tracker instead of a two-edge delta.

use crate::config::Config;
use crate::dimension::{self, RouteTotals};
use crate::gls::ArcPenalties;
use crate::problem::Problem;
use crate::solution::Solution;
use crate::EPS;
use rand::seq::SliceRandom;

use super::LocalSearch;

impl LocalSearch {
    /// Try to reverse one segment in one route. Applies the first
    /// improving reversal found.
    pub fn two_opt_sweep(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        penalties: &ArcPenalties,
        config: &Config,
    ) -> bool {
        let mut route_order: Vec<usize> = (0..solution.routes.len()).collect();
        route_order.shuffle(self.rng());

        for &r in &route_order {
            let n = solution.routes[r].customers.len();
            if n < 3 {
                continue;
            }
            let mut starts: Vec<usize> = (0..n - 1).collect();
            starts.shuffle(self.rng());

            for &i in &starts {
                let mut ends: Vec<usize> = (i + 1..n).collect();
                ends.shuffle(self.rng());

                for &j in &ends {
                    if try_reverse(solution, problem, penalties, config, r, i, j) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

fn try_reverse(
    solution: &mut Solution,
    problem: &Problem,
    penalties: &ArcPenalties,
    config: &Config,
    r: usize,
    i: usize,
    j: usize,
) -> bool {
    let vehicle = &problem.vehicles[solution.routes[r].vehicle];
    let mut candidate = solution.routes[r].customers.clone();
    candidate[i..=j].reverse();

    let Ok(dims) = dimension::evaluate(problem, vehicle, &candidate) else {
        return false;
    };
    let old = penalties.route_cost(
        problem,
        vehicle,
        &solution.routes[r].customers,
        solution.routes[r].distance,
    );
    let new = penalties.route_cost(problem, vehicle, &candidate, dims.distance);

    if new - old < -EPS {
        solution.routes[r].install(candidate, RouteTotals::from(&dims));
        solution.evaluate(problem, config.drop_penalty);
        true
    } else {
        false
    }
}
