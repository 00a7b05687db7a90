//! Exchange neighborhood: swap two customers between their positions.

use crate::config::Config;
use crate::dimension::{self, RouteTotals};
use crate::gls::ArcPenalties;
use crate::problem::Problem;
use crate::solution::Solution;
use crate::EPS;
use rand::seq::SliceRandom;

use super::LocalSearch;

impl LocalSearch {
    /// Try to swap a customer with one of its neighbors, within one route
    /// or across two. Applies the first improving swap found.
    pub fn exchange_sweep(
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
                    let Some(p2) = solution.routes[r2]
                        .customers
                        .iter()
                        .position(|&c| c == neighbor)
                    else {
                        continue;
                    };
                    let applied = if r1 == r2 {
                        try_intra_swap(solution, problem, penalties, config, r1, p1, p2)
                    } else {
                        try_inter_swap(solution, problem, penalties, config, r1, p1, r2, p2)
                    };
                    if applied {
                        return true;
                    }
                }
            }
        }
        false
    }
}

fn try_intra_swap(
    solution: &mut Solution,
    problem: &Problem,
    penalties: &ArcPenalties,
    config: &Config,
    r: usize,
    p1: usize,
    p2: usize,
) -> bool {
    if p1 == p2 {
        return false;
    }
    let vehicle = &problem.vehicles[solution.routes[r].vehicle];
    let mut candidate = solution.routes[r].customers.clone();
    candidate.swap(p1, p2);

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

#[allow(clippy::too_many_arguments)]
fn try_inter_swap(
    solution: &mut Solution,
    problem: &Problem,
    penalties: &ArcPenalties,
    config: &Config,
    r1: usize,
    p1: usize,
    r2: usize,
    p2: usize,
) -> bool {
    let v1 = &problem.vehicles[solution.routes[r1].vehicle];
    let v2 = &problem.vehicles[solution.routes[r2].vehicle];
    let c1 = solution.routes[r1].customers[p1];
    let c2 = solution.routes[r2].customers[p2];

    let mut cand1 = solution.routes[r1].customers.clone();
    let mut cand2 = solution.routes[r2].customers.clone();
    cand1[p1] = c2;
    cand2[p2] = c1;

    let Ok(dims1) = dimension::evaluate(problem, v1, &cand1) else {
        return false;
    };
    let Ok(dims2) = dimension::evaluate(problem, v2, &cand2) else {
        return false;
    };

    let old = penalties.route_cost(
        problem,
        v1,
        &solution.routes[r1].customers,
        solution.routes[r1].distance,
    ) + penalties.route_cost(
        problem,
        v2,
        &solution.routes[r2].customers,
        solution.routes[r2].distance,
    );
    let new = penalties.route_cost(problem, v1, &cand1, dims1.distance)
        + penalties.route_cost(problem, v2, &cand2, dims2.distance);

    if new - old < -EPS {
        solution.routes[r1].install(cand1, RouteTotals::from(&dims1));
        solution.routes[r2].install(cand2, RouteTotals::from(&dims2));
        solution.evaluate(problem, config.drop_penalty);
        true
    } else {
        false
    }
}
