//! Drop and reinsert: the disjunction escape valve.
//!
//! Dropping unroutes a customer and charges the fixed drop penalty instead
//! of its arc costs; reinsertion is the inverse, returning a dropped
//! customer to the cheapest feasible slot when that beats the penalty.

use crate::config::Config;
use crate::dimension::{self, RouteTotals};
use crate::gls::ArcPenalties;
use crate::problem::Problem;
use crate::solution::Solution;
use crate::EPS;
use rand::seq::SliceRandom;

use super::{utils, LocalSearch};

impl LocalSearch {
    /// Try to drop one routed customer. Worth it only when the customer's
    /// detour (under the augmented cost) exceeds the drop penalty.
    pub fn drop_sweep(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        penalties: &ArcPenalties,
        config: &Config,
    ) -> bool {
        let mut route_order: Vec<usize> = (0..solution.routes.len()).collect();
        route_order.shuffle(self.rng());

        for &r in &route_order {
            if solution.routes[r].is_empty() {
                continue;
            }
            let vehicle = &problem.vehicles[solution.routes[r].vehicle];
            let seq = solution.routes[r].customers.clone();
            let old = penalties.route_cost(problem, vehicle, &seq, solution.routes[r].distance);

            let mut positions: Vec<usize> = (0..seq.len()).collect();
            positions.shuffle(self.rng());

            for &pos in &positions {
                let removed = utils::without(&seq, pos);
                let Ok(dims) = dimension::evaluate(problem, vehicle, &removed) else {
                    continue;
                };
                let new = penalties.route_cost(problem, vehicle, &removed, dims.distance);
                if new + config.drop_penalty - old < -EPS {
                    let customer = seq[pos];
                    solution.routes[r].install(removed, RouteTotals::from(&dims));
                    solution.dropped.insert(customer);
                    solution.evaluate(problem, config.drop_penalty);
                    return true;
                }
            }
        }
        false
    }

    /// Try to return one dropped customer to a route. Always improving when
    /// a feasible slot costs less than the drop penalty.
    pub fn reinsert_sweep(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        penalties: &ArcPenalties,
        config: &Config,
    ) -> bool {
        let dropped: Vec<usize> = solution.dropped.iter().copied().collect();

        for customer in dropped {
            let mut best: Option<(usize, usize, RouteTotals, f64)> = None;

            for (r, route) in solution.routes.iter().enumerate() {
                let vehicle = &problem.vehicles[route.vehicle];
                let Ok(dims) = dimension::evaluate(problem, vehicle, &route.customers) else {
                    continue;
                };
                let old = penalties.route_cost(problem, vehicle, &route.customers, route.distance);

                for pos in 0..=route.customers.len() {
                    let Ok(totals) =
                        dimension::try_insert(problem, vehicle, &route.customers, &dims, pos, customer)
                    else {
                        continue;
                    };
                    let grown = utils::with_inserted(&route.customers, pos, customer);
                    let delta = penalties.route_cost(problem, vehicle, &grown, totals.distance)
                        - old
                        - config.drop_penalty;
                    if delta < -EPS && best.map_or(true, |(_, _, _, d)| delta < d) {
                        best = Some((r, pos, totals, delta));
                    }
                }
            }

            if let Some((r, pos, totals, _)) = best {
                let grown = utils::with_inserted(&solution.routes[r].customers, pos, customer);
                solution.routes[r].install(grown, totals);
                solution.dropped.remove(&customer);
                solution.evaluate(problem, config.drop_penalty);
                return true;
            }
        }
        false
    }
}
