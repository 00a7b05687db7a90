//! Cheapest-feasible-insertion construction heuristic.

use crate::config::Config;
use crate::dimension;
use crate::problem::Problem;
use crate::solution::Solution;
use crate::EPS;
use log::{debug, warn};

#[derive(Clone, Copy)]
struct Insertion {
    customer: usize,
    route: usize,
    position: usize,
    totals: dimension::RouteTotals,
    delta: f64,
}

/// Build an initial solution by repeatedly inserting the unassigned
/// customer whose cheapest feasible slot has the smallest marginal arc-cost
/// increase. Customers with no feasible slot anywhere stay dropped, to be
/// resolved by the drop-penalty mechanism rather than by failing here.
///
/// Deterministic: customers are scanned in identifier order, so cost ties
/// resolve to the lowest customer identifier and the earliest position.
pub fn build_initial(problem: &Problem, config: &Config) -> Solution {
    let mut solution = Solution::empty(problem);

    let mut unassigned: Vec<usize> = problem.customers().to_vec();
    unassigned.sort_by(|&a, &b| problem.node(a).id.cmp(&problem.node(b).id));

    loop {
        let mut best: Option<Insertion> = None;

        // One evaluated prefix per route, shared across all candidates of
        // this pass; only one route changes per accepted insertion.
        let route_dims: Vec<_> = solution
            .routes
            .iter()
            .map(|r| dimension::evaluate(problem, &problem.vehicles[r.vehicle], &r.customers))
            .collect();

        for &customer in &unassigned {
            for (r_idx, route) in solution.routes.iter().enumerate() {
                let vehicle = &problem.vehicles[route.vehicle];
                let dims = match &route_dims[r_idx] {
                    Ok(dims) => dims,
                    Err(_) => continue,
                };
                for position in 0..=route.customers.len() {
                    let totals = match dimension::try_insert(
                        problem,
                        vehicle,
                        &route.customers,
                        dims,
                        position,
                        customer,
                    ) {
                        Ok(totals) => totals,
                        Err(_) => continue,
                    };
                    let delta = vehicle.variable_cost * (totals.distance - route.distance);
                    if best.map_or(true, |b| delta < b.delta - EPS) {
                        best = Some(Insertion {
                            customer,
                            route: r_idx,
                            position,
                            totals,
                            delta,
                        });
                    }
                }
            }
        }

        match best {
            Some(ins) => {
                let route = &mut solution.routes[ins.route];
                let mut customers = route.customers.clone();
                customers.insert(ins.position, ins.customer);
                route.install(customers, ins.totals);
                solution.dropped.remove(&ins.customer);
                unassigned.retain(|&c| c != ins.customer);
            }
            None => break,
        }
    }

    for &customer in &unassigned {
        warn!(
            "customer {} has no feasible insertion point; deferring to the drop mechanism",
            problem.node(customer).id
        );
    }
    debug!(
        "construction placed {} of {} customers",
        problem.customer_count() - unassigned.len(),
        problem.customer_count()
    );

    solution.evaluate(problem, config.drop_penalty);
    solution
}
