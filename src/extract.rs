//! Final report extraction.
//!
//! Converts the internal route representation into identifier-keyed route
//! sequences and true aggregate figures for the reporting collaborators.
//! Only true costs appear here; guided-search penalties never leak into a
//! report. Pure function of its inputs, so extracting twice from an
//! unmodified solution yields identical reports.

use crate::problem::Problem;
use crate::solution::Solution;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::iter::once;

/// One vehicle's share of the final plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleReport {
    pub vehicle_id: String,
    /// Ordered node identifiers, start and end depots included. Empty for
    /// an unused vehicle.
    pub stops: Vec<String>,
    /// Kilometers driven.
    pub distance: f64,
    /// Working time in minutes, waiting and service included.
    pub time: f64,
    /// Fixed cost (if used) plus variable cost times distance.
    pub cost: f64,
    pub used: bool,
}

/// The complete plan: per-vehicle routes, global totals and the customers
/// left unserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    pub vehicles: Vec<VehicleReport>,
    pub vehicles_used: usize,
    pub total_distance: f64,
    pub total_time: f64,
    /// Route costs plus drop penalties.
    pub total_cost: f64,
    /// Identifiers of dropped customers, sorted.
    pub dropped: Vec<String>,
}

/// Walk every route and assemble the report. `drop_penalty` is the
/// configured per-customer penalty, charged into the global total.
pub fn extract(problem: &Problem, solution: &Solution, drop_penalty: f64) -> SolutionReport {
    let mut vehicles = Vec::with_capacity(solution.routes.len());
    let mut total_distance = 0.0;
    let mut total_time = 0.0;
    let mut total_cost = 0.0;

    for route in &solution.routes {
        let vehicle = &problem.vehicles[route.vehicle];
        if route.is_empty() {
            vehicles.push(VehicleReport {
                vehicle_id: vehicle.id.clone(),
                stops: Vec::new(),
                distance: 0.0,
                time: 0.0,
                cost: 0.0,
                used: false,
            });
            continue;
        }

        let walk: Vec<usize> = once(vehicle.start)
            .chain(route.customers.iter().copied())
            .chain(once(vehicle.end))
            .collect();
        let distance: f64 = walk
            .iter()
            .tuple_windows()
            .map(|(&a, &b)| problem.distance(a, b))
            .sum();
        let stops = walk.iter().map(|&i| problem.node(i).id.clone()).collect();
        let cost = vehicle.fixed_cost + vehicle.variable_cost * distance;

        total_distance += distance;
        total_time += route.duration;
        total_cost += cost;
        vehicles.push(VehicleReport {
            vehicle_id: vehicle.id.clone(),
            stops,
            distance,
            time: route.duration,
            cost,
            used: true,
        });
    }

    let mut dropped: Vec<String> = solution
        .dropped
        .iter()
        .map(|&c| problem.node(c).id.clone())
        .collect();
    dropped.sort();
    total_cost += drop_penalty * dropped.len() as f64;

    SolutionReport {
        vehicles_used: vehicles.iter().filter(|v| v.used).count(),
        vehicles,
        total_distance,
        total_time,
        total_cost,
        dropped,
    }
}
