//! Solution representation: vehicle-owned routes plus the dropped set.

use crate::dimension::RouteTotals;
use crate::problem::{Problem, Vehicle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One vehicle's route. The start and end depots are implicit; `customers`
/// holds the visited customer node indices in order. The cached totals are
/// written from an evaluated candidate whenever the sequence changes, so a
/// route in a [`Solution`] always carries valid, feasible dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Index of the owning vehicle in the problem's fleet.
    pub vehicle: usize,
    pub customers: Vec<usize>,
    pub load: f64,
    pub distance: f64,
    /// Working time in minutes, waiting and service included.
    pub duration: f64,
}

impl Route {
    /// An unused vehicle: start immediately followed by end.
    pub fn empty(vehicle: usize) -> Self {
        Route {
            vehicle,
            customers: Vec::new(),
            load: 0.0,
            distance: 0.0,
            duration: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Replace the visit sequence and cached totals in one step.
    pub fn install(&mut self, customers: Vec<usize>, totals: RouteTotals) {
        self.customers = customers;
        self.load = totals.load;
        self.distance = totals.distance;
        self.duration = totals.duration;
    }

    /// True cost of this route: fixed cost if the vehicle is used plus the
    /// per-kilometer cost. Unused vehicles cost nothing.
    pub fn cost(&self, vehicle: &Vehicle) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            vehicle.fixed_cost + vehicle.variable_cost * self.distance
        }
    }
}

/// A complete assignment: one route per vehicle (index-aligned with the
/// fleet) and the set of dropped customers. Every customer is either on
/// exactly one route or dropped.
#[derive(Clone, Serialize, Deserialize)]
pub struct Solution {
    pub routes: Vec<Route>,
    /// Customer node indices excluded from all routes.
    pub dropped: BTreeSet<usize>,
    /// True cost: route costs plus drop penalties. Set by [`Solution::evaluate`].
    pub cost: f64,
    pub distance: f64,
    pub duration: f64,
}

impl Solution {
    /// The degenerate starting point: every route empty, every customer
    /// dropped. Construction and reinsertion work from here.
    pub fn empty(problem: &Problem) -> Self {
        Solution {
            routes: (0..problem.vehicles.len()).map(Route::empty).collect(),
            dropped: problem.customers().iter().copied().collect(),
            cost: 0.0,
            distance: 0.0,
            duration: 0.0,
        }
    }

    /// Recompute the true cost and totals from the cached route dimensions.
    /// Guided-search penalties never enter here.
    pub fn evaluate(&mut self, problem: &Problem, drop_penalty: f64) {
        let mut cost = 0.0;
        let mut distance = 0.0;
        let mut duration = 0.0;
        for route in &self.routes {
            cost += route.cost(&problem.vehicles[route.vehicle]);
            distance += route.distance;
            duration += route.duration;
        }
        self.cost = cost + drop_penalty * self.dropped.len() as f64;
        self.distance = distance;
        self.duration = duration;
    }

    /// Number of vehicles serving at least one customer.
    pub fn vehicles_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// The route currently visiting `customer`, if it is not dropped.
    pub fn route_of(&self, customer: usize) -> Option<usize> {
        self.routes
            .iter()
            .position(|r| r.customers.contains(&customer))
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Cost: {:.2}", self.cost)?;
        writeln!(f, "  Distance: {:.2}", self.distance)?;
        writeln!(f, "  Duration: {:.2}", self.duration)?;
        writeln!(f, "  Dropped: {}", self.dropped.len())?;
        for route in &self.routes {
            writeln!(
                f,
                "  Vehicle {}: {:?} (load {:.2}, distance {:.2}, duration {:.1})",
                route.vehicle, route.customers, route.load, route.distance, route.duration
            )?;
        }
        Ok(())
    }
}
