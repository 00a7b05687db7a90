//! Cumulative resource accounting for routes.
//!
//! Three dimensions are tracked along every route walk (vehicle start,
//! customer visits, vehicle end): load, distance and time. Load and
//! distance accumulate monotonically; the time dimension waits for free at
//! a window's earliest bound and fails hard past its latest bound. A route
//! is feasible only when all three dimensions hold jointly.

use crate::problem::{Problem, Vehicle};

/// Which bound a candidate route broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasibility {
    /// Total load exceeds the vehicle capacity.
    CapacityExceeded,
    /// Total distance exceeds the vehicle maximum.
    DistanceExceeded,
    /// Arrival past the latest service start at the given walk position.
    WindowMissed(usize),
    /// Route completion minus departure exceeds the vehicle shift length.
    WorkingTimeExceeded,
}

/// Cumulative values at every position of a feasible route walk. Position 0
/// is the vehicle start node, the last position its end node.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDimensions {
    pub load: f64,
    pub distance: f64,
    /// Working time: completion at the end node minus departure from start.
    pub duration: f64,
    pub loads: Vec<f64>,
    pub distances: Vec<f64>,
    /// Service completion time at each position (departure time at start).
    pub times: Vec<f64>,
}

impl RouteDimensions {
    fn empty(departure: f64) -> Self {
        RouteDimensions {
            load: 0.0,
            distance: 0.0,
            duration: 0.0,
            loads: vec![0.0, 0.0],
            distances: vec![0.0, 0.0],
            times: vec![departure, departure],
        }
    }
}

/// Totals of a feasible candidate route, without the per-position detail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteTotals {
    pub load: f64,
    pub distance: f64,
    pub duration: f64,
}

impl From<&RouteDimensions> for RouteTotals {
    fn from(dims: &RouteDimensions) -> Self {
        RouteTotals {
            load: dims.load,
            distance: dims.distance,
            duration: dims.duration,
        }
    }
}

/// Evaluate a full route walk for `vehicle` visiting `customers` in order.
///
/// An empty customer sequence is an unused vehicle: it never leaves its
/// start node and consumes nothing.
pub fn evaluate(
    problem: &Problem,
    vehicle: &Vehicle,
    customers: &[usize],
) -> Result<RouteDimensions, Infeasibility> {
    let departure = problem.node(vehicle.start).time_window.0;
    if customers.is_empty() {
        return Ok(RouteDimensions::empty(departure));
    }

    let len = customers.len() + 2;
    let mut loads = Vec::with_capacity(len);
    let mut distances = Vec::with_capacity(len);
    let mut times = Vec::with_capacity(len);

    let mut load = 0.0;
    let mut distance = 0.0;
    let mut time = departure;
    loads.push(load);
    distances.push(distance);
    times.push(time);

    let mut prev = vehicle.start;
    for (pos, &c) in customers.iter().enumerate() {
        let node = problem.node(c);
        load += node.demand;
        if load > vehicle.capacity {
            return Err(Infeasibility::CapacityExceeded);
        }
        distance += problem.distance(prev, c);
        if distance > vehicle.max_distance {
            return Err(Infeasibility::DistanceExceeded);
        }
        let arrival = time + problem.travel_time(prev, c);
        if arrival > node.time_window.1 {
            return Err(Infeasibility::WindowMissed(pos + 1));
        }
        time = arrival.max(node.time_window.0) + node.service_time;
        loads.push(load);
        distances.push(distance);
        times.push(time);
        prev = c;
    }

    let end = problem.node(vehicle.end);
    distance += problem.distance(prev, vehicle.end);
    if distance > vehicle.max_distance {
        return Err(Infeasibility::DistanceExceeded);
    }
    let arrival = time + problem.travel_time(prev, vehicle.end);
    if arrival > end.time_window.1 {
        return Err(Infeasibility::WindowMissed(customers.len() + 1));
    }
    time = arrival.max(end.time_window.0);
    if time - departure > vehicle.max_working_time {
        return Err(Infeasibility::WorkingTimeExceeded);
    }
    loads.push(load);
    distances.push(distance);
    times.push(time);

    Ok(RouteDimensions {
        load,
        distance,
        duration: time - departure,
        loads,
        distances,
        times,
    })
}

/// Check inserting `candidate` before customer position `pos` of an
/// already-evaluated route, reusing the cached prefix of `dims` and
/// propagating only from the insertion point to the end of the route.
pub fn try_insert(
    problem: &Problem,
    vehicle: &Vehicle,
    customers: &[usize],
    dims: &RouteDimensions,
    pos: usize,
    candidate: usize,
) -> Result<RouteTotals, Infeasibility> {
    debug_assert!(pos <= customers.len());
    if customers.is_empty() {
        // Prefix reuse degenerates to a plain evaluation.
        return evaluate(problem, vehicle, &[candidate]).map(|d| RouteTotals::from(&d));
    }

    let departure = dims.times[0];
    // Walk position `pos` is the predecessor of the inserted visit.
    let mut load = dims.loads[pos];
    let mut distance = dims.distances[pos];
    let mut time = dims.times[pos];
    let mut prev = if pos == 0 {
        vehicle.start
    } else {
        customers[pos - 1]
    };

    let mut step = |load: &mut f64,
                    distance: &mut f64,
                    time: &mut f64,
                    prev: &mut usize,
                    node_index: usize,
                    walk_pos: usize|
     -> Result<(), Infeasibility> {
        let node = problem.node(node_index);
        *load += node.demand;
        if *load > vehicle.capacity {
            return Err(Infeasibility::CapacityExceeded);
        }
        *distance += problem.distance(*prev, node_index);
        if *distance > vehicle.max_distance {
            return Err(Infeasibility::DistanceExceeded);
        }
        let arrival = *time + problem.travel_time(*prev, node_index);
        if arrival > node.time_window.1 {
            return Err(Infeasibility::WindowMissed(walk_pos));
        }
        *time = arrival.max(node.time_window.0) + node.service_time;
        *prev = node_index;
        Ok(())
    };

    step(&mut load, &mut distance, &mut time, &mut prev, candidate, pos + 1)?;
    for (offset, &c) in customers[pos..].iter().enumerate() {
        step(&mut load, &mut distance, &mut time, &mut prev, c, pos + 2 + offset)?;
    }

    let end = problem.node(vehicle.end);
    distance += problem.distance(prev, vehicle.end);
    if distance > vehicle.max_distance {
        return Err(Infeasibility::DistanceExceeded);
    }
    let arrival = time + problem.travel_time(prev, vehicle.end);
    if arrival > end.time_window.1 {
        return Err(Infeasibility::WindowMissed(customers.len() + 2));
    }
    time = arrival.max(end.time_window.0);
    if time - departure > vehicle.max_working_time {
        return Err(Infeasibility::WorkingTimeExceeded);
    }

    Ok(RouteTotals {
        load,
        distance,
        duration: time - departure,
    })
}
