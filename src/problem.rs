//! Problem definition and data structures for the CVRPTW.
//!
//! The model is built once from pre-normalized node, arc and vehicle tables
//! (identifiers trimmed and upper-cased by the data layer) and is immutable
//! afterwards. Arc costs are kept in dense matrices; node pairs without a
//! road record get [`UNREACHABLE`] so the cost function is total and the
//! search never has to branch on missing arcs.

use crate::error::ConfigurationError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel travel cost for node pairs without a road connection. Large
/// enough that any route using such an arc misses every time window and
/// distance bound, so unreachable pairs price themselves out of the search.
pub const UNREACHABLE: f64 = 1e7;

/// Default time window: the whole day, in minutes since midnight.
pub const FULL_DAY: (f64, f64) = (0.0, 1440.0);

/// Node classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Depot,
    Customer,
}

/// A node (depot or customer) in the road graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    /// Delivered weight; zero for depots.
    pub demand: f64,
    /// On-site service duration in minutes; zero for depots.
    pub service_time: f64,
    /// Feasible service window `[earliest, latest]`, minutes since midnight.
    pub time_window: (f64, f64),
}

impl Node {
    /// Create a depot node. Depots carry no demand or service time and are
    /// open all day unless narrowed with [`Node::with_window`].
    pub fn depot(id: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            kind: NodeKind::Depot,
            demand: 0.0,
            service_time: 0.0,
            time_window: FULL_DAY,
        }
    }

    /// Create a customer node with a full-day window.
    pub fn customer(id: impl Into<String>, demand: f64, service_time: f64) -> Self {
        Node {
            id: id.into(),
            kind: NodeKind::Customer,
            demand,
            service_time,
            time_window: FULL_DAY,
        }
    }

    /// Narrow the feasible service window.
    pub fn with_window(mut self, earliest: f64, latest: f64) -> Self {
        self.time_window = (earliest, latest);
        self
    }

    pub fn is_depot(&self) -> bool {
        self.kind == NodeKind::Depot
    }
}

/// One directed arc record of the origin-destination table. Undirected road
/// tables are expanded to both directions by the data layer before they
/// reach the solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcSpec {
    pub from: String,
    pub to: String,
    /// Travel time in minutes.
    pub time: f64,
    /// Travel distance in kilometers.
    pub distance: f64,
}

impl ArcSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>, time: f64, distance: f64) -> Self {
        ArcSpec {
            from: from.into(),
            to: to.into(),
            time,
            distance,
        }
    }
}

/// One row of the vehicle table, as supplied by the data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub id: String,
    pub capacity: f64,
    /// Maximum route length in kilometers.
    pub max_distance: f64,
    /// Shift length in hours.
    pub max_working_hours: f64,
    /// Charged once if the vehicle serves at least one customer.
    pub fixed_cost: f64,
    /// Cost per kilometer driven.
    pub variable_cost: f64,
    pub start_id: String,
    pub end_id: String,
}

impl VehicleSpec {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        capacity: f64,
        max_distance: f64,
        max_working_hours: f64,
        fixed_cost: f64,
        variable_cost: f64,
        start_id: impl Into<String>,
        end_id: impl Into<String>,
    ) -> Self {
        VehicleSpec {
            id: id.into(),
            capacity,
            max_distance,
            max_working_hours,
            fixed_cost,
            variable_cost,
            start_id: start_id.into(),
            end_id: end_id.into(),
        }
    }
}

/// A vehicle with its terminals resolved to node indices and its shift
/// length converted to minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub capacity: f64,
    pub max_distance: f64,
    /// Shift length in minutes.
    pub max_working_time: f64,
    pub fixed_cost: f64,
    pub variable_cost: f64,
    pub start: usize,
    pub end: usize,
}

/// An immutable CVRPTW instance: nodes, dense arc matrices and the fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub nodes: Vec<Node>,
    pub vehicles: Vec<Vehicle>,
    depots: Vec<usize>,
    customers: Vec<usize>,
    index: HashMap<String, usize>,
    time_matrix: Vec<f64>,
    distance_matrix: Vec<f64>,
}

impl Problem {
    /// Build the model from normalized tables, validating consistency.
    ///
    /// A vehicle whose start or end identifier is missing from the node set
    /// falls back to the first depot; the fallback is logged per vehicle.
    /// It is an error only when the node set contains no depot at all.
    pub fn new(
        nodes: Vec<Node>,
        arcs: Vec<ArcSpec>,
        vehicles: Vec<VehicleSpec>,
    ) -> Result<Self, ConfigurationError> {
        let n = nodes.len();
        let mut index = HashMap::with_capacity(n);
        for (i, node) in nodes.iter().enumerate() {
            if node.demand < 0.0 {
                return Err(ConfigurationError::NegativeDemand(node.id.clone()));
            }
            if node.time_window.0 > node.time_window.1 {
                return Err(ConfigurationError::InvertedTimeWindow(node.id.clone()));
            }
            if index.insert(node.id.clone(), i).is_some() {
                return Err(ConfigurationError::DuplicateNode(node.id.clone()));
            }
        }

        let depots: Vec<usize> = (0..n).filter(|&i| nodes[i].is_depot()).collect();
        let customers: Vec<usize> = (0..n).filter(|&i| !nodes[i].is_depot()).collect();

        let mut time_matrix = vec![UNREACHABLE; n * n];
        let mut distance_matrix = vec![UNREACHABLE; n * n];
        for i in 0..n {
            time_matrix[i * n + i] = 0.0;
            distance_matrix[i * n + i] = 0.0;
        }
        for arc in &arcs {
            let from = *index
                .get(&arc.from)
                .ok_or_else(|| ConfigurationError::UnknownArcEndpoint(arc.from.clone()))?;
            let to = *index
                .get(&arc.to)
                .ok_or_else(|| ConfigurationError::UnknownArcEndpoint(arc.to.clone()))?;
            if arc.time < 0.0 || arc.distance < 0.0 {
                return Err(ConfigurationError::NegativeArcCost {
                    from: arc.from.clone(),
                    to: arc.to.clone(),
                });
            }
            time_matrix[from * n + to] = arc.time;
            distance_matrix[from * n + to] = arc.distance;
        }

        let mut resolved = Vec::with_capacity(vehicles.len());
        for spec in vehicles {
            if spec.capacity < 0.0 {
                return Err(ConfigurationError::NegativeCapacity(spec.id.clone()));
            }
            let start = Self::resolve_terminal(&index, &depots, &spec.id, &spec.start_id)?;
            let end = Self::resolve_terminal(&index, &depots, &spec.id, &spec.end_id)?;
            resolved.push(Vehicle {
                id: spec.id,
                capacity: spec.capacity,
                max_distance: spec.max_distance,
                max_working_time: spec.max_working_hours * 60.0,
                fixed_cost: spec.fixed_cost,
                variable_cost: spec.variable_cost,
                start,
                end,
            });
        }

        Ok(Problem {
            nodes,
            vehicles: resolved,
            depots,
            customers,
            index,
            time_matrix,
            distance_matrix,
        })
    }

    fn resolve_terminal(
        index: &HashMap<String, usize>,
        depots: &[usize],
        vehicle_id: &str,
        node_id: &str,
    ) -> Result<usize, ConfigurationError> {
        if let Some(&i) = index.get(node_id) {
            return Ok(i);
        }
        match depots.first() {
            Some(&fallback) => {
                warn!(
                    "vehicle {} references unknown node {}; falling back to the first depot",
                    vehicle_id, node_id
                );
                Ok(fallback)
            }
            None => Err(ConfigurationError::UnresolvedTerminal {
                vehicle: vehicle_id.to_string(),
                node: node_id.to_string(),
            }),
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve an identifier to its node index.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Travel time in minutes between two node indices.
    pub fn travel_time(&self, from: usize, to: usize) -> f64 {
        self.time_matrix[from * self.nodes.len() + to]
    }

    /// Travel distance in kilometers between two node indices.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distance_matrix[from * self.nodes.len() + to]
    }

    pub fn depots(&self) -> &[usize] {
        &self.depots
    }

    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }
}
