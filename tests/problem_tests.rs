//! Unit tests for model construction and validation.

use gls_vrptw::error::ConfigurationError;
use gls_vrptw::problem::{ArcSpec, Node, Problem, VehicleSpec, FULL_DAY, UNREACHABLE};

fn nodes() -> Vec<Node> {
    vec![
        Node::depot("D1"),
        Node::depot("D2"),
        Node::customer("C1", 5.0, 10.0).with_window(480.0, 600.0),
        Node::customer("C2", 3.0, 5.0),
    ]
}

fn arcs() -> Vec<ArcSpec> {
    vec![
        ArcSpec::new("D1", "C1", 15.0, 10.0),
        ArcSpec::new("C1", "D1", 15.0, 10.0),
        ArcSpec::new("C1", "C2", 10.0, 5.0),
    ]
}

fn vehicle(start: &str, end: &str) -> VehicleSpec {
    VehicleSpec::new("V1", 10.0, 100.0, 8.0, 500.0, 2.0, start, end)
}

#[test]
fn test_node_lookup_and_arc_matrices() {
    let problem = Problem::new(nodes(), arcs(), vec![vehicle("D1", "D1")]).unwrap();

    let d1 = problem.node_index("D1").unwrap();
    let c1 = problem.node_index("C1").unwrap();
    let c2 = problem.node_index("C2").unwrap();

    assert_eq!(problem.len(), 4);
    assert_eq!(problem.customer_count(), 2);
    assert_eq!(problem.depots().len(), 2);
    assert!(problem.node_index("C9").is_none());

    assert_eq!(problem.travel_time(d1, c1), 15.0);
    assert_eq!(problem.distance(d1, c1), 10.0);
    assert_eq!(problem.distance(c1, c2), 5.0);
    // Declared one direction only: the reverse stays unreachable.
    assert_eq!(problem.distance(c2, c1), UNREACHABLE);
    // Self arcs are free.
    assert_eq!(problem.distance(c1, c1), 0.0);
}

#[test]
fn test_default_window_spans_the_day() {
    let problem = Problem::new(nodes(), arcs(), vec![vehicle("D1", "D1")]).unwrap();
    let c2 = problem.node_index("C2").unwrap();
    assert_eq!(problem.node(c2).time_window, FULL_DAY);
}

#[test]
fn test_vehicle_resolution_and_working_time() {
    let problem = Problem::new(nodes(), arcs(), vec![vehicle("D2", "D1")]).unwrap();
    let v = &problem.vehicles[0];
    assert_eq!(v.start, problem.node_index("D2").unwrap());
    assert_eq!(v.end, problem.node_index("D1").unwrap());
    assert_eq!(v.max_working_time, 480.0);
}

#[test]
fn test_unknown_terminal_falls_back_to_first_depot() {
    let problem = Problem::new(nodes(), arcs(), vec![vehicle("DX", "D1")]).unwrap();
    assert_eq!(problem.vehicles[0].start, problem.node_index("D1").unwrap());
}

#[test]
fn test_unknown_terminal_without_depot_is_an_error() {
    let nodes = vec![Node::customer("C1", 5.0, 10.0)];
    let result = Problem::new(nodes, vec![], vec![vehicle("DX", "DX")]);
    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::UnresolvedTerminal {
            vehicle: "V1".to_string(),
            node: "DX".to_string(),
        }
    );
}

#[test]
fn test_duplicate_node_is_an_error() {
    let mut dup = nodes();
    dup.push(Node::depot("D1"));
    let result = Problem::new(dup, arcs(), vec![vehicle("D1", "D1")]);
    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::DuplicateNode("D1".to_string())
    );
}

#[test]
fn test_dangling_arc_is_an_error() {
    let mut bad = arcs();
    bad.push(ArcSpec::new("C1", "C9", 1.0, 1.0));
    let result = Problem::new(nodes(), bad, vec![vehicle("D1", "D1")]);
    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::UnknownArcEndpoint("C9".to_string())
    );
}

#[test]
fn test_negative_arc_cost_is_an_error() {
    let mut bad = arcs();
    bad.push(ArcSpec::new("C2", "C1", -1.0, 5.0));
    let result = Problem::new(nodes(), bad, vec![vehicle("D1", "D1")]);
    assert!(matches!(
        result.unwrap_err(),
        ConfigurationError::NegativeArcCost { .. }
    ));
}

#[test]
fn test_negative_capacity_is_an_error() {
    let mut v = vehicle("D1", "D1");
    v.capacity = -1.0;
    let result = Problem::new(nodes(), arcs(), vec![v]);
    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::NegativeCapacity("V1".to_string())
    );
}

#[test]
fn test_negative_demand_is_an_error() {
    let mut bad = nodes();
    bad.push(Node::customer("C3", -2.0, 0.0));
    let result = Problem::new(bad, arcs(), vec![vehicle("D1", "D1")]);
    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::NegativeDemand("C3".to_string())
    );
}

#[test]
fn test_inverted_time_window_is_an_error() {
    let mut bad = nodes();
    bad.push(Node::customer("C3", 2.0, 0.0).with_window(600.0, 480.0));
    let result = Problem::new(bad, arcs(), vec![vehicle("D1", "D1")]);
    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::InvertedTimeWindow("C3".to_string())
    );
}
