//! Unit tests for the cheapest-feasible-insertion construction.

use gls_vrptw::config::Config;
use gls_vrptw::construction;
use gls_vrptw::problem::{ArcSpec, Node, Problem, VehicleSpec};

fn symmetric(from: &str, to: &str, time: f64, distance: f64) -> [ArcSpec; 2] {
    [
        ArcSpec::new(from, to, time, distance),
        ArcSpec::new(to, from, time, distance),
    ]
}

/// The two-customer scenario: both fit one vehicle in window order C1, C2.
fn create_test_problem(capacity: f64) -> Problem {
    let nodes = vec![
        Node::depot("D1"),
        Node::customer("C1", 5.0, 0.0).with_window(480.0, 600.0),
        Node::customer("C2", 5.0, 0.0).with_window(600.0, 720.0),
    ];
    let arcs = [
        symmetric("D1", "C1", 15.0, 10.0),
        symmetric("D1", "C2", 30.0, 20.0),
        symmetric("C1", "C2", 10.0, 5.0),
    ]
    .into_iter()
    .flatten()
    .collect();
    let vehicles = vec![VehicleSpec::new("V1", capacity, 100.0, 24.0, 0.0, 1.0, "D1", "D1")];
    Problem::new(nodes, arcs, vehicles).unwrap()
}

#[test]
fn test_inserts_both_customers_in_window_order() {
    let problem = create_test_problem(10.0);
    let solution = construction::build_initial(&problem, &Config::new());

    let c1 = problem.node_index("C1").unwrap();
    let c2 = problem.node_index("C2").unwrap();
    assert_eq!(solution.routes[0].customers, vec![c1, c2]);
    assert!(solution.dropped.is_empty());
    assert_eq!(solution.routes[0].distance, 35.0);
}

#[test]
fn test_construction_is_deterministic() {
    let problem = create_test_problem(10.0);
    let a = construction::build_initial(&problem, &Config::new());
    let b = construction::build_initial(&problem, &Config::new());

    for (ra, rb) in a.routes.iter().zip(&b.routes) {
        assert_eq!(ra.customers, rb.customers);
    }
    assert_eq!(a.dropped, b.dropped);
    assert_eq!(a.cost, b.cost);
}

#[test]
fn test_infeasible_customers_stay_dropped() {
    let problem = create_test_problem(4.0);
    let config = Config::new();
    let solution = construction::build_initial(&problem, &config);

    assert!(solution.routes[0].is_empty());
    assert_eq!(solution.dropped.len(), 2);
    assert_eq!(solution.cost, 2.0 * config.drop_penalty);
}

#[test]
fn test_cost_ties_break_on_lowest_identifier() {
    // C1 and C2 are interchangeable by cost, but unreachable from each
    // other; with one slot per vehicle the lower identifier goes first.
    let nodes = vec![
        Node::depot("D1"),
        Node::customer("C1", 5.0, 0.0),
        Node::customer("C2", 5.0, 0.0),
    ];
    let arcs = [symmetric("D1", "C1", 10.0, 10.0), symmetric("D1", "C2", 10.0, 10.0)]
        .into_iter()
        .flatten()
        .collect();
    let vehicles = vec![
        VehicleSpec::new("V1", 5.0, 100.0, 24.0, 0.0, 1.0, "D1", "D1"),
        VehicleSpec::new("V2", 5.0, 100.0, 24.0, 0.0, 1.0, "D1", "D1"),
    ];
    let problem = Problem::new(nodes, arcs, vehicles).unwrap();

    let solution = construction::build_initial(&problem, &Config::new());
    let c1 = problem.node_index("C1").unwrap();
    let c2 = problem.node_index("C2").unwrap();
    assert_eq!(solution.routes[0].customers, vec![c1]);
    assert_eq!(solution.routes[1].customers, vec![c2]);
}

#[test]
fn test_partition_invariant_after_construction() {
    let problem = create_test_problem(5.0);
    let solution = construction::build_initial(&problem, &Config::new());

    for &customer in problem.customers() {
        let routed = solution
            .routes
            .iter()
            .filter(|r| r.customers.contains(&customer))
            .count();
        let dropped = solution.dropped.contains(&customer) as usize;
        assert_eq!(routed + dropped, 1);
    }
}
