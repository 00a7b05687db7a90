//! Basic example: solve a small inline instance and print the JSON report.
//!
//! Table acquisition is the job of an upstream data layer, so the instance
//! here is built in code: one depot, eight customers with morning and
//! afternoon delivery windows, and two vehicles.

use clap::Parser;
use gls_vrptw::config::Config;
use gls_vrptw::problem::{ArcSpec, Node, Problem, VehicleSpec};
use gls_vrptw::GlsSolver;
use std::time::Duration;

#[derive(Parser)]
#[command(about = "Solve a small built-in CVRPTW instance")]
struct Args {
    /// Search budget in seconds.
    #[arg(long, default_value_t = 10)]
    time_limit: u64,
    /// Seed for the shuffled scan orders.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Expand an undirected road record into both directed arcs, with travel
/// time derived from distance at 50 km/h.
fn road(from: &str, to: &str, km: f64) -> [ArcSpec; 2] {
    let minutes = km * 60.0 / 50.0;
    [
        ArcSpec::new(from, to, minutes, km),
        ArcSpec::new(to, from, minutes, km),
    ]
}

fn build_instance() -> Result<Problem, gls_vrptw::error::ConfigurationError> {
    let nodes = vec![
        Node::depot("D1"),
        Node::customer("C1", 4.0, 10.0).with_window(480.0, 720.0),
        Node::customer("C2", 6.0, 10.0).with_window(480.0, 720.0),
        Node::customer("C3", 3.0, 15.0).with_window(540.0, 780.0),
        Node::customer("C4", 5.0, 10.0).with_window(600.0, 900.0),
        Node::customer("C5", 2.0, 5.0).with_window(720.0, 1020.0),
        Node::customer("C6", 7.0, 10.0).with_window(720.0, 1020.0),
        Node::customer("C7", 4.0, 10.0).with_window(840.0, 1080.0),
        Node::customer("C8", 3.0, 5.0).with_window(840.0, 1080.0),
    ];

    let roads = [
        road("D1", "C1", 12.0),
        road("D1", "C2", 18.0),
        road("D1", "C3", 25.0),
        road("D1", "C4", 30.0),
        road("D1", "C5", 16.0),
        road("D1", "C6", 22.0),
        road("D1", "C7", 28.0),
        road("D1", "C8", 14.0),
        road("C1", "C2", 8.0),
        road("C1", "C5", 9.0),
        road("C2", "C3", 10.0),
        road("C3", "C4", 7.0),
        road("C4", "C6", 11.0),
        road("C5", "C8", 6.0),
        road("C6", "C7", 9.0),
        road("C7", "C8", 13.0),
    ];
    let arcs = roads.into_iter().flatten().collect();

    let vehicles = vec![
        VehicleSpec::new("V1", 20.0, 150.0, 10.0, 500.0, 2.0, "D1", "D1"),
        VehicleSpec::new("V2", 15.0, 120.0, 8.0, 400.0, 2.5, "D1", "D1"),
    ];

    Problem::new(nodes, arcs, vehicles)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let problem = build_instance()?;
    println!(
        "Solving: {} customers, {} vehicles",
        problem.customer_count(),
        problem.vehicles.len()
    );

    let config = Config::new()
        .with_time_limit(Duration::from_secs(args.time_limit))
        .with_seed(args.seed);

    let mut solver = GlsSolver::new(problem, config);
    solver.run();
    println!(
        "Finished after {} rounds in {:.1?}",
        solver.rounds, solver.run_time
    );

    match solver.report() {
        Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
        None => println!("no solution produced"),
    }
    Ok(())
}
