//! Benchmarks for the CVRPTW solver.

#[cfg(feature = "bench")]
extern crate criterion;

#[cfg(feature = "bench")]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gls_vrptw::config::Config;
use gls_vrptw::problem::{ArcSpec, Node, Problem, VehicleSpec};
use gls_vrptw::{construction, GlsSolver};
use std::time::Duration;

/// Create a benchmark instance with `size` customers on a grid around one
/// depot, connected by a complete symmetric arc table (Manhattan metric,
/// 50 km/h).
fn create_benchmark_problem(size: usize) -> Problem {
    let grid = (size as f64).sqrt().ceil() as usize;
    let coord = |i: usize| -> (f64, f64) {
        // Node 0 is the depot at the origin.
        if i == 0 {
            (0.0, 0.0)
        } else {
            (((i - 1) % grid) as f64 * 5.0, ((i - 1) / grid) as f64 * 5.0)
        }
    };

    let mut nodes = vec![Node::depot("D1")];
    for i in 1..=size {
        let window_start = 420.0 + (i % 4) as f64 * 120.0;
        nodes.push(
            Node::customer(format!("C{:03}", i), 1.0 + (i % 3) as f64, 5.0)
                .with_window(window_start, window_start + 240.0),
        );
    }

    let id = |i: usize| -> String {
        if i == 0 {
            "D1".to_string()
        } else {
            format!("C{:03}", i)
        }
    };
    let mut arcs = Vec::new();
    for a in 0..=size {
        for b in 0..=size {
            if a == b {
                continue;
            }
            let (ax, ay) = coord(a);
            let (bx, by) = coord(b);
            let km = (ax - bx).abs() + (ay - by).abs();
            arcs.push(ArcSpec::new(id(a), id(b), km * 60.0 / 50.0, km));
        }
    }

    let vehicles = (0..(size / 10).max(2))
        .map(|v| VehicleSpec::new(format!("V{:02}", v), 12.0, 400.0, 12.0, 300.0, 2.0, "D1", "D1"))
        .collect();

    match Problem::new(nodes, arcs, vehicles) {
        Ok(problem) => problem,
        Err(e) => panic!("benchmark instance is malformed: {e}"),
    }
}

#[cfg(feature = "bench")]
fn benchmark_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for size in [20, 50, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let config = Config::new();

            b.iter(|| construction::build_initial(&problem, &config));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    for size in [20, 50].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let config = Config::new()
                .with_time_limit(Duration::from_millis(200))
                .with_max_stale_rounds(8);

            b.iter(|| {
                let mut solver = GlsSolver::new(problem.clone(), config.clone());
                solver.run().cost
            });
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
criterion_group!(benches, benchmark_construction, benchmark_solve);
#[cfg(feature = "bench")]
criterion_main!(benches);
