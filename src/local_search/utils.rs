//! Shared helpers for the move library.

use crate::problem::Problem;

/// The `granularity` customers nearest to `customer` by arc distance,
/// closest first. Depots and unreachable customers are excluded.
pub fn nearest_customers(customer: usize, problem: &Problem, granularity: usize) -> Vec<usize> {
    let mut distances: Vec<(usize, f64)> = problem
        .customers()
        .iter()
        .copied()
        .filter(|&c| c != customer)
        .map(|c| (c, problem.distance(customer, c)))
        .collect();

    distances.sort_by(|a, b| a.1.total_cmp(&b.1));
    distances.truncate(granularity);
    distances.into_iter().map(|(c, _)| c).collect()
}

/// Copy of `customers` with the visit at `pos` removed.
pub fn without(customers: &[usize], pos: usize) -> Vec<usize> {
    let mut out = customers.to_vec();
    out.remove(pos);
    out
}

/// Copy of `customers` with the `len` visits starting at `pos` removed.
pub fn without_segment(customers: &[usize], pos: usize, len: usize) -> Vec<usize> {
    let mut out = customers.to_vec();
    out.drain(pos..pos + len);
    out
}

/// Copy of `customers` with `candidate` inserted before position `pos`.
pub fn with_inserted(customers: &[usize], pos: usize, candidate: usize) -> Vec<usize> {
    let mut out = customers.to_vec();
    out.insert(pos, candidate);
    out
}

/// Copy of `customers` with `segment` spliced in before position `pos`,
/// order preserved.
pub fn with_segment(customers: &[usize], pos: usize, segment: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(customers.len() + segment.len());
    out.extend_from_slice(&customers[..pos]);
    out.extend_from_slice(segment);
    out.extend_from_slice(&customers[pos..]);
    out
}
