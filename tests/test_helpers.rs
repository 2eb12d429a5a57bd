//! Shared helpers for integration tests
#![allow(dead_code)]

use std::collections::HashSet;

use stackdist::ReuseAnalyzer;

/// Brute-force O(n²) reference: for each access, find the previous
/// reference to the same key and count the distinct keys strictly between
/// the two; -1 when there is no previous reference.
pub fn naive_distances(trace: &[u64]) -> Vec<i64> {
    let mut out = Vec::with_capacity(trace.len());
    for (i, &key) in trace.iter().enumerate() {
        match trace[..i].iter().rposition(|&k| k == key) {
            None => out.push(-1),
            Some(prev) => {
                let distinct: HashSet<u64> = trace[prev + 1..i].iter().copied().collect();
                out.push(distinct.len() as i64);
            }
        }
    }
    out
}

/// Run a trace through a fresh analyzer and collect signed distances.
pub fn analyzed_distances(trace: &[u64]) -> Vec<i64> {
    let mut analyzer = ReuseAnalyzer::new();
    trace
        .iter()
        .map(|&key| analyzer.record(key).expect("record succeeds").as_i64())
        .collect()
}

/// Cyclic trace over `keys` distinct keys.
pub fn cyclic_trace(keys: u64, len: usize) -> Vec<u64> {
    (0..len).map(|i| i as u64 % keys).collect()
}

/// Deterministic pseudorandom trace (64-bit LCG, fixed seed).
pub fn lcg_trace(keys: u64, len: usize, seed: u64) -> Vec<u64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) % keys
        })
        .collect()
}
