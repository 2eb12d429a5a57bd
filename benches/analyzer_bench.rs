//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stackdist::ReuseAnalyzer;

/// Deterministic pseudorandom trace (64-bit LCG, fixed seed).
fn lcg_trace(keys: u64, len: usize, seed: u64) -> Vec<u64> {
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

fn run_trace(trace: &[u64]) -> i64 {
    let mut analyzer = ReuseAnalyzer::new();
    let mut acc = 0i64;
    for &key in trace {
        acc += analyzer.record(key).expect("record succeeds").as_i64();
    }
    acc
}

fn benchmark_record(c: &mut Criterion) {
    // Uniform reuse over a mid-sized working set
    let uniform = lcg_trace(4096, 100_000, 7);
    c.bench_function("record/uniform_4096_keys", |b| {
        b.iter(|| black_box(run_trace(&uniform)));
    });

    // Every access a first touch: pure insert path
    let cold: Vec<u64> = (0..100_000).collect();
    c.bench_function("record/cold_stream", |b| {
        b.iter(|| black_box(run_trace(&cold)));
    });

    // Cyclic scan: every re-reference pays the full working-set distance
    let cyclic: Vec<u64> = (0..100_000u64).map(|i| i % 512).collect();
    c.bench_function("record/cyclic_512_keys", |b| {
        b.iter(|| black_box(run_trace(&cyclic)));
    });
}

criterion_group!(benches, benchmark_record);
criterion_main!(benches);
