//! Distance scenarios with hand-checked expectations

use stackdist::{DistanceHistogram, ReuseAnalyzer};
use test_case::test_case;

mod test_helpers;
use test_helpers::*;

#[test_case(&[1, 1], &[-1, 0]; "immediate rereference")]
#[test_case(&[1, 2, 1], &[-1, -1, 1]; "one key between references")]
#[test_case(&[1, 2, 3, 1, 2], &[-1, -1, -1, 2, 2]; "two keys between references")]
#[test_case(&[1, 2, 3, 4, 2, 1], &[-1, -1, -1, -1, 2, 3]; "reuse in reversed order")]
#[test_case(&[], &[]; "empty trace")]
#[test_case(&[9], &[-1]; "single access")]
#[test_case(&[5, 5, 5, 5], &[-1, 0, 0, 0]; "repeated single key")]
fn trace_distances(trace: &[u64], expected: &[i64]) {
    assert_eq!(analyzed_distances(trace), expected);
    // the brute-force reference agrees on every scenario
    assert_eq!(naive_distances(trace), expected);
}

#[test]
fn cyclic_trace_settles_at_keys_minus_one() {
    let keys = 8u64;
    let distances = analyzed_distances(&cyclic_trace(keys, 64));

    for (i, &d) in distances.iter().enumerate() {
        if i < keys as usize {
            assert_eq!(d, -1, "access {i} should be a cold miss");
        } else {
            assert_eq!(d, keys as i64 - 1, "access {i} cycles through all keys");
        }
    }
}

#[test]
fn extreme_keys_are_ordinary_keys() {
    assert_eq!(
        analyzed_distances(&[u64::MAX, 0, u64::MAX]),
        vec![-1, -1, 1]
    );
}

#[test]
fn distances_only_count_distinct_keys() {
    // 2 appears three times between the two references to 1, but counts once
    assert_eq!(
        analyzed_distances(&[1, 2, 2, 2, 1]),
        vec![-1, -1, 0, 0, 1]
    );
}

#[test]
fn histogram_prices_lru_hit_ratio() {
    // Alternating keys: two cold misses, then eight accesses at distance 1
    let trace: Vec<u64> = (0..10).map(|i| i % 2).collect();
    let mut analyzer = ReuseAnalyzer::new();
    let mut histogram = DistanceHistogram::new();
    for &key in &trace {
        histogram.observe(analyzer.record(key).expect("record succeeds"));
    }

    assert_eq!(histogram.total(), 10);
    assert_eq!(histogram.cold(), 2);
    // A single-key cache never hits; a two-key cache holds both
    assert_eq!(histogram.hit_ratio(1), 0.0);
    assert_eq!(histogram.hit_ratio(2), 8.0 / 10.0);
}
