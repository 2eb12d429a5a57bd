//! Reuse-distance histogram and LRU hit-ratio readout
//!
//! Mattson's observation: an access with reuse distance d hits in an LRU
//! cache of capacity C exactly when d < C. Folding a trace's distances into
//! a histogram therefore prices every cache size in a single pass.

use crate::Distance;

/// Dense histogram of observed reuse distances.
///
/// Finite distances land in per-distance buckets; cold (first-reference)
/// accesses are tallied separately and count as misses at every capacity.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistanceHistogram {
    /// counts[d] = accesses observed with finite distance d
    counts: Vec<u64>,

    /// Accesses whose key had never been seen before
    cold: u64,

    /// All accesses observed
    total: u64,
}

impl DistanceHistogram {
    /// Empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observed distance in.
    pub fn observe(&mut self, distance: Distance) {
        match distance {
            Distance::Infinite => self.cold += 1,
            Distance::Finite(d) => {
                // Finite distances come from subtree sizes, so they fit usize
                let slot = d as usize;
                if slot >= self.counts.len() {
                    self.counts.resize(slot + 1, 0);
                }
                self.counts[slot] += 1;
            }
        }
        self.total += 1;
    }

    /// All accesses observed
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Cold (first-reference) accesses
    #[inline]
    pub fn cold(&self) -> u64 {
        self.cold
    }

    /// Accesses with a finite reuse distance
    #[inline]
    pub fn finite(&self) -> u64 {
        self.total - self.cold
    }

    /// Accesses observed at exactly `distance`
    pub fn count_at(&self, distance: u64) -> u64 {
        self.counts.get(distance as usize).copied().unwrap_or(0)
    }

    /// Largest finite distance observed, if any
    pub fn max_distance(&self) -> Option<u64> {
        self.counts
            .iter()
            .rposition(|&c| c > 0)
            .map(|d| d as u64)
    }

    /// Fraction of accesses that would hit in an LRU cache holding
    /// `capacity` keys. Zero for an empty histogram.
    pub fn hit_ratio(&self, capacity: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let hits: u64 = self.counts.iter().take(capacity).sum();
        hits as f64 / self.total as f64
    }

    /// Miss ratio at each of the given capacities.
    pub fn miss_ratio_curve(&self, capacities: &[usize]) -> Vec<f64> {
        capacities
            .iter()
            .map(|&c| 1.0 - self.hit_ratio(c))
            .collect()
    }

    /// Iterate `(distance, count)` over non-empty buckets, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(d, &c)| (d as u64, c))
    }
}
