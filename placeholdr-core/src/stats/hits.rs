//! Sliding-window hit counter

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default bucket thresholds in milliseconds
pub const DEFAULT_HIT_BUCKETS_MS: [u64; 3] = [5_000, 10_000, 15_000];

/// Newest-first log of served image requests.
///
/// Timestamps are always pushed to the front, so reading front to back is
/// non-increasing in time. [`HitBuckets::count`] depends on this ordering.
#[derive(Debug, Clone, Default)]
pub struct HitWindow {
    hits: VecDeque<DateTime<Utc>>,
}

impl HitWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hit at `now`
    pub fn record(&mut self, now: DateTime<Utc>) {
        self.hits.push_front(now);
    }

    /// Timestamps, newest first
    pub fn iter(&self) -> impl Iterator<Item = &DateTime<Utc>> {
        self.hits.iter()
    }

    /// Total hits since the last reset
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }
}

/// Number of hits within one threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitBucket {
    /// Human label such as `"5s"`
    pub title: String,
    pub count: u64,
}

/// Ascending set of cumulative age thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitBuckets {
    thresholds_ms: Vec<u64>,
}

impl HitBuckets {
    /// Build from thresholds in milliseconds. Order and duplicates in the
    /// input do not matter.
    pub fn new(thresholds_ms: impl IntoIterator<Item = u64>) -> Self {
        let mut thresholds_ms: Vec<u64> = thresholds_ms.into_iter().collect();
        thresholds_ms.sort_unstable();
        thresholds_ms.dedup();
        Self { thresholds_ms }
    }

    pub fn thresholds_ms(&self) -> &[u64] {
        &self.thresholds_ms
    }

    /// Count hits per threshold as of `now`.
    ///
    /// A hit `age` ms old is counted in every bucket whose threshold is
    /// `>= age`. The scan stops at the first hit older than the largest
    /// threshold.
    pub fn count(&self, window: &HitWindow, now: DateTime<Utc>) -> Vec<HitBucket> {
        let mut counts = vec![0u64; self.thresholds_ms.len()];

        if let Some(&widest) = self.thresholds_ms.last() {
            for hit in window.iter() {
                let age = (now - *hit).num_milliseconds();

                if age > 0 && age as u64 > widest {
                    break;
                }

                for (threshold, count) in self.thresholds_ms.iter().zip(counts.iter_mut()) {
                    if age <= 0 || age as u64 <= *threshold {
                        *count += 1;
                    }
                }
            }
        }

        self.thresholds_ms
            .iter()
            .zip(counts)
            .map(|(&threshold, count)| HitBucket {
                title: bucket_title(threshold),
                count,
            })
            .collect()
    }
}

impl Default for HitBuckets {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_BUCKETS_MS)
    }
}

fn bucket_title(threshold_ms: u64) -> String {
    if threshold_ms % 1000 == 0 {
        format!("{}s", threshold_ms / 1000)
    } else {
        format!("{}ms", threshold_ms)
    }
}
