//! A single deduplicated observation

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One distinct value seen by a [`ValueStore`](super::ValueStore), with how
/// many times it was seen and when it was last seen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRecord<T> {
    /// The observed payload
    pub value: T,
    /// Number of observations of an equal value since the last reset (always >= 1)
    pub count: u64,
    /// Time of the most recent observation
    pub last_seen_at: DateTime<Utc>,
}

impl<T> StatRecord<T> {
    /// First observation of `value`
    pub fn new(value: T, now: DateTime<Utc>) -> Self {
        Self {
            value,
            count: 1,
            last_seen_at: now,
        }
    }

    /// Register another observation of the same value
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.count += 1;
        self.last_seen_at = now;
    }
}
