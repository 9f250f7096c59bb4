//! Process-wide aggregation state and its thread-safe handle

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::query;
use super::{
    HitBucket, HitBuckets, HitWindow, ReferrerCount, Size, SizeCount, StatCategory, StatValue,
    ValueStore,
};

/// The four value stores and the hit window.
#[derive(Debug, Default)]
pub struct StatsState {
    pub paths: ValueStore<String>,
    pub texts: ValueStore<String>,
    pub sizes: ValueStore<Size>,
    pub referrers: ValueStore<String>,
    pub hits: HitWindow,
}

impl StatsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-increment `value` in the store picked by `category`.
    ///
    /// Returns `false` without touching anything when the payload does not
    /// belong in that store (a size for `Paths`, text for `Sizes`).
    pub fn append(&mut self, category: StatCategory, value: StatValue, now: DateTime<Utc>) -> bool {
        match (category, value) {
            (StatCategory::Sizes, StatValue::Size(size)) => {
                self.sizes.append(size, now);
                true
            }
            (StatCategory::Paths, StatValue::Text(text)) => {
                self.paths.append(text, now);
                true
            }
            (StatCategory::Texts, StatValue::Text(text)) => {
                self.texts.append(text, now);
                true
            }
            (StatCategory::Referrers, StatValue::Text(text)) => {
                self.referrers.append(text, now);
                true
            }
            (category, value) => {
                debug!(%category, ?value, "Ignoring value for mismatched stat category");
                false
            }
        }
    }

    pub fn record_hit(&mut self, now: DateTime<Utc>) {
        self.hits.record(now);
    }

    /// Apply everything one served image request contributes
    pub fn observe(&mut self, observation: &Observation, now: DateTime<Utc>) {
        self.paths.append(observation.path.clone(), now);
        if let Some(text) = &observation.text {
            self.texts.append(text.clone(), now);
        }
        self.sizes.append(observation.size, now);
        if let Some(referrer) = &observation.referrer {
            self.referrers.append(referrer.clone(), now);
        }
        self.hits.record(now);
    }

    /// Return to the initial empty configuration
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The write-side record of one accepted image request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Normalized request path including the canonical query string
    pub path: String,
    pub text: Option<String>,
    pub size: Size,
    pub referrer: Option<String>,
}

/// Shared handle to the aggregation state.
///
/// Every operation takes the lock for its whole body, so an `observe` from
/// one request never interleaves with another request's update or with a
/// query scan. The lock is never held across an await point.
#[derive(Debug)]
pub struct StatsAggregator {
    state: Mutex<StatsState>,
    buckets: HitBuckets,
}

impl StatsAggregator {
    /// Create an empty aggregator with the default 5s/10s/15s buckets
    pub fn new() -> Self {
        Self::with_buckets(HitBuckets::default())
    }

    /// Create an empty aggregator with custom hit buckets
    pub fn with_buckets(buckets: HitBuckets) -> Self {
        Self {
            state: Mutex::new(StatsState::new()),
            buckets,
        }
    }

    pub fn buckets(&self) -> &HitBuckets {
        &self.buckets
    }

    fn lock(&self) -> MutexGuard<'_, StatsState> {
        // Every mutation leaves the state consistent, so a panic elsewhere
        // while holding the lock does not invalidate it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `value` in the store picked by `category`
    pub fn append(&self, category: StatCategory, value: impl Into<StatValue>) -> bool {
        self.append_at(category, value, Utc::now())
    }

    pub fn append_at(
        &self,
        category: StatCategory,
        value: impl Into<StatValue>,
        now: DateTime<Utc>,
    ) -> bool {
        self.lock().append(category, value.into(), now)
    }

    /// Record one served request in the hit window
    pub fn record_hit(&self) {
        self.record_hit_at(Utc::now());
    }

    pub fn record_hit_at(&self, now: DateTime<Utc>) {
        self.lock().record_hit(now);
    }

    /// Apply a whole image request atomically
    pub fn observe(&self, observation: &Observation) {
        self.observe_at(observation, Utc::now());
    }

    pub fn observe_at(&self, observation: &Observation, now: DateTime<Utc>) {
        self.lock().observe(observation, now);
    }

    pub fn recent_paths(&self, limit: usize) -> Vec<String> {
        query::recent(&self.lock().paths, limit)
    }

    pub fn recent_texts(&self, limit: usize) -> Vec<String> {
        query::recent(&self.lock().texts, limit)
    }

    pub fn recent_sizes(&self, limit: usize) -> Vec<Size> {
        query::recent(&self.lock().sizes, limit)
    }

    pub fn top_sizes(&self, limit: usize) -> Vec<SizeCount> {
        query::top_sizes(&self.lock().sizes, limit)
    }

    pub fn top_referrers(&self, limit: usize) -> Vec<ReferrerCount> {
        query::top_referrers(&self.lock().referrers, limit)
    }

    /// Hit counts per bucket as of now
    pub fn hits(&self) -> Vec<HitBucket> {
        self.hits_at(Utc::now())
    }

    pub fn hits_at(&self, now: DateTime<Utc>) -> Vec<HitBucket> {
        self.buckets.count(&self.lock().hits, now)
    }

    /// Hits recorded since the last reset
    pub fn total_hits(&self) -> usize {
        self.lock().hits.len()
    }

    /// Discard all stores and the hit window in one step
    pub fn reset(&self) {
        self.lock().reset();
        info!("Usage stats reset");
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}
