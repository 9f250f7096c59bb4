//! In-memory usage statistics
//!
//! Each served image request is folded into four deduplicating
//! [`ValueStore`]s (paths, texts, sizes, referrers) and a newest-first
//! [`HitWindow`]. The [`query`] functions project those into the lists the
//! reporting API returns. [`StatsAggregator`] owns all of it behind one lock.

mod aggregator;
mod hits;
pub mod query;
mod record;
mod store;
mod types;

pub use aggregator::{Observation, StatsAggregator, StatsState};
pub use hits::{DEFAULT_HIT_BUCKETS_MS, HitBucket, HitBuckets, HitWindow};
pub use query::{DEFAULT_LIMIT, parse_limit, take_first};
pub use record::StatRecord;
pub use store::ValueStore;
pub use types::{ReferrerCount, Size, SizeCount, StatCategory, StatValue};
