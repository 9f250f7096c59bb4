//! Ranked and recency-ordered projections over a [`ValueStore`]
//!
//! Every function here works on a copy of the store's records, so queries
//! never reorder or otherwise touch the store itself. Sorting is stable:
//! records that compare equal keep their store order.

use std::cmp::Reverse;

use super::{ReferrerCount, Size, SizeCount, StatRecord, ValueStore};

/// Number of items the reporting endpoints return unless told otherwise
pub const DEFAULT_LIMIT: usize = 10;

/// First `n` items of `items`, or all of them when there are fewer.
pub fn take_first<T>(items: impl IntoIterator<Item = T>, n: usize) -> Vec<T> {
    items.into_iter().take(n).collect()
}

/// Interpret a raw `limit` query value.
///
/// A missing value means `default`. Anything that is not a non-negative
/// integer yields 0, so the caller gets an empty projection rather than an
/// error or the full list.
pub fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or(0),
    }
}

fn ordered_by<T, K, F>(store: &ValueStore<T>, key: F) -> Vec<StatRecord<T>>
where
    T: PartialEq + Clone,
    K: Ord,
    F: FnMut(&StatRecord<T>) -> K,
{
    let mut records = store.snapshot();
    records.sort_by_key(key);
    records
}

/// Records sorted newest-seen first
pub fn order_by_time<T: PartialEq + Clone>(store: &ValueStore<T>) -> Vec<StatRecord<T>> {
    ordered_by(store, |r| Reverse(r.last_seen_at))
}

/// Records sorted most-seen first
pub fn order_by_count<T: PartialEq + Clone>(store: &ValueStore<T>) -> Vec<StatRecord<T>> {
    ordered_by(store, |r| Reverse(r.count))
}

/// The `limit` most recently seen values
pub fn recent<T: PartialEq + Clone>(store: &ValueStore<T>, limit: usize) -> Vec<T> {
    take_first(order_by_time(store).into_iter().map(|r| r.value), limit)
}

/// The `limit` most frequently seen records
pub fn top_by_count<T: PartialEq + Clone>(
    store: &ValueStore<T>,
    limit: usize,
) -> Vec<StatRecord<T>> {
    take_first(order_by_count(store), limit)
}

/// Most requested sizes as `{w, h, n}`
pub fn top_sizes(store: &ValueStore<Size>, limit: usize) -> Vec<SizeCount> {
    top_by_count(store, limit)
        .into_iter()
        .map(|r| SizeCount {
            w: r.value.w,
            h: r.value.h,
            n: r.count,
        })
        .collect()
}

/// Most frequent referrers as `{ref, n}`
pub fn top_referrers(store: &ValueStore<String>, limit: usize) -> Vec<ReferrerCount> {
    top_by_count(store, limit)
        .into_iter()
        .map(|r| ReferrerCount {
            referrer: r.value,
            n: r.count,
        })
        .collect()
}
