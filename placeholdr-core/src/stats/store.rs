//! Per-category collection of deduplicated records

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use super::StatRecord;

/// Insert-or-increment collection of [`StatRecord`]s for one category.
///
/// Newly seen values go to the front, so iteration yields records in
/// most-recently-created-first order. Re-observing a value updates its record
/// in place without moving it; callers that want recency ordering must sort
/// by [`StatRecord::last_seen_at`].
#[derive(Debug, Clone)]
pub struct ValueStore<T> {
    records: VecDeque<StatRecord<T>>,
}

impl<T: PartialEq> ValueStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
        }
    }

    /// Record an observation of `value` at `now`.
    ///
    /// Returns the count of the matching record after the update.
    pub fn append(&mut self, value: T, now: DateTime<Utc>) -> u64 {
        if let Some(existing) = self.records.iter_mut().find(|r| r.value == value) {
            existing.touch(now);
            return existing.count;
        }

        self.records.push_front(StatRecord::new(value, now));
        1
    }

    /// Look up the record for a value
    pub fn get(&self, value: &T) -> Option<&StatRecord<T>> {
        self.records.iter().find(|r| &r.value == value)
    }

    /// Records in store order (most-recently-created first)
    pub fn iter(&self) -> impl Iterator<Item = &StatRecord<T>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<T: PartialEq + Clone> ValueStore<T> {
    /// Owned copy of the records in store order
    pub fn snapshot(&self) -> Vec<StatRecord<T>> {
        self.records.iter().cloned().collect()
    }
}

impl<T: PartialEq> Default for ValueStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Size;
    use chrono::Duration;

    #[test]
    fn test_new_values_go_to_front() {
        let now = Utc::now();
        let mut store = ValueStore::new();
        store.append("a".to_string(), now);
        store.append("b".to_string(), now);
        store.append("c".to_string(), now);

        let order: Vec<_> = store.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_repeat_value_increments_without_moving() {
        let t0 = Utc::now();
        let mut store = ValueStore::new();
        store.append("a".to_string(), t0);
        store.append("b".to_string(), t0);

        let count = store.append("a".to_string(), t0 + Duration::seconds(1));

        assert_eq!(count, 2);
        assert_eq!(store.len(), 2);
        let order: Vec<_> = store.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
        let a = store.get(&"a".to_string()).unwrap();
        assert_eq!(a.last_seen_at, t0 + Duration::seconds(1));
    }

    #[test]
    fn test_sizes_compare_by_every_field() {
        let now = Utc::now();
        let mut store = ValueStore::new();
        store.append(Size::new(10, 20), now);
        store.append(Size::new(20, 10), now);
        store.append(Size::new(10, 20), now);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&Size::new(10, 20)).unwrap().count, 2);
        assert_eq!(store.get(&Size::new(20, 10)).unwrap().count, 1);
    }

    #[test]
    fn test_count_matches_number_of_appends() {
        let now = Utc::now();
        let mut store = ValueStore::new();
        let values = ["x", "y", "x", "z", "x", "y"];
        for v in values {
            store.append(v.to_string(), now);
        }

        for v in ["x", "y", "z"] {
            let expected = values.iter().filter(|&&s| s == v).count() as u64;
            assert_eq!(store.get(&v.to_string()).unwrap().count, expected);
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_clear_empties_store() {
        let mut store = ValueStore::new();
        store.append(1u32, Utc::now());
        store.clear();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }
}
