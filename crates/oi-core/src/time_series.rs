//! Ordered key/value container used for fixing histories.
//!
//! Keys are kept sorted so that "everything before today" scans and
//! first/last lookups are logarithmic.

use std::collections::BTreeMap;
use std::ops::RangeBounds;

/// An ordered series of observations keyed by `K` (typically a date).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<K: Ord, V> {
    data: BTreeMap<K, V>,
}

impl<K: Ord, V> Default for TimeSeries<K, V> {
    fn default() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V> TimeSeries<K, V> {
    /// An empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) the observation at `key`, returning the
    /// previous value if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.data.insert(key, value)
    }

    /// Observation at `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.data.get(key)
    }

    /// Remove the observation at `key`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.data.remove(key)
    }

    /// `true` if an observation exists at `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.contains_key(key)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` when the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Earliest key.
    pub fn first_key(&self) -> Option<&K> {
        self.data.keys().next()
    }

    /// Latest key.
    pub fn last_key(&self) -> Option<&K> {
        self.data.keys().next_back()
    }

    /// Most recent observation at or before `key`.
    pub fn latest_on_or_before(&self, key: &K) -> Option<(&K, &V)> {
        self.data.range(..=key).next_back()
    }

    /// Observations whose keys fall in `range`, in ascending order.
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> impl Iterator<Item = (&K, &V)> {
        self.data.range(range)
    }

    /// Iterate over all observations in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.data.iter()
    }

    /// Drop every observation.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TimeSeries<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord, V> Extend<(K, V)> for TimeSeries<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_sorted() {
        let ts: TimeSeries<i32, f64> = [(3, 0.03), (1, 0.01), (2, 0.02)].into_iter().collect();
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.first_key(), Some(&1));
        assert_eq!(ts.last_key(), Some(&3));
        let keys: Vec<_> = ts.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn insert_overwrites() {
        let mut ts = TimeSeries::new();
        assert_eq!(ts.insert(5, 1.0), None);
        assert_eq!(ts.insert(5, 2.0), Some(1.0));
        assert_eq!(ts.get(&5), Some(&2.0));
        assert_eq!(ts.remove(&5), Some(2.0));
        assert!(ts.is_empty());
    }

    #[test]
    fn latest_on_or_before_skips_gaps() {
        let ts: TimeSeries<i32, &str> = [(1, "a"), (4, "b"), (9, "c")].into_iter().collect();
        assert_eq!(ts.latest_on_or_before(&4), Some((&4, &"b")));
        assert_eq!(ts.latest_on_or_before(&8), Some((&4, &"b")));
        assert_eq!(ts.latest_on_or_before(&0), None);
        assert_eq!(ts.range(2..9).count(), 1);
    }
}
