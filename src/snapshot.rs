//! In-memory snapshot of one dump directory

use indexmap::IndexMap;

/// Key to value mapping merged from every file of a dump, together with how
/// many times each key was seen.
///
/// The first value seen for a key is kept; later occurrences only bump the
/// count. Iteration follows first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<V> {
    values: IndexMap<String, V>,
    counts: IndexMap<String, usize>,
}

impl<V> Snapshot<V> {
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
            counts: IndexMap::new(),
        }
    }

    /// Record one occurrence of `key`. Returns `true` if the key was new.
    pub fn insert(&mut self, key: String, value: V) -> bool {
        *self.counts.entry(key.clone()).or_insert(0) += 1;
        if self.values.contains_key(&key) {
            return false;
        }
        self.values.insert(key, value);
        true
    }

    /// Fold another snapshot into this one, summing counts
    pub fn merge(&mut self, other: Snapshot<V>) {
        let Snapshot { values, counts } = other;
        for (key, count) in counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
        for (key, value) in values {
            self.values.entry(key).or_insert(value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of times `key` was seen, zero if never
    pub fn count(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total occurrences across all keys, duplicates included
    pub fn total_occurrences(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn values(&self) -> &IndexMap<String, V> {
        &self.values
    }

    pub fn counts(&self) -> &IndexMap<String, usize> {
        &self.counts
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &V)> {
        self.values.iter()
    }
}

impl<V> Default for Snapshot<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(String, V)> for Snapshot<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for (key, value) in iter {
            snapshot.insert(key, value);
        }
        snapshot
    }
}
