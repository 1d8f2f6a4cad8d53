//! Replica fan-out validation

use indexmap::IndexMap;

/// Keys whose observed occurrence count differs from the expected replica
/// count, paired with the observed count and ordered by key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplicaAnomalies {
    pub expected: usize,
    pub keys: IndexMap<String, usize>,
}

impl ReplicaAnomalies {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys seen fewer times than expected
    pub fn under_replicated(&self) -> impl Iterator<Item = (&String, &usize)> {
        self.keys.iter().filter(move |&(_, &count)| count < self.expected)
    }

    /// Keys seen more times than expected
    pub fn over_replicated(&self) -> impl Iterator<Item = (&String, &usize)> {
        self.keys.iter().filter(move |&(_, &count)| count > self.expected)
    }
}

pub fn check_replica_counts(counts: &IndexMap<String, usize>, expected: usize) -> ReplicaAnomalies {
    let mut keys: IndexMap<String, usize> = counts
        .iter()
        .filter(|&(_, &count)| count != expected)
        .map(|(key, &count)| (key.clone(), count))
        .collect();
    keys.sort_keys();

    ReplicaAnomalies { expected, keys }
}
