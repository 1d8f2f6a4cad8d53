//! Key-set and field-level comparison of two snapshots

use crate::record::{TransferField, TransferRecord, ViewRecord};
use indexmap::IndexMap;
use std::fmt::Debug;

/// A record type that knows how to describe its differences from another
/// record of the same key.
pub trait RecordDiff {
    type Diff: Debug + Clone + PartialEq;

    /// `None` when every tracked field is equal
    fn diff(&self, other: &Self) -> Option<Self::Diff>;
}

/// Before/after pair for one transfer field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: TransferField,
    pub before: String,
    pub after: String,
}

/// Differing fields of a transfer record. Unchanged fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferDiff {
    pub changes: Vec<FieldChange>,
}

impl TransferDiff {
    pub fn get(&self, field: TransferField) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.field == field)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl RecordDiff for TransferRecord {
    type Diff = TransferDiff;

    fn diff(&self, other: &Self) -> Option<TransferDiff> {
        let changes: Vec<FieldChange> = TransferField::ALL
            .iter()
            .filter_map(|&field| {
                let before = self.field(field);
                let after = other.field(field);
                (before != after).then_some(FieldChange {
                    field,
                    before,
                    after,
                })
            })
            .collect();

        if changes.is_empty() {
            None
        } else {
            Some(TransferDiff { changes })
        }
    }
}

/// Whole-value mismatch for view records
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub before: ViewRecord,
    pub after: ViewRecord,
}

impl RecordDiff for ViewRecord {
    type Diff = ValueChange;

    fn diff(&self, other: &Self) -> Option<ValueChange> {
        if self == other {
            return None;
        }
        Some(ValueChange {
            before: self.clone(),
            after: other.clone(),
        })
    }
}

/// Result of comparing a first (source) map against a second (target) map.
///
/// All three collections are ordered by key.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotDiff<V: RecordDiff> {
    pub only_in_first: IndexMap<String, V>,
    pub only_in_second: IndexMap<String, V>,
    pub changed: IndexMap<String, V::Diff>,
}

impl<V: RecordDiff> SnapshotDiff<V> {
    pub fn is_empty(&self) -> bool {
        self.only_in_first.is_empty() && self.only_in_second.is_empty() && self.changed.is_empty()
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            only_in_first: self.only_in_first.len(),
            only_in_second: self.only_in_second.len(),
            changed: self.changed.len(),
        }
    }
}

/// Entry counts of each result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffSummary {
    pub only_in_first: usize,
    pub only_in_second: usize,
    pub changed: usize,
}

impl DiffSummary {
    pub fn total(&self) -> usize {
        self.only_in_first + self.only_in_second + self.changed
    }
}

/// Compare two key to value maps
pub fn diff_snapshots<V>(first: &IndexMap<String, V>, second: &IndexMap<String, V>) -> SnapshotDiff<V>
where
    V: RecordDiff + Clone,
{
    let mut only_in_first = IndexMap::new();
    let mut changed = IndexMap::new();

    for (key, value) in first {
        match second.get(key) {
            None => {
                only_in_first.insert(key.clone(), value.clone());
            }
            Some(other) => {
                if let Some(diff) = value.diff(other) {
                    changed.insert(key.clone(), diff);
                }
            }
        }
    }

    let mut only_in_second: IndexMap<String, V> = second
        .iter()
        .filter(|(key, _)| !first.contains_key(*key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    only_in_first.sort_keys();
    only_in_second.sort_keys();
    changed.sort_keys();

    SnapshotDiff {
        only_in_first,
        only_in_second,
        changed,
    }
}
