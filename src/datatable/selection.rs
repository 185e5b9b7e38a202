//! Bulk-selection bookkeeping keyed by stable row identity.

use super::types::{Row, RowId};
use std::collections::BTreeSet;

/// Computes the identity of the row at `index` in the source collection.
///
/// With a key field configured and a non-null value present, the value's
/// string form is used; otherwise the source position is. Key values listed
/// in `duplicates` are not unique in the row set and fall back to position.
pub fn row_id(
    row_key: Option<&str>,
    duplicates: &BTreeSet<String>,
    index: usize,
    row: &Row,
) -> RowId {
    match row_key.map(|key| row.get(key)) {
        Some(value) if !value.is_null() => {
            let key = value.to_string();
            if duplicates.contains(&key) {
                RowId::Position(index)
            } else {
                RowId::Key(key)
            }
        }
        _ => RowId::Position(index),
    }
}

/// Key values that occur on more than one row.
pub fn duplicate_keys(row_key: Option<&str>, rows: &[Row]) -> BTreeSet<String> {
    let Some(row_key) = row_key else {
        return BTreeSet::new();
    };
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for value in rows.iter().map(|row| row.get(row_key)) {
        if value.is_null() {
            continue;
        }
        let key = value.to_string();
        if !seen.insert(key.clone()) {
            duplicates.insert(key);
        }
    }
    duplicates
}

/// Set of selected row ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<RowId>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: &RowId) -> bool {
        self.ids.contains(id)
    }

    /// Flips membership of `id`. Returns the new membership.
    pub fn toggle(&mut self, id: RowId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Replaces the selection with exactly `ids`.
    pub fn replace<I: IntoIterator<Item = RowId>>(&mut self, ids: I) {
        self.ids = ids.into_iter().collect();
    }

    /// Whether every id in `ids` is selected. False for an empty slice.
    pub fn contains_all(&self, ids: &[RowId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.ids.contains(id))
    }

    /// Drops ids for which `keep` is false.
    pub fn retain(&mut self, keep: impl FnMut(&RowId) -> bool) {
        self.ids.retain(keep);
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates the selected ids in id order.
    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.ids.iter()
    }
}
