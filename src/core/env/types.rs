// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Table backing the environment store.
//!
//! ```text
//! EnvTable: Vec<(key, value)> sorted by the active KeyComparator
//!   find   binary search -> Ok(idx) | Err(insert_at)
//!   insert overwrites key spelling AND value on a match
//! ```

use std::collections::BTreeMap;

use super::compare::KeyComparator;

/// Entries unique by equivalence class under the comparator passed to each call.
///
/// Every call must use the same comparator, otherwise the ordering breaks.
#[derive(Debug, Clone, Default)]
pub(super) struct EnvTable {
    entries: Vec<(String, String)>,
}

impl EnvTable {
    fn find(&self, cmp: &dyn KeyComparator, key: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(existing, _)| cmp.compare(existing, key))
    }

    pub(super) fn get(&self, cmp: &dyn KeyComparator, key: &str) -> Option<&str> {
        self.find(cmp, key)
            .ok()
            .map(|idx| self.entries[idx].1.as_str())
    }

    /// Last write wins on both the spelling of the key and its value.
    pub(super) fn insert(&mut self, cmp: &dyn KeyComparator, key: String, value: String) {
        match self.find(cmp, &key) {
            Ok(idx) => self.entries[idx] = (key, value),
            Err(idx) => self.entries.insert(idx, (key, value)),
        }
    }

    pub(super) fn remove(&mut self, cmp: &dyn KeyComparator, key: &str) -> Option<String> {
        self.find(cmp, key)
            .ok()
            .map(|idx| self.entries.remove(idx).1)
    }

    pub(super) fn to_map(&self) -> BTreeMap<String, String> {
        self.entries.iter().cloned().collect()
    }

    pub(super) const fn len(&self) -> usize {
        self.entries.len()
    }
}
