//! The ordered set of navigable file indexes for one session.

use crate::index::FileIndex;
use std::path::PathBuf;

/// A file index with its 1-based catalog id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: usize,
    pub index: FileIndex,
}

/// A file that could not be indexed and was left out of the catalog.
#[derive(Debug, Clone)]
pub struct IndexFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Read-only catalog of file indexes, in discovery order.
///
/// Only files with at least one navigable page are present. Ids are positions in
/// this sequence, starting at 1.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    failures: Vec<IndexFailure>,
}

impl Catalog {
    /// Build a catalog from indexes already sorted in discovery order.
    ///
    /// Indexes without navigable pages are dropped before ids are assigned.
    pub fn from_ordered(indexes: Vec<FileIndex>, failures: Vec<IndexFailure>) -> Self {
        let entries = indexes
            .into_iter()
            .filter(|index| !index.is_empty())
            .enumerate()
            .map(|(position, index)| CatalogEntry {
                id: position + 1,
                index,
            })
            .collect();

        Self { entries, failures }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a 1-based id
    pub fn get(&self, id: usize) -> Option<&CatalogEntry> {
        id.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Files excluded because indexing them failed
    pub fn failures(&self) -> &[IndexFailure] {
        &self.failures
    }

    pub fn total_matches(&self) -> u64 {
        self.entries.iter().map(|e| e.index.match_count).sum()
    }
}
