//! Page offset indexing for one or many files.
//!
//! - [`indexer`] streams a single file and produces its [`FileIndex`]
//! - [`aggregator`] runs one indexer per discovered file concurrently
//! - [`catalog`] holds the ordered, navigable result of a run

pub mod aggregator;
pub mod catalog;
pub mod indexer;

pub use aggregator::Aggregator;
pub use catalog::{Catalog, CatalogEntry, IndexFailure};
pub use indexer::{index_file, index_reader};

use std::path::PathBuf;

/// Page start offsets of one file under the active filter.
///
/// Built once by an indexer run and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIndex {
    pub path: PathBuf,

    /// Byte offsets where each navigable page starts
    ///
    /// - Strictly increasing
    /// - Without a filter: one entry per page, `offsets[0] == 0`
    /// - With a filter: only pages holding at least one match
    pub offsets: Vec<u64>,

    /// Total filter matches in the file (0 without a filter)
    pub match_count: u64,

    /// Lines in the file
    pub line_count: u64,

    /// Pages in the file ignoring the filter
    pub page_count: usize,
}

impl FileIndex {
    /// Number of navigable pages
    pub fn num_pages(&self) -> usize {
        self.offsets.len()
    }

    /// True when no page is navigable and the file should be left out of the catalog
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Start offset of a 1-based page
    pub fn page_offset(&self, page: usize) -> Option<u64> {
        page.checked_sub(1).and_then(|i| self.offsets.get(i).copied())
    }
}
