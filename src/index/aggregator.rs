//! Concurrent multi-file indexing.
//!
//! One blocking worker is spawned per file. Workers share nothing but the read-only
//! filter; each reports `(position, result)` on a channel and the aggregator waits
//! until every worker has reported before the catalog is built. Results are placed
//! back by discovery position, so completion order never leaks into catalog ids.

use crate::error::{PagerError, Result};
use crate::filter::FilterSpec;
use crate::index::catalog::{Catalog, IndexFailure};
use crate::index::{index_file, FileIndex};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Message sent by a worker when its file is done
struct WorkerReport {
    position: usize,
    result: Result<FileIndex>,
}

/// Runs one indexer per path and assembles the [`Catalog`].
#[derive(Debug, Clone)]
pub struct Aggregator {
    page_size: usize,
    filter: Arc<FilterSpec>,
    single_file: bool,
}

impl Aggregator {
    pub fn new(page_size: usize, filter: Arc<FilterSpec>) -> Self {
        Self {
            page_size,
            filter,
            single_file: false,
        }
    }

    /// Mark the run as coming from a single file argument, making a read
    /// failure fatal instead of isolated.
    pub fn with_single_file(mut self, single_file: bool) -> Self {
        self.single_file = single_file;
        self
    }

    /// Index every path concurrently and build the catalog.
    ///
    /// Per-file failures are isolated: the file is recorded in
    /// [`Catalog::failures`] and left out. The only exception is a single file
    /// run (see [`Aggregator::with_single_file`]), where the failure is returned
    /// as the error.
    ///
    /// An empty catalog (no paths, or nothing navigable) is returned as `Ok`.
    pub async fn build_catalog(&self, paths: Vec<PathBuf>) -> Result<Catalog> {
        let total = paths.len();
        if total == 0 {
            return Ok(Catalog::default());
        }

        let (tx, mut rx) = mpsc::channel::<WorkerReport>(total);

        for (position, path) in paths.iter().cloned().enumerate() {
            let tx = tx.clone();
            let filter = Arc::clone(&self.filter);
            let page_size = self.page_size;

            tokio::task::spawn_blocking(move || {
                let result = index_file(&path, page_size, &filter);
                // Receiver only goes away if the aggregator itself was dropped
                let _ = tx.blocking_send(WorkerReport { position, result });
            });
        }
        drop(tx);

        // Barrier: one report per spawned worker
        let mut slots: Vec<Option<Result<FileIndex>>> = (0..total).map(|_| None).collect();
        let mut received = 0;
        while received < total {
            match rx.recv().await {
                Some(report) => {
                    slots[report.position] = Some(report.result);
                    received += 1;
                }
                None => break,
            }
        }

        if received < total {
            return Err(PagerError::indexing(format!(
                "{} of {} workers stopped without reporting",
                total - received,
                total
            )));
        }

        let mut indexes = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (path, result) in paths.into_iter().zip(slots.into_iter().flatten()) {
            match result {
                Ok(index) => indexes.push(index),
                Err(err) if self.single_file => return Err(err),
                Err(err) => {
                    log::warn!("skipping {}: {}", path.display(), err);
                    failures.push(IndexFailure {
                        path,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let catalog = Catalog::from_ordered(indexes, failures);
        log::info!(
            "indexed {} files: {} navigable, {} failed",
            total,
            catalog.len(),
            catalog.failures().len()
        );

        Ok(catalog)
    }
}
