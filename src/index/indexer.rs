//! Streaming page-offset indexer.
//!
//! Reads a file once, front to back, through a bounded buffer and records the byte
//! offset at which every page of `page_size` lines starts. With an active filter only
//! the offsets of pages holding at least one match are kept, so pages without matches
//! become unreachable for navigation.

use crate::error::{PagerError, Result};
use crate::filter::FilterSpec;
use crate::index::FileIndex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read buffer used while streaming a file
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Index one file on disk.
///
/// # Errors
/// * File cannot be opened or its metadata read
/// * Any read error while streaming (indexing of this file is aborted)
pub fn index_file(path: &Path, page_size: usize, filter: &FilterSpec) -> Result<FileIndex> {
    let file = File::open(path)
        .map_err(|e| PagerError::file_error(format!("Cannot open {}", path.display()), e))?;
    let file_size = file
        .metadata()
        .map_err(|e| PagerError::file_error(format!("Cannot stat {}", path.display()), e))?
        .len();

    let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
    let mut index = index_reader(reader, file_size, page_size, filter)
        .map_err(|e| PagerError::file_error(format!("Cannot read {}", path.display()), e))?;
    index.path = path.to_path_buf();

    log::debug!(
        "indexed {}: {} lines, {} pages, {} navigable, {} matches",
        path.display(),
        index.line_count,
        index.page_count,
        index.offsets.len(),
        index.match_count
    );

    Ok(index)
}

/// Index any buffered byte stream of known total size.
///
/// The returned index has an empty path; [`index_file`] fills it in.
pub fn index_reader<R: BufRead>(
    mut reader: R,
    total_size: u64,
    page_size: usize,
    filter: &FilterSpec,
) -> std::io::Result<FileIndex> {
    let page_size = page_size.max(1);
    let filtering = filter.is_active();

    // Dense start offsets of every page, in file order
    let mut page_offsets: Vec<u64> = vec![0];
    // Start offsets of pages holding a match
    let mut kept_offsets: Vec<u64> = Vec::new();

    let mut line_in_page = 0usize;
    let mut page_bytes = 0u64;
    let mut page_has_match = false;
    let mut match_count = 0u64;
    let mut line_count = 0u64;

    let mut line = Vec::with_capacity(256);
    loop {
        line.clear();
        let read = reader.read_until(b'\n', &mut line)?;
        if read == 0 {
            break;
        }
        line_count += 1;

        if filtering {
            let matches = filter.count_matches(strip_terminator(&line));
            if matches > 0 {
                page_has_match = true;
                match_count += matches as u64;
            }
        }

        page_bytes += read as u64;
        line_in_page += 1;

        if line_in_page == page_size {
            let page_start = page_offsets[page_offsets.len() - 1];
            if page_has_match {
                kept_offsets.push(page_start);
            }

            let next_start = page_start + page_bytes;
            if next_start < total_size {
                page_offsets.push(next_start);
            }

            line_in_page = 0;
            page_bytes = 0;
            page_has_match = false;
        }
    }

    // Trailing partial page
    if line_in_page > 0 && page_has_match {
        kept_offsets.push(page_offsets[page_offsets.len() - 1]);
    }

    if line_count == 0 {
        page_offsets.clear();
    }
    let page_count = page_offsets.len();

    let offsets = if filtering { kept_offsets } else { page_offsets };

    Ok(FileIndex {
        path: Default::default(),
        offsets,
        match_count,
        line_count,
        page_count,
    })
}

/// Line content without its `\n` or `\r\n` terminator.
pub(crate) fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
