//! Random-access page extraction.
//!
//! A page is read by seeking straight to its recorded start offset and reading at most
//! `page_size` lines forward. The file is opened for this single read and closed
//! again; nothing is cached between renders.

use crate::config::{PagerConfig, TextType};
use crate::error::{PagerError, Result};
use crate::filter::FilterSpec;
use crate::index::indexer::strip_terminator;
use crate::render::format::format_line;
use crate::render::theme::Palette;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

/// Rendered lines of one page, without line terminators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub lines: Vec<String>,
}

impl PageContent {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for PageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Reads and renders single pages.
///
/// All rendering settings are fixed at construction.
#[derive(Debug, Clone)]
pub struct PageReader {
    page_size: usize,
    text_type: TextType,
    filter: Arc<FilterSpec>,
    palette: Palette,
}

impl PageReader {
    pub fn new(
        page_size: usize,
        text_type: TextType,
        filter: Arc<FilterSpec>,
        palette: Palette,
    ) -> Self {
        Self {
            page_size: page_size.max(1),
            text_type,
            filter,
            palette,
        }
    }

    pub fn from_config(config: &PagerConfig, palette: Palette) -> Self {
        Self::new(
            config.page_size,
            config.text_type,
            Arc::clone(&config.filter),
            palette,
        )
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Read the page starting at byte `offset` of `path`.
    ///
    /// # Returns
    /// * Up to `page_size` rendered lines; fewer when EOF is reached
    /// * An empty page when `offset` is at or beyond EOF
    pub fn read_page(&self, path: &Path, offset: u64) -> Result<PageContent> {
        let mut file = File::open(path)
            .map_err(|e| PagerError::file_error(format!("Cannot open {}", path.display()), e))?;
        file.seek(SeekFrom::Start(offset)).map_err(|e| {
            PagerError::file_error(
                format!("Cannot seek to byte {} in {}", offset, path.display()),
                e,
            )
        })?;

        let mut reader = BufReader::new(file);
        let mut lines = Vec::with_capacity(self.page_size);
        let mut buf = Vec::with_capacity(256);

        while lines.len() < self.page_size {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| PagerError::file_error(format!("Cannot read {}", path.display()), e))?;
            if read == 0 {
                break;
            }
            let text = String::from_utf8_lossy(strip_terminator(&buf));
            lines.push(self.render_line(&text));
        }

        Ok(PageContent { lines })
    }

    /// Apply the format transform, then highlight every filter match.
    pub fn render_line(&self, line: &str) -> String {
        let formatted = format_line(self.text_type, line);
        self.highlight(&formatted)
    }

    fn highlight(&self, line: &str) -> String {
        let ranges = self.filter.match_ranges(line.as_bytes());
        if ranges.is_empty() {
            return line.to_string();
        }

        let mut out = String::with_capacity(line.len() + ranges.len() * 16);
        let mut cursor = 0;
        for (start, end) in ranges {
            // Regex matches on lossy text may split a multi-byte char
            if !line.is_char_boundary(start) || !line.is_char_boundary(end) {
                continue;
            }
            out.push_str(&line[cursor..start]);
            out.push_str(&self.palette.highlight(&line[start..end]));
            cursor = end;
        }
        out.push_str(&line[cursor..]);
        out
    }
}
