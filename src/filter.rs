//! Line filtering: literal substring or regex matching.
//!
//! A [`FilterSpec`] is built once from the command line and shared read-only by every
//! indexing worker and by the page reader. Literal matching goes through `bstr`,
//! regex matching through the ripgrep `grep-regex` matcher so both operate on raw
//! bytes and never require the line to be valid UTF-8.

use crate::error::{PagerError, Result};
use bstr::ByteSlice;
use grep_matcher::Matcher;
use grep_regex::RegexMatcher;

/// How lines are matched against the filter pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// No filter, every page is navigable
    None,
    /// Plain substring match
    Literal,
    /// Regular expression match
    Regex,
}

/// Immutable matching rule for one run.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    mode: FilterMode,
    pattern: String,
    matcher: Option<RegexMatcher>,
}

impl FilterSpec {
    /// Build a filter from a pattern.
    ///
    /// An empty pattern disables filtering. A single character pattern is always
    /// matched literally, even when `use_regex` is set.
    pub fn new(pattern: impl Into<String>, use_regex: bool) -> Result<Self> {
        let pattern = pattern.into();

        if pattern.is_empty() {
            return Ok(Self::none());
        }

        if use_regex && pattern.chars().count() > 1 {
            let matcher = RegexMatcher::new(&pattern)
                .map_err(|e| PagerError::filter(format!("{}: {}", pattern, e)))?;
            return Ok(Self {
                mode: FilterMode::Regex,
                pattern,
                matcher: Some(matcher),
            });
        }

        Ok(Self {
            mode: FilterMode::Literal,
            pattern,
            matcher: None,
        })
    }

    /// A filter that matches nothing and selects every page.
    pub fn none() -> Self {
        Self {
            mode: FilterMode::None,
            pattern: String::new(),
            matcher: None,
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_active(&self) -> bool {
        self.mode != FilterMode::None
    }

    /// Byte ranges of every non-overlapping, non-empty match in `line`.
    pub fn match_ranges(&self, line: &[u8]) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        match self.mode {
            FilterMode::None => {}
            FilterMode::Literal => {
                let needle = self.pattern.as_bytes();
                for start in line.find_iter(needle) {
                    ranges.push((start, start + needle.len()));
                }
            }
            FilterMode::Regex => {
                if let Some(matcher) = &self.matcher {
                    // RegexMatcher's error type is uninhabited
                    let _ = matcher.find_iter(line, |m| {
                        if m.start() < m.end() {
                            ranges.push((m.start(), m.end()));
                        }
                        true
                    });
                }
            }
        }
        ranges
    }

    /// Number of matches in `line`; zero when no filter is active.
    pub fn count_matches(&self, line: &[u8]) -> usize {
        match self.mode {
            FilterMode::None => 0,
            FilterMode::Literal => line.find_iter(self.pattern.as_bytes()).count(),
            FilterMode::Regex => self.match_ranges(line).len(),
        }
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::none()
    }
}
