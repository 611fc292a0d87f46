//! Parsing of navigation input lines.

use crate::error::NavigationError;

/// A parsed navigation request.
///
/// `file_id == 0` keeps the current file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCommand {
    pub file_id: i64,
    pub page: i64,
}

impl NavigationCommand {
    /// Parse `"page"` or `"id,page"`.
    ///
    /// Surrounding whitespace is ignored, as is whitespace around each number.
    /// Numbers may be negative here; range checks happen against the catalog.
    pub fn parse(input: &str) -> Result<Self, NavigationError> {
        let input = input.trim();
        let mut parts = input.split(',');

        let first = parts.next().ok_or(NavigationError::InvalidCommand)?;
        let second = parts.next();
        if parts.next().is_some() {
            return Err(NavigationError::InvalidCommand);
        }

        match second {
            None => Ok(Self {
                file_id: 0,
                page: parse_number(first)?,
            }),
            Some(page) => Ok(Self {
                file_id: parse_number(first)?,
                page: parse_number(page)?,
            }),
        }
    }
}

fn parse_number(text: &str) -> Result<i64, NavigationError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| NavigationError::InvalidCommand)
}
