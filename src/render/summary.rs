//! Catalog summary table shown before navigation starts.

use crate::index::Catalog;
use crate::render::theme::Palette;
use std::fmt::Write;

/// Render one row per catalog file: id, page count, match count, path.
///
/// The matches column is only present when a filter is active. Files that failed
/// to index are listed underneath.
pub fn render_summary(catalog: &Catalog, filter_active: bool, palette: &Palette) -> String {
    let mut out = String::new();

    let header = if filter_active {
        format!("{:>4}  {:>8}  {:>8}  {}", "ID", "PAGES", "MATCHES", "PATH")
    } else {
        format!("{:>4}  {:>8}  {}", "ID", "PAGES", "PATH")
    };
    let _ = writeln!(out, "{}", palette.header(&header));

    for entry in catalog.entries() {
        let index = &entry.index;
        let _ = if filter_active {
            writeln!(
                out,
                "{:>4}  {:>8}  {:>8}  {}",
                entry.id,
                index.num_pages(),
                index.match_count,
                index.path.display()
            )
        } else {
            writeln!(
                out,
                "{:>4}  {:>8}  {}",
                entry.id,
                index.num_pages(),
                index.path.display()
            )
        };
    }

    for failure in catalog.failures() {
        let _ = writeln!(
            out,
            "{}",
            palette.error(&format!(
                "Skipped {}: {}",
                failure.path.display(),
                failure.reason
            ))
        );
    }

    out
}
