//! Resolution of the `--path` argument into an ordered list of files.
//!
//! A single file is used as-is. A directory is walked recursively and every regular
//! file with the requested extension is kept, in file path order. That order is the
//! discovery order catalog ids are assigned by.

use crate::error::{PagerError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Files resolved from one `--path` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    pub files: Vec<PathBuf>,

    /// True when `--path` named a regular file rather than a directory
    pub single_file: bool,
}

/// List the files to index for `path`.
///
/// # Errors
/// * `path` does not exist
/// * `path` is a directory and no extension was given
/// * `path` is neither a file nor a directory
/// * The directory walk fails
pub fn discover(path: &Path, extension: Option<&str>) -> Result<Discovered> {
    if !path.exists() {
        return Err(PagerError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    if path.is_file() {
        return Ok(Discovered {
            files: vec![path.to_path_buf()],
            single_file: true,
        });
    }

    if !path.is_dir() {
        return Err(PagerError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let extension = extension
        .map(|ext| ext.trim_start_matches('.'))
        .filter(|ext| !ext.is_empty())
        .ok_or_else(|| {
            PagerError::invalid_argument(format!(
                "An extension is required when {} is a directory",
                path.display()
            ))
        })?;

    let walker = WalkBuilder::new(path)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            PagerError::invalid_argument(format!("Cannot walk {}: {}", path.display(), e))
        })?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && entry.path().extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(entry.into_path());
        }
    }

    log::debug!(
        "discovered {} .{} files under {}",
        files.len(),
        extension,
        path.display()
    );
    Ok(Discovered {
        files,
        single_file: false,
    })
}
