//! Run configuration: page geometry, text type, filter and color settings.
//!
//! Everything here is validated before any file is indexed. Invalid values are
//! configuration errors and end the run with a diagnostic.

use crate::error::{PagerError, Result};
use crate::filter::FilterSpec;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Default number of lines per page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// How page lines are transformed before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextType {
    /// Lines are shown as they are
    #[default]
    Plain,
    /// Embedded JSON fragments are re-indented
    Json,
}

impl TextType {
    /// Names accepted on the command line
    pub const ACCEPTED: [&'static str; 2] = ["plain", "json"];

    pub fn as_str(self) -> &'static str {
        match self {
            TextType::Plain => "plain",
            TextType::Json => "json",
        }
    }
}

impl FromStr for TextType {
    type Err = PagerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plain" => Ok(TextType::Plain),
            "json" => Ok(TextType::Json),
            _ => Err(PagerError::invalid_argument(format!(
                "Accepted text types are: {}",
                Self::ACCEPTED.join(", ")
            ))),
        }
    }
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated settings for one pager session.
#[derive(Debug, Clone)]
pub struct PagerConfig {
    /// Lines per page (`L`)
    pub page_size: usize,
    /// 1-based page shown first, in catalog file 1
    pub initial_page: usize,
    pub text_type: TextType,
    pub filter: Arc<FilterSpec>,
    pub no_color: bool,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            initial_page: 1,
            text_type: TextType::Plain,
            filter: Arc::new(FilterSpec::none()),
            no_color: false,
        }
    }
}

impl PagerConfig {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_initial_page(mut self, page: usize) -> Self {
        self.initial_page = page;
        self
    }

    pub fn with_text_type(mut self, text_type: TextType) -> Self {
        self.text_type = text_type;
        self
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Reject settings that would make pagination meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(PagerError::invalid_argument(
                "Number of lines per page must be at least 1",
            ));
        }
        if self.initial_page == 0 {
            return Err(PagerError::invalid_argument(
                "Page number must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Defaults read from the user's configuration file.
///
/// Only compiled with the `config` feature. Every field is optional; command line
/// values take precedence over anything found here.
#[cfg(feature = "config")]
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct FileDefaults {
    pub lines: Option<usize>,
    pub text: Option<String>,
    pub no_color: Option<bool>,
}

#[cfg(feature = "config")]
impl FileDefaults {
    /// `$CONFIG_DIR/rlpager/config.toml`
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rlpager").join("config.toml"))
    }

    /// Load defaults, returning empty defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PagerError::file_error(format!("Cannot read {}", path.display()), e)
        })?;
        toml::from_str(&raw).map_err(|e| {
            PagerError::invalid_argument(format!("{}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PagerConfig::default();
        assert_eq!(config.page_size, 100);
        assert_eq!(config.initial_page, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = PagerConfig::default().with_page_size(0);
        assert!(matches!(
            config.validate(),
            Err(PagerError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_zero_initial_page_rejected() {
        let config = PagerConfig::default().with_initial_page(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_text_type_parsing() {
        assert_eq!("plain".parse::<TextType>().unwrap(), TextType::Plain);
        assert_eq!("json".parse::<TextType>().unwrap(), TextType::Json);

        let err = "html".parse::<TextType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: Accepted text types are: plain, json"
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_file_defaults_parse() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lines = 25\ntext = \"json\"").unwrap();

        let defaults = FileDefaults::load_from(file.path()).unwrap();
        assert_eq!(defaults.lines, Some(25));
        assert_eq!(defaults.text.as_deref(), Some("json"));
        assert_eq!(defaults.no_color, None);
    }
}
