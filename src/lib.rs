//! # rlpager - Paginating Log Viewer
//!
//! An interactive pager for line-oriented text files of any size. Files are indexed
//! once into page start offsets, so any page can be shown by seeking straight to it
//! without keeping the file in memory.
//!
//! ## Features
//!
//! - **Offset Indexing**: One streaming pass per file records where every page starts
//! - **Filtering**: Literal or regex filters restrict navigation to pages with matches
//! - **Many Files**: Every file under a directory is indexed concurrently
//! - **Formatting**: Embedded JSON fragments can be re-indented on display
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Validated run configuration
//! - [`filter`] - Literal and regex line matching
//! - [`discovery`] - Resolving the input path into files
//! - [`index`] - Per-file indexing and concurrent aggregation into a catalog
//! - [`render`] - Page reading, format transforms and highlighting
//! - [`navigation`] - Interactive navigation state machine
//! - [`app`] - Application core and session coordination

// Core modules
pub mod config;
pub mod error;
pub mod filter;

// Indexing and presentation
pub mod discovery;
pub mod index;
pub mod navigation;
pub mod render;

// Session coordination
pub mod app;

// Re-export commonly used types for convenience
pub use error::{NavigationError, PagerError, Result};

// Public API surface for external usage
pub use app::{Application, SessionOutcome};
pub use config::{PagerConfig, TextType};
pub use discovery::Discovered;
pub use filter::{FilterMode, FilterSpec};
pub use index::{Aggregator, Catalog, FileIndex};
pub use navigation::{NavigationController, NavigationState, Phase};
pub use render::{PageContent, PageReader, Palette};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
