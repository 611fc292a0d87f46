//! Page rendering: reading pages back, format transforms, highlighting and the
//! catalog summary.

pub mod format;
pub mod page_reader;
pub mod summary;
pub mod theme;

pub use page_reader::{PageContent, PageReader};
pub use summary::render_summary;
pub use theme::Palette;
