//! Color palette for pager output
//!
//! Styles are plain crossterm `ContentStyle`s so a page can be written straight to
//! stdout as ANSI text. The palette is passed explicitly to whatever renders, there is
//! no process-wide color switch.

use ratatui::crossterm::style::{Color, ContentStyle, Stylize};

/// Styles for every kind of text the pager prints
#[derive(Debug, Clone)]
pub struct Palette {
    /// Filter match highlighting
    pub highlight: ContentStyle,

    /// Error messages
    pub error: ContentStyle,

    /// Navigation prompt
    pub prompt: ContentStyle,

    /// Informational messages (banner, empty result)
    pub info: ContentStyle,

    /// Summary table header
    pub header: ContentStyle,

    /// When false every style is ignored and text is printed as-is
    enabled: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            highlight: ContentStyle::new().black().on_green().bold(),
            error: ContentStyle::new().white().on_red().bold(),
            prompt: ContentStyle::new().yellow().bold(),
            info: ContentStyle::new().magenta().bold(),
            header: ContentStyle::new().with(Color::Cyan).bold(),
            enabled: true,
        }
    }
}

impl Palette {
    /// Palette that emits no escape codes
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Colored unless `no_color` is set
    pub fn for_color_setting(no_color: bool) -> Self {
        if no_color {
            Self::plain()
        } else {
            Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Apply `style` to `text`
    pub fn paint(&self, style: &ContentStyle, text: &str) -> String {
        if self.enabled {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn highlight(&self, text: &str) -> String {
        self.paint(&self.highlight, text)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(&self.error, text)
    }

    pub fn prompt(&self, text: &str) -> String {
        self.paint(&self.prompt, text)
    }

    pub fn info(&self, text: &str) -> String {
        self.paint(&self.info, text)
    }

    pub fn header(&self, text: &str) -> String {
        self.paint(&self.header, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_has_no_escape_codes() {
        let palette = Palette::plain();
        assert_eq!(palette.highlight("match"), "match");
        assert_eq!(palette.error("oops"), "oops");
        assert!(!palette.is_enabled());
    }

    #[test]
    fn test_colored_palette_wraps_text() {
        let palette = Palette::default();
        let painted = palette.highlight("match");
        assert!(painted.contains("match"));
        assert!(painted.starts_with('\u{1b}'));
        assert_ne!(painted, "match");
    }

    #[test]
    fn test_color_setting() {
        assert!(!Palette::for_color_setting(true).is_enabled());
        assert!(Palette::for_color_setting(false).is_enabled());
    }
}
