//! Interactive navigation over a built catalog.
//!
//! The controller owns the [`NavigationState`] exclusively. Each input line is parsed,
//! validated against the catalog and, only if the requested page could be rendered,
//! committed. Every failure leaves the state untouched and is reported to the user.

use crate::error::{NavigationError, PagerError, Result};
use crate::index::{Catalog, CatalogEntry};
use crate::navigation::command::NavigationCommand;
use crate::navigation::source::{CommandSource, InputEvent};
use crate::render::{PageContent, PageReader, Palette};
use std::io::Write;

/// Lifecycle of a navigation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// First page rendered, no command read yet
    Ready,
    /// Waiting for the next input line
    AwaitingCommand,
    /// Input ended or was interrupted; terminal
    Closed,
}

/// Current position in the catalog, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current_file_id: usize,
    pub current_page: usize,
}

pub struct NavigationController<'a, W: Write> {
    catalog: &'a Catalog,
    reader: &'a PageReader,
    palette: Palette,
    state: NavigationState,
    phase: Phase,
    out: W,
}

impl<'a, W: Write> NavigationController<'a, W> {
    /// Render `initial_page` of catalog file 1 and enter [`Phase::Ready`].
    ///
    /// # Errors
    /// * Empty catalog
    /// * `initial_page` outside the first file's pages
    /// * The first page cannot be read or written
    pub fn start(
        catalog: &'a Catalog,
        reader: &'a PageReader,
        palette: Palette,
        initial_page: usize,
        out: W,
    ) -> Result<Self> {
        let first = catalog
            .get(1)
            .ok_or_else(|| PagerError::invalid_argument("Nothing to navigate"))?;
        let max = first.index.num_pages();
        if initial_page == 0 || initial_page > max {
            return Err(PagerError::InitialPageOutOfRange {
                page: initial_page,
                max,
            });
        }

        let mut controller = Self {
            catalog,
            reader,
            palette,
            state: NavigationState {
                current_file_id: 1,
                current_page: initial_page,
            },
            phase: Phase::Ready,
            out,
        };

        let page = controller.render(first, initial_page)?;
        write!(controller.out, "{}", page)?;
        Ok(controller)
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn num_files(&self) -> usize {
        self.catalog.len()
    }

    /// Navigable pages of the current file
    pub fn num_pages(&self) -> usize {
        self.current_entry()
            .map(|entry| entry.index.num_pages())
            .unwrap_or(0)
    }

    /// Consume the controller and hand back its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Prompt shown while awaiting a command
    pub fn prompt_text(&self) -> String {
        let path = self
            .current_entry()
            .map(|entry| entry.index.path.display().to_string())
            .unwrap_or_default();
        format!(
            "[{}] Page {}/{}. Enter page or id,page to navigate or press Ctrl+C to quit:",
            path,
            self.state.current_page,
            self.num_pages()
        )
    }

    /// Interpret one input line.
    ///
    /// On success the state moves to the requested page and its content is
    /// returned. On failure nothing changes.
    pub fn apply(&mut self, input: &str) -> std::result::Result<PageContent, NavigationError> {
        if self.phase == Phase::Closed {
            return Err(NavigationError::InvalidCommand);
        }

        let command = NavigationCommand::parse(input)?;
        let (file_id, page) = self.validate(command)?;

        let entry = self
            .catalog
            .get(file_id)
            .ok_or(NavigationError::FileIdTooLarge {
                max: self.num_files(),
            })?;
        let content = self
            .render(entry, page)
            .map_err(|e| NavigationError::Render(e.to_string()))?;

        self.state = NavigationState {
            current_file_id: file_id,
            current_page: page,
        };
        self.phase = Phase::AwaitingCommand;
        Ok(content)
    }

    /// Drive the session until the source ends or is interrupted.
    ///
    /// A catalog holding a single one-page file closes right away, there is
    /// nowhere to navigate to.
    pub fn run<S: CommandSource>(&mut self, source: &mut S) -> Result<()> {
        if self.phase == Phase::Ready {
            if self.num_files() == 1 && self.num_pages() == 1 {
                self.close();
                return Ok(());
            }
            self.phase = Phase::AwaitingCommand;
        }

        while self.phase == Phase::AwaitingCommand {
            self.write_prompt()?;

            match source.next_event() {
                Some(InputEvent::Line(line)) => match self.apply(&line) {
                    Ok(page) => {
                        write!(self.out, "\n{}", page)?;
                    }
                    Err(err) => {
                        log::debug!("rejected navigation input {:?}: {}", line, err);
                        writeln!(
                            self.out,
                            "\n{}\n",
                            self.palette.error(&format!("Error! {}", err))
                        )?;
                    }
                },
                Some(InputEvent::Interrupted) | None => {
                    writeln!(self.out)?;
                    self.close();
                }
            }
        }

        self.out.flush()?;
        Ok(())
    }

    /// Enter the terminal state; no further commands are accepted.
    pub fn close(&mut self) {
        self.phase = Phase::Closed;
    }

    fn current_entry(&self) -> Option<&'a CatalogEntry> {
        self.catalog.get(self.state.current_file_id)
    }

    /// Range checks: page lower bound, file id, then page upper bound of the target file.
    fn validate(
        &self,
        command: NavigationCommand,
    ) -> std::result::Result<(usize, usize), NavigationError> {
        if command.page < 1 {
            return Err(NavigationError::PageTooSmall);
        }

        let file_id = match command.file_id {
            0 => self.state.current_file_id,
            id if id < 0 => return Err(NavigationError::FileIdTooSmall),
            id => {
                let max = self.num_files();
                match usize::try_from(id) {
                    Ok(id) if id <= max => id,
                    _ => return Err(NavigationError::FileIdTooLarge { max }),
                }
            }
        };

        let max = self
            .catalog
            .get(file_id)
            .map(|entry| entry.index.num_pages())
            .unwrap_or(0);
        match usize::try_from(command.page) {
            Ok(page) if page <= max => Ok((file_id, page)),
            _ => Err(NavigationError::PageTooLarge { max }),
        }
    }

    fn render(&self, entry: &CatalogEntry, page: usize) -> Result<PageContent> {
        let offset = entry.index.page_offset(page).ok_or_else(|| {
            PagerError::invalid_argument(format!(
                "Page {} does not exist in {}",
                page,
                entry.index.path.display()
            ))
        })?;
        self.reader.read_page(&entry.index.path, offset)
    }

    fn write_prompt(&mut self) -> Result<()> {
        let prompt = self.palette.prompt(&self.prompt_text());
        write!(self.out, "{} ", prompt)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextType;
    use crate::filter::FilterSpec;
    use crate::index::index_file;
    use crate::navigation::source::ScriptedSource;
    use std::io::Write as _;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    fn numbered_file(prefix: &str, count: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for i in 1..=count {
            writeln!(file, "{} {}", prefix, i).unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn build_catalog(files: &[&NamedTempFile], page_size: usize) -> Catalog {
        let indexes = files
            .iter()
            .map(|f| index_file(f.path(), page_size, &FilterSpec::none()).unwrap())
            .collect();
        Catalog::from_ordered(indexes, Vec::new())
    }

    fn reader(page_size: usize) -> PageReader {
        PageReader::new(
            page_size,
            TextType::Plain,
            Arc::new(FilterSpec::none()),
            Palette::plain(),
        )
    }

    #[test]
    fn test_start_renders_initial_page() {
        let a = numbered_file("a", 10);
        let catalog = build_catalog(&[&a], 3);
        let reader = reader(3);

        let controller =
            NavigationController::start(&catalog, &reader, Palette::plain(), 2, Vec::new())
                .unwrap();

        assert_eq!(controller.phase(), Phase::Ready);
        assert_eq!(controller.num_pages(), 4);
        let out = String::from_utf8(controller.into_output()).unwrap();
        assert_eq!(out, "a 4\na 5\na 6\n");
    }

    #[test]
    fn test_start_rejects_out_of_range_page() {
        let a = numbered_file("a", 10);
        let catalog = build_catalog(&[&a], 5);
        let reader = reader(5);

        let result =
            NavigationController::start(&catalog, &reader, Palette::plain(), 3, Vec::new());
        assert!(matches!(
            result,
            Err(PagerError::InitialPageOutOfRange { page: 3, max: 2 })
        ));
    }

    #[test]
    fn test_page_only_keeps_current_file() {
        let a = numbered_file("a", 10);
        let b = numbered_file("b", 10);
        let catalog = build_catalog(&[&a, &b], 5);
        let reader = reader(5);
        let mut controller =
            NavigationController::start(&catalog, &reader, Palette::plain(), 1, Vec::new())
                .unwrap();

        let page = controller.apply("2,1").unwrap();
        assert_eq!(page.lines[0], "b 1");

        let page = controller.apply("2").unwrap();
        assert_eq!(page.lines[0], "b 6");
        assert_eq!(
            controller.state(),
            NavigationState {
                current_file_id: 2,
                current_page: 2
            }
        );

        let page = controller.apply("0,1").unwrap();
        assert_eq!(page.lines[0], "b 1");
        assert_eq!(controller.state().current_file_id, 2);
    }

    #[test]
    fn test_invalid_input_leaves_state_unchanged() {
        let a = numbered_file("a", 10);
        let b = numbered_file("b", 6);
        let catalog = build_catalog(&[&a, &b], 2);
        let reader = reader(2);
        let mut controller =
            NavigationController::start(&catalog, &reader, Palette::plain(), 2, Vec::new())
                .unwrap();
        let before = controller.state();

        assert_eq!(controller.apply("x"), Err(NavigationError::InvalidCommand));
        assert_eq!(controller.apply("0"), Err(NavigationError::PageTooSmall));
        assert_eq!(
            controller.apply("6"),
            Err(NavigationError::PageTooLarge { max: 5 })
        );
        assert_eq!(
            controller.apply("3,1"),
            Err(NavigationError::FileIdTooLarge { max: 2 })
        );
        assert_eq!(
            controller.apply("-1,1"),
            Err(NavigationError::FileIdTooSmall)
        );
        assert_eq!(
            controller.apply("2,4"),
            Err(NavigationError::PageTooLarge { max: 3 })
        );

        assert_eq!(controller.state(), before);
    }

    #[test]
    fn test_render_failure_leaves_state_unchanged() {
        let a = numbered_file("a", 4);
        let b = numbered_file("b", 4);
        let catalog = build_catalog(&[&a, &b], 2);
        let reader = reader(2);
        let mut controller =
            NavigationController::start(&catalog, &reader, Palette::plain(), 1, Vec::new())
                .unwrap();

        let b_path = b.path().to_path_buf();
        drop(b);
        assert!(!b_path.exists());

        assert!(matches!(
            controller.apply("2,1"),
            Err(NavigationError::Render(_))
        ));
        assert_eq!(controller.state().current_file_id, 1);
    }

    #[test]
    fn test_run_closes_at_end_of_input() {
        let a = numbered_file("a", 6);
        let catalog = build_catalog(&[&a], 2);
        let reader = reader(2);
        let mut controller =
            NavigationController::start(&catalog, &reader, Palette::plain(), 1, Vec::new())
                .unwrap();

        let mut source = ScriptedSource::from_lines(["3", "nope"]);
        controller.run(&mut source).unwrap();

        assert_eq!(controller.phase(), Phase::Closed);
        assert_eq!(controller.state().current_page, 3);

        let out = String::from_utf8(controller.into_output()).unwrap();
        assert!(out.contains("a 5\na 6\n"));
        assert!(out.contains("Page 3/3."));
        assert!(out.contains("Error! A valid page number or id,page pair is required"));
    }

    #[test]
    fn test_run_stops_on_interrupt() {
        let a = numbered_file("a", 6);
        let catalog = build_catalog(&[&a], 2);
        let reader = reader(2);
        let mut controller =
            NavigationController::start(&catalog, &reader, Palette::plain(), 1, Vec::new())
                .unwrap();

        let mut source = ScriptedSource::default();
        source.push(InputEvent::Interrupted);
        source.push(InputEvent::Line("2".into()));
        controller.run(&mut source).unwrap();

        assert_eq!(controller.phase(), Phase::Closed);
        assert_eq!(controller.state().current_page, 1);
        assert!(controller.apply("2").is_err());
    }

    #[test]
    fn test_single_page_session_closes_without_prompt() {
        let a = numbered_file("a", 2);
        let catalog = build_catalog(&[&a], 10);
        let reader = reader(10);
        let mut controller =
            NavigationController::start(&catalog, &reader, Palette::plain(), 1, Vec::new())
                .unwrap();

        let mut source = ScriptedSource::from_lines(["1"]);
        controller.run(&mut source).unwrap();

        assert_eq!(controller.phase(), Phase::Closed);
        let out = String::from_utf8(controller.into_output()).unwrap();
        assert!(!out.contains("Page"));
    }
}
