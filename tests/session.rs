use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rlpager::discovery::discover;
use rlpager::navigation::{
    spawn_interrupt_listener, ChannelSource, CommandSource, InputEvent, ScriptedSource,
};
use rlpager::{Application, FilterSpec, PagerConfig, PagerError, SessionOutcome};
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Writer whose contents stay readable after the session takes ownership of it
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn write_numbered(dir: &TempDir, name: &str, count: usize) -> PathBuf {
    let path = dir.path().join(name);
    let content: String = (1..=count).map(|i| format!("{} {}\n", name, i)).collect();
    std::fs::write(&path, content).expect("write fixture");
    path
}

fn application(page_size: usize, filter: FilterSpec) -> Application {
    let config = PagerConfig::default()
        .with_page_size(page_size)
        .with_filter(filter)
        .with_no_color(true);
    Application::new(config).unwrap()
}

#[tokio::test]
async fn empty_directory_ends_with_empty_result() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("empty.log"), "").unwrap();

    let app = application(5, FilterSpec::none());
    let discovered = discover(dir.path(), Some("log")).unwrap();
    let catalog = app.build_catalog(discovered).await.unwrap();

    let out = SharedBuffer::default();
    let outcome = app
        .run_session(catalog, ScriptedSource::from_lines(["1"]), out.clone())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::EmptyResult);
    assert!(out.contents().contains("Sorry. Nothing to show here!"));
}

#[tokio::test]
async fn filter_without_matches_ends_with_empty_result() {
    let dir = TempDir::new().unwrap();
    let path = write_numbered(&dir, "a.log", 12);

    let app = application(5, FilterSpec::new("ERROR", false).unwrap());
    let discovered = discover(&path, None).unwrap();
    let catalog = app.build_catalog(discovered).await.unwrap();

    let out = SharedBuffer::default();
    let outcome = app
        .run_session(catalog, ScriptedSource::default(), out.clone())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::EmptyResult);
    assert!(!out.contents().contains("a.log 1"));
}

#[tokio::test]
async fn session_closes_at_end_of_input() {
    let dir = TempDir::new().unwrap();
    let path = write_numbered(&dir, "a.log", 9);

    let app = application(3, FilterSpec::none());
    let catalog = app
        .build_catalog(discover(&path, None).unwrap())
        .await
        .unwrap();

    let out = SharedBuffer::default();
    let outcome = app
        .run_session(catalog, ScriptedSource::from_lines(["2"]), out.clone())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Closed);
    let text = out.contents();
    assert!(text.contains("a.log 1\na.log 2\na.log 3\n"));
    assert!(text.contains("a.log 4\na.log 5\na.log 6\n"));
    assert!(text.contains("Page 2/3."));
}

#[tokio::test]
async fn channel_input_ends_while_interrupt_listener_waits() {
    let dir = TempDir::new().unwrap();
    let path = write_numbered(&dir, "a.log", 9);

    let app = application(3, FilterSpec::none());
    let catalog = app
        .build_catalog(discover(&path, None).unwrap())
        .await
        .unwrap();

    let (tx, rx) = mpsc::unbounded_channel();
    let interrupt = spawn_interrupt_listener(&tx);
    tx.send(InputEvent::Line("3".into())).unwrap();
    // End of stdin: the reader side drops its sender
    drop(tx);

    let out = SharedBuffer::default();
    let outcome = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        app.run_session(catalog, ChannelSource::new(rx), out.clone()),
    )
    .await
    .expect("session should close once input ends")
    .unwrap();
    interrupt.abort();

    assert_eq!(outcome, SessionOutcome::Closed);
    assert!(out.contents().contains("a.log 7\na.log 8\na.log 9\n"));
}

#[tokio::test]
async fn channel_source_reports_end_with_listener_alive() {
    let (tx, rx) = mpsc::unbounded_channel();
    let interrupt = spawn_interrupt_listener(&tx);
    tx.send(InputEvent::Line("2".into())).unwrap();
    drop(tx);

    let events = tokio::task::spawn_blocking(move || {
        let mut source = ChannelSource::new(rx);
        let mut events = Vec::new();
        while let Some(event) = source.next_event() {
            events.push(event);
        }
        events
    })
    .await
    .unwrap();
    interrupt.abort();

    assert_eq!(events, vec![InputEvent::Line("2".into())]);
}

#[tokio::test]
async fn initial_page_beyond_first_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_numbered(&dir, "a.log", 4);

    let config = PagerConfig::default()
        .with_page_size(2)
        .with_initial_page(3)
        .with_no_color(true);
    let app = Application::new(config).unwrap();
    let catalog = app
        .build_catalog(discover(&path, None).unwrap())
        .await
        .unwrap();

    let result = app
        .run_session(catalog, ScriptedSource::default(), SharedBuffer::default())
        .await;
    assert!(matches!(
        result,
        Err(PagerError::InitialPageOutOfRange { page: 3, max: 2 })
    ));
}
