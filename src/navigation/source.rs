//! Pull-based sources of navigation input.
//!
//! The controller asks its source for one event at a time. `None` means the input
//! stream has ended; together with [`InputEvent::Interrupted`] it closes the session.

use std::collections::VecDeque;
use std::io::BufRead;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// One unit of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A line typed by the user, without its terminator
    Line(String),
    /// The user asked to quit (Ctrl+C)
    Interrupted,
}

/// Synchronous source of navigation input.
pub trait CommandSource {
    /// Block until the next event; `None` once the stream has ended.
    fn next_event(&mut self) -> Option<InputEvent>;
}

/// Reads lines from any buffered reader.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> CommandSource for ReaderSource<R> {
    fn next_event(&mut self) -> Option<InputEvent> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                // Undecodable bytes stay in the line and fail command parsing
                let line = String::from_utf8_lossy(&buf);
                Some(InputEvent::Line(
                    line.trim_end_matches(['\n', '\r']).to_string(),
                ))
            }
            Err(err) => {
                log::warn!("input stream error: {}", err);
                None
            }
        }
    }
}

/// Receives events forwarded from other threads or tasks.
///
/// `next_event` blocks the calling thread, so it must not be called from inside an
/// async task; run the controller on a blocking thread instead.
pub struct ChannelSource {
    rx: UnboundedReceiver<InputEvent>,
}

impl ChannelSource {
    pub fn new(rx: UnboundedReceiver<InputEvent>) -> Self {
        Self { rx }
    }
}

impl CommandSource for ChannelSource {
    fn next_event(&mut self) -> Option<InputEvent> {
        self.rx.blocking_recv()
    }
}

/// Fixed list of events, used for scripted sessions.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    events: VecDeque<InputEvent>,
}

impl ScriptedSource {
    /// One `Line` event per input string
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            events: lines
                .into_iter()
                .map(|l| InputEvent::Line(l.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }
}

impl CommandSource for ScriptedSource {
    fn next_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

/// Spawn a thread that forwards stdin lines onto `tx` until EOF.
///
/// A plain thread is used instead of the runtime's blocking pool so that a read
/// stuck on the terminal never delays runtime shutdown.
pub fn spawn_stdin_thread(tx: UnboundedSender<InputEvent>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut source = ReaderSource::new(stdin.lock());
        while let Some(event) = source.next_event() {
            if tx.send(event).is_err() {
                break;
            }
        }
    })
}

/// Spawn a task that forwards Ctrl+C onto `tx` as [`InputEvent::Interrupted`].
///
/// Only a weak sender is held while waiting, so the channel still closes when the
/// remaining senders are dropped at the end of input.
pub fn spawn_interrupt_listener(tx: &UnboundedSender<InputEvent>) -> tokio::task::JoinHandle<()> {
    let weak = tx.downgrade();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            if let Some(tx) = weak.upgrade() {
                let _ = tx.send(InputEvent::Interrupted);
            }
        }
    })
}
