//! Interactive page navigation.
//!
//! Input is pulled one event at a time from a [`CommandSource`]; the
//! [`NavigationController`] validates each command against the catalog and renders
//! the requested page.

pub mod command;
pub mod controller;
pub mod source;

pub use command::NavigationCommand;
pub use controller::{NavigationController, NavigationState, Phase};
pub use source::{
    spawn_interrupt_listener, spawn_stdin_thread, ChannelSource, CommandSource, InputEvent, ReaderSource, ScriptedSource,
};
