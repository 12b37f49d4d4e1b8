//! Presentation layer with the command-line interface.

/// Command dispatcher.
pub mod app;
/// Command-line arguments.
pub mod commands;
/// Terminal rendering.
pub mod output;
/// Hidden password entry.
pub mod prompt;

pub use app::{App, Ports};
pub use commands::{Cli, Command};
pub use output::{Output, Table};
