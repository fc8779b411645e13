//! Serial console: line editor and command dispatcher
//!
//! Polled byte by byte from the main loop, no interrupts.
//! Zero heap allocation - all state lives in the [`Console`] value.

pub mod colors;
pub mod commands;
pub mod completion;
#[allow(clippy::module_inception)]
pub mod console;
pub mod error;
pub mod history;
pub mod line_buffer;
pub mod parser;

use core::fmt;

pub use colors::Color;
pub use commands::{command_names, find_command, CommandDescriptor, Dispatcher, COMMANDS};
pub use completion::complete;
pub use console::Console;
pub use error::ConsoleError;
pub use history::History;
pub use line_buffer::LineBuffer;
pub use parser::Command;

/// Byte-oriented operator terminal.
///
/// Output goes through [`fmt::Write`]; `\n` is translated by the
/// implementation if the line needs it.
pub trait Terminal: fmt::Write {
    /// Block until a byte arrives.
    fn read_byte(&mut self) -> u8;
    /// A byte if one is waiting, without blocking.
    fn poll_byte(&mut self) -> Option<u8>;
}

/// Consumer of completed lines.
pub trait LineHandler {
    /// Act on one submitted line. Output and any further input (scroll
    /// modes, for example) go through `term`.
    fn handle_line(&mut self, line: &str, term: &mut dyn Terminal) -> Result<(), ConsoleError>;
}
