//! Global log stream instance.

use crate::logging::LogStream;

/// Console log stream.
///
/// Filled by the installed `StreamLogger`, emptied by the `logs` command.
/// Single producer, single consumer, both in the console loop.
pub static CONSOLE_LOG_STREAM: LogStream = LogStream::new();
