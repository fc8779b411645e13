//! # rpi-console
//!
//! Bare-metal serial console for the Raspberry Pi 3/4.
//!
//! ## Architecture
//!
//! Two cores carry the design, everything else is thin I/O:
//! - [`mailbox`]: property requests to the VideoCore firmware over one
//!   shared, 16-byte aligned buffer, synchronized by polling status flags
//! - [`console`]: byte-at-a-time line editor (history, tab completion,
//!   backspace) feeding a command dispatcher
//!
//! Hardware sits behind small traits ([`mailbox::MailboxRegisters`],
//! [`console::Terminal`], [`viewer::FrameViewer`], [`hal::Delay`]) so the
//! whole console runs on the host against [`mailbox::SimulatedFirmware`].
//!
//! No heap, no threads, no interrupts.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod fixed;
pub mod hal;
pub mod log_globals;
pub mod logging;
pub mod mailbox;
pub mod viewer;

pub use config::{ConsoleConfig, VERSION};
pub use console::{Console, ConsoleError, Dispatcher, LineHandler, Terminal};
pub use fixed::FixedPoint;
pub use log_globals::CONSOLE_LOG_STREAM;
pub use logging::{LogStream, StreamLogger};
pub use mailbox::{Mailbox, MailboxBuffer, MailboxError, PropertyChannel, PropertyQueries};
pub use viewer::{FrameViewer, Image};
