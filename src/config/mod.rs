//! Module: config
//!
//! Purpose: Build-time and boot-time configuration for the console.
//!
//! Architecture:
//! - Board selection: Cargo feature `rpi3` (default) or `rpi4`
//! - Capacities: fixed at compile time, no allocation anywhere
//! - Operator-facing knobs: [`ConsoleConfig`], handed to the line editor

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Peripheral window as seen from the ARM cores.
#[cfg(feature = "rpi4")]
pub const MMIO_BASE: usize = 0xFE00_0000;

/// Peripheral window as seen from the ARM cores.
#[cfg(not(feature = "rpi4"))]
pub const MMIO_BASE: usize = 0x3F00_0000;

/// Edit buffer capacity in bytes (also the size of one history slot).
pub const LINE_SIZE: usize = 100;

/// Number of history slots.
pub const HISTORY_SIZE: usize = 10;

/// Mailbox buffer capacity in 32-bit words.
pub const MAILBOX_WORDS: usize = 36;

/// Serial line speed. The divisor in `hal::uart` assumes a 250 MHz core clock.
pub const BAUD_RATE: u32 = 115_200;

/// Requested display size at boot.
pub const SCREEN_WIDTH: u32 = 1024;
pub const SCREEN_HEIGHT: u32 = 720;

/// Display size requested by `expandscreen`.
pub const EXPANDED_WIDTH: u32 = 1024;
pub const EXPANDED_HEIGHT: u32 = 768;

/// Line editor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Prompt printed before every line
    pub prompt: &'static str,
    /// Byte that recalls the previous history entry
    pub history_previous: u8,
    /// Byte that moves forward through history
    pub history_next: u8,
}

impl ConsoleConfig {
    pub const fn new() -> Self {
        Self {
            prompt: "rpi> ",
            history_previous: b'_',
            history_next: b'+',
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new()
    }
}
