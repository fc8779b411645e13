//! Command history with ring buffer
//!
//! Static allocation, 10 entries of 100 bytes each.
//!
//! Two cursors move independently:
//! - write cursor: slot the next submitted line goes to
//! - browse cursor: slot currently shown while recalling lines
//!
//! The slot under the write cursor doubles as the stash for the line being
//! typed when browsing starts, so going back past the newest entry restores
//! it.

pub use crate::config::{HISTORY_SIZE, LINE_SIZE};

/// Command history ring buffer
pub struct History {
    /// Ring buffer of command lines
    entries: [[u8; LINE_SIZE]; HISTORY_SIZE],
    /// Length of each entry
    lengths: [usize; HISTORY_SIZE],
    /// Write index (next slot to write)
    write_idx: usize,
    /// Browse index (slot being shown)
    browse_idx: usize,
}

impl History {
    /// Create empty history
    pub const fn new() -> Self {
        Self {
            entries: [[0u8; LINE_SIZE]; HISTORY_SIZE],
            lengths: [0; HISTORY_SIZE],
            write_idx: 0,
            browse_idx: 0,
        }
    }

    /// Store a submitted line, overwriting the oldest slot when full.
    pub fn push(&mut self, line: &str) {
        self.store(self.write_idx, line);
        self.write_idx = (self.write_idx + 1) % HISTORY_SIZE;
        self.browse_idx = self.write_idx;
    }

    /// Step back one slot.
    ///
    /// When browsing starts from the live position, `live` is stashed in the
    /// write slot first.
    pub fn previous(&mut self, live: &str) -> &str {
        if self.browse_idx == self.write_idx {
            self.store(self.write_idx, live);
        }
        self.browse_idx = (self.browse_idx + HISTORY_SIZE - 1) % HISTORY_SIZE;
        self.entry(self.browse_idx)
    }

    /// Step forward one slot; landing on the write slot yields the stash.
    pub fn next(&mut self) -> &str {
        self.browse_idx = (self.browse_idx + 1) % HISTORY_SIZE;
        self.entry(self.browse_idx)
    }

    /// Return to the live position.
    pub fn reset_browse(&mut self) {
        self.browse_idx = self.write_idx;
    }

    /// Whether the browse cursor sits on the live position.
    pub fn is_live(&self) -> bool {
        self.browse_idx == self.write_idx
    }

    pub fn write_cursor(&self) -> usize {
        self.write_idx
    }

    pub fn browse_cursor(&self) -> usize {
        self.browse_idx
    }

    /// Text of slot `idx` (empty for unused slots).
    pub fn entry(&self, idx: usize) -> &str {
        let idx = idx % HISTORY_SIZE;
        core::str::from_utf8(&self.entries[idx][..self.lengths[idx]]).unwrap_or("")
    }

    fn store(&mut self, idx: usize, line: &str) {
        let bytes = line.as_bytes();
        let len = bytes.len().min(LINE_SIZE);
        self.entries[idx][..len].copy_from_slice(&bytes[..len]);
        self.lengths[idx] = len;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
