//! Shared request/response buffer
//!
//! One 16-byte aligned block of words that both the ARM core and the
//! VideoCore read and write. The low 4 bits of its address carry the channel
//! number in a mailbox message, hence the alignment.
//!
//! Layout written by [`MailboxBuffer::setup`]:
//!
//! ```text
//! [0] total size in bytes (16 + request + response)
//! [1] request/response code
//! [2] tag id
//! [3] request payload length in bytes
//! [4] response buffer length in bytes
//! [5..] request words, then the end tag; the reply overwrites from [5]
//! ```

use core::cell::UnsafeCell;

use super::MailboxError;
use crate::config::MAILBOX_WORDS;

/// Code in word 1 of an outgoing request.
pub const REQUEST: u32 = 0;

/// Code in word 1 after the firmware served the request.
pub const RESPONSE_SUCCESS: u32 = 0x8000_0000;

/// Code in word 1 when the firmware failed to parse the request.
pub const RESPONSE_ERROR: u32 = 0x8000_0001;

/// End-of-tags marker.
pub const TAG_END: u32 = 0;

/// Words before the payload area.
pub const HEADER_WORDS: usize = 5;

/// Header bytes counted in the total size word.
const SIZE_HEADER_BYTES: usize = 16;

/// Where the reply of the last [`MailboxBuffer::setup`] lands.
///
/// Only valid until the next `setup` on the same buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSlot {
    pub offset: usize,
    pub len: usize,
}

/// The shared mailbox buffer.
///
/// Interior mutability with volatile accesses: the coprocessor rewrites the
/// contents between our send and our receive.
#[repr(C, align(16))]
pub struct MailboxBuffer {
    words: UnsafeCell<[u32; MAILBOX_WORDS]>,
}

// SAFETY: Single core, no interrupts. Every setup/call/read sequence runs
// through `&mut Mailbox`, which is the only handle the console holds.
unsafe impl Sync for MailboxBuffer {}

impl MailboxBuffer {
    /// Create zeroed buffer
    pub const fn new() -> Self {
        Self {
            words: UnsafeCell::new([0; MAILBOX_WORDS]),
        }
    }

    /// Address handed to the mailbox (low 4 bits are always zero).
    pub fn bus_address(&self) -> u32 {
        self.words.get() as usize as u32
    }

    /// Read one word.
    ///
    /// Panics if `index` is outside the buffer.
    pub fn read(&self, index: usize) -> u32 {
        assert!(index < MAILBOX_WORDS, "mailbox word {} out of range", index);
        // SAFETY: index checked above; pointer derived from the UnsafeCell.
        unsafe { core::ptr::read_volatile((self.words.get() as *const u32).add(index)) }
    }

    /// Write one word.
    ///
    /// Panics if `index` is outside the buffer.
    pub fn write(&self, index: usize, value: u32) {
        assert!(index < MAILBOX_WORDS, "mailbox word {} out of range", index);
        // SAFETY: index checked above; pointer derived from the UnsafeCell.
        unsafe { core::ptr::write_volatile((self.words.get() as *mut u32).add(index), value) }
    }

    /// Response code word.
    pub fn response_code(&self) -> u32 {
        self.read(1)
    }

    /// Frame a single-tag request.
    ///
    /// Nothing is written when the request does not fit.
    pub fn setup(
        &self,
        tag: u32,
        response_bytes: usize,
        request: &[u32],
    ) -> Result<ResponseSlot, MailboxError> {
        if response_bytes % 4 != 0 {
            return Err(MailboxError::Misaligned(response_bytes));
        }

        let request_bytes = request.len() * 4;
        let response_words = response_bytes / 4;

        // Request words plus end tag, or the reply, whichever reaches further
        let words = HEADER_WORDS + (request.len() + 1).max(response_words);
        if words > MAILBOX_WORDS {
            return Err(MailboxError::Overflow {
                words,
                capacity: MAILBOX_WORDS,
            });
        }

        self.write(0, (SIZE_HEADER_BYTES + request_bytes + response_bytes) as u32);
        self.write(1, REQUEST);
        self.write(2, tag);
        self.write(3, request_bytes as u32);
        self.write(4, response_bytes as u32);

        for (i, word) in request.iter().enumerate() {
            self.write(HEADER_WORDS + i, *word);
        }
        self.write(HEADER_WORDS + request.len(), TAG_END);

        Ok(ResponseSlot {
            offset: HEADER_WORDS,
            len: response_words,
        })
    }

    /// Word `index` of a response region.
    pub fn response_word(&self, slot: ResponseSlot, index: usize) -> Option<u32> {
        if index < slot.len {
            Some(self.read(slot.offset + index))
        } else {
            None
        }
    }

    /// All words of a response region, in order.
    pub fn response(&self, slot: ResponseSlot) -> impl Iterator<Item = u32> + '_ {
        (0..slot.len).map(move |i| self.read(slot.offset + i))
    }
}

impl Default for MailboxBuffer {
    fn default() -> Self {
        Self::new()
    }
}
