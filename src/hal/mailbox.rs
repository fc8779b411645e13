//! VideoCore mailbox registers.
//!
//! The ARM reads replies from mailbox 0 and posts requests to mailbox 1.

use super::mmio::Reg;
use crate::mailbox::MailboxRegisters;

const MBOX0_READ: usize = 0x0000_B880;
const MBOX0_STATUS: usize = 0x0000_B898;
const MBOX1_WRITE: usize = 0x0000_B8A0;
const MBOX1_STATUS: usize = 0x0000_B8B8;

/// Status: mailbox cannot accept another message
const MBOX_FULL: u32 = 0x8000_0000;
/// Status: mailbox holds no message
const MBOX_EMPTY: u32 = 0x4000_0000;

/// Mailbox registers of the selected board.
pub struct VideoCoreMailbox {
    read: Reg,
    read_status: Reg,
    write: Reg,
    write_status: Reg,
}

impl VideoCoreMailbox {
    /// # Safety
    ///
    /// Only one driver may own the mailbox registers.
    pub const unsafe fn new() -> Self {
        Self {
            read: Reg::peripheral(MBOX0_READ),
            read_status: Reg::peripheral(MBOX0_STATUS),
            write: Reg::peripheral(MBOX1_WRITE),
            write_status: Reg::peripheral(MBOX1_STATUS),
        }
    }
}

impl MailboxRegisters for VideoCoreMailbox {
    #[inline]
    fn is_full(&self) -> bool {
        self.write_status.read() & MBOX_FULL != 0
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.read_status.read() & MBOX_EMPTY != 0
    }

    #[inline]
    fn write(&mut self, message: u32) {
        self.write.write(message);
    }

    #[inline]
    fn read(&mut self) -> u32 {
        self.read.read()
    }
}
