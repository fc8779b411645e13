//! Memory-mapped register access

use crate::config::MMIO_BASE;

/// One 32-bit device register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg {
    addr: usize,
}

impl Reg {
    /// Register at `offset` inside the peripheral window.
    ///
    /// # Safety
    ///
    /// `offset` must name a register of the selected board.
    pub const unsafe fn peripheral(offset: usize) -> Self {
        Self {
            addr: MMIO_BASE + offset,
        }
    }

    #[inline]
    pub fn read(&self) -> u32 {
        // SAFETY: construction guarantees a valid register address
        unsafe { core::ptr::read_volatile(self.addr as *const u32) }
    }

    #[inline]
    pub fn write(&self, value: u32) {
        // SAFETY: construction guarantees a valid register address
        unsafe { core::ptr::write_volatile(self.addr as *mut u32, value) }
    }

    /// Read-modify-write.
    #[inline]
    pub fn modify(&self, f: impl FnOnce(u32) -> u32) {
        self.write(f(self.read()));
    }
}

/// Burn `cycles` iterations without touching memory.
#[inline]
pub fn delay_cycles(cycles: u32) {
    for _ in 0..cycles {
        core::hint::spin_loop();
    }
}
