//! Time source and busy-wait delays.

/// Microsecond clock with blocking delays.
pub trait Delay {
    /// Microseconds since some fixed point (boot, on hardware).
    fn now_us(&self) -> u64;

    /// Busy-wait for `us` microseconds.
    fn delay_us(&mut self, us: u64) {
        let end = self.now_us().saturating_add(us);
        while self.now_us() < end {
            core::hint::spin_loop();
        }
    }

    fn delay_ms(&mut self, ms: u64) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

/// ARM generic timer (CNTPCT_EL0 / CNTFRQ_EL0).
#[cfg(target_arch = "aarch64")]
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericTimer;

#[cfg(target_arch = "aarch64")]
impl GenericTimer {
    /// Counter frequency in Hz.
    #[inline]
    pub fn frequency() -> u64 {
        let f: u64;
        // SAFETY: reading CNTFRQ_EL0 has no side effects
        unsafe { core::arch::asm!("mrs {}, cntfrq_el0", out(reg) f, options(nomem, nostack)) };
        f
    }

    /// Raw counter value.
    #[inline]
    pub fn ticks() -> u64 {
        let t: u64;
        // SAFETY: reading CNTPCT_EL0 has no side effects
        unsafe { core::arch::asm!("mrs {}, cntpct_el0", out(reg) t, options(nomem, nostack)) };
        t
    }

    /// Microseconds since the counter started.
    pub fn uptime_us() -> u64 {
        let freq = Self::frequency().max(1) as u128;
        (Self::ticks() as u128 * 1_000_000 / freq) as u64
    }
}

#[cfg(target_arch = "aarch64")]
impl Delay for GenericTimer {
    fn now_us(&self) -> u64 {
        Self::uptime_us()
    }
}
