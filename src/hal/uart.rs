//! Mini UART (UART1) on GPIO14/15.
//!
//! 8 data bits, no parity, 1 stop bit. Input CR becomes LF, output LF
//! becomes CR LF. Every access busy-polls the line status register.

use core::fmt;

use super::gpio::{self, Function};
use super::mmio::Reg;
use crate::config::BAUD_RATE;
use crate::console::Terminal;

const AUX_ENABLE: usize = 0x0021_5004;
const AUX_MU_IO: usize = 0x0021_5040;
const AUX_MU_IER: usize = 0x0021_5044;
const AUX_MU_IIR: usize = 0x0021_5048;
const AUX_MU_LCR: usize = 0x0021_504C;
const AUX_MU_MCR: usize = 0x0021_5050;
const AUX_MU_LSR: usize = 0x0021_5054;
const AUX_MU_CNTL: usize = 0x0021_5060;
const AUX_MU_BAUD: usize = 0x0021_5068;

/// LSR: receive FIFO holds at least one byte
const LSR_DATA_READY: u32 = 1 << 0;
/// LSR: transmit FIFO can accept a byte
const LSR_TX_EMPTY: u32 = 1 << 5;

/// Core clock feeding the mini UART baud generator.
const SYSTEM_CLOCK_HZ: u32 = 250_000_000;

/// Baud divisor: system_clock / (8 * baud) - 1
const fn baud_divisor(baud: u32) -> u32 {
    SYSTEM_CLOCK_HZ / (8 * baud) - 1
}

/// Mini UART driver.
pub struct MiniUart {
    io: Reg,
    lsr: Reg,
}

impl MiniUart {
    /// Handle to the mini UART registers.
    ///
    /// # Safety
    ///
    /// Must only be used on the board selected at build time, and only one
    /// context may drive the UART at a time.
    pub const unsafe fn new() -> Self {
        Self {
            io: Reg::peripheral(AUX_MU_IO),
            lsr: Reg::peripheral(AUX_MU_LSR),
        }
    }

    /// Program 115200 8N1 and route the UART to GPIO14/15 (ALT5).
    pub fn init(&mut self) {
        // SAFETY: AUX block registers of the selected board
        let (enable, ier, iir, lcr, mcr, cntl, baud) = unsafe {
            (
                Reg::peripheral(AUX_ENABLE),
                Reg::peripheral(AUX_MU_IER),
                Reg::peripheral(AUX_MU_IIR),
                Reg::peripheral(AUX_MU_LCR),
                Reg::peripheral(AUX_MU_MCR),
                Reg::peripheral(AUX_MU_CNTL),
                Reg::peripheral(AUX_MU_BAUD),
            )
        };

        enable.modify(|r| r | 1);
        cntl.write(0); // stop Tx/Rx while configuring
        lcr.write(3); // 8-bit mode
        mcr.write(0);
        ier.write(0); // polling only
        iir.write(0xC6); // enable and clear FIFOs
        baud.write(baud_divisor(BAUD_RATE));

        gpio::set_function(14, Function::Alt5);
        gpio::set_function(15, Function::Alt5);
        gpio::disable_pulls(&[14, 15]);

        cntl.write(3); // enable Tx/Rx
    }

    /// Send one raw byte.
    pub fn send(&mut self, byte: u8) {
        while self.lsr.read() & LSR_TX_EMPTY == 0 {
            core::hint::spin_loop();
        }
        self.io.write(byte as u32);
    }

    fn take(&mut self) -> u8 {
        let byte = (self.io.read() & 0xFF) as u8;
        if byte == b'\r' {
            b'\n'
        } else {
            byte
        }
    }
}

impl fmt::Write for MiniUart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            if b == b'\n' {
                self.send(b'\r');
            }
            self.send(b);
        }
        Ok(())
    }
}

impl Terminal for MiniUart {
    fn read_byte(&mut self) -> u8 {
        while self.lsr.read() & LSR_DATA_READY == 0 {
            core::hint::spin_loop();
        }
        self.take()
    }

    fn poll_byte(&mut self) -> Option<u8> {
        if self.lsr.read() & LSR_DATA_READY == 0 {
            return None;
        }
        Some(self.take())
    }
}
