//! GPIO function select and pull control.

use super::mmio::{delay_cycles, Reg};

const GPFSEL0: usize = 0x0020_0000;
#[cfg(not(feature = "rpi4"))]
const GPPUD: usize = 0x0020_0094;
#[cfg(not(feature = "rpi4"))]
const GPPUDCLK0: usize = 0x0020_0098;
#[cfg(feature = "rpi4")]
const GPIO_PUP_PDN_CNTRL_REG0: usize = 0x0020_00E4;

/// Pin function (3-bit FSEL field values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Function {
    Input = 0b000,
    Output = 0b001,
    Alt0 = 0b100,
    Alt1 = 0b101,
    Alt2 = 0b110,
    Alt3 = 0b111,
    Alt4 = 0b011,
    Alt5 = 0b010,
}

/// Select the function of `pin` (0..=53).
pub fn set_function(pin: u8, function: Function) {
    let pin = pin as usize;
    // SAFETY: GPFSELn registers exist on every supported board
    let reg = unsafe { Reg::peripheral(GPFSEL0 + (pin / 10) * 4) };
    let shift = (pin % 10) * 3;
    reg.modify(|r| (r & !(0b111 << shift)) | ((function as u32) << shift));
}

/// Remove pull-up/down resistors from pins 0..=15.
#[cfg(feature = "rpi4")]
pub fn disable_pulls(pins: &[u8]) {
    // SAFETY: BCM2711 pull control register
    let reg = unsafe { Reg::peripheral(GPIO_PUP_PDN_CNTRL_REG0) };
    reg.modify(|mut r| {
        for pin in pins.iter().filter(|p| **p < 16) {
            r &= !(0b11 << (*pin as u32 * 2));
        }
        r
    });
}

/// Remove pull-up/down resistors from pins 0..=31.
#[cfg(not(feature = "rpi4"))]
pub fn disable_pulls(pins: &[u8]) {
    // SAFETY: BCM2837 pull sequencing registers
    let (pud, clk) = unsafe { (Reg::peripheral(GPPUD), Reg::peripheral(GPPUDCLK0)) };

    let mask = pins
        .iter()
        .filter(|p| **p < 32)
        .fold(0u32, |m, p| m | (1 << *p));

    // Control signal must settle for 150 cycles on each side of the clock
    pud.write(0);
    delay_cycles(150);
    clk.write(mask);
    delay_cycles(150);
    clk.write(0);
}
