//! VideoCore mailbox
//!
//! Request/response exchange with the GPU firmware over a shared buffer,
//! synchronized only by polling the mailbox status flags.
//!
//! ```text
//! ARM core                      Mailbox regs              VideoCore
//! ────────                      ────────────              ─────────
//! setup() ─▶ [buffer]
//! call()  ── addr|ch ─────────▶ MBOX1 write ───────────▶ reads buffer
//!                                                         writes reply
//!         ◀───────── addr|ch ── MBOX0 read  ◀─────────── posts addr|ch
//! read response ◀─ [buffer]
//! ```
//!
//! The three steps are not atomic. Whoever holds `&mut Mailbox` owns the
//! whole sequence.

pub mod buffer;
pub mod error;
pub mod property;
pub mod sim;

pub use buffer::{MailboxBuffer, ResponseSlot, RESPONSE_ERROR, RESPONSE_SUCCESS};
pub use error::MailboxError;
pub use property::{
    BoardRevision, Clock, ClockRate, MacAddress, PropertyChannel, PropertyQueries,
    PropertyResponse, Tag,
};
pub use sim::SimulatedFirmware;

/// Mailbox channels (low 4 bits of a message).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Channel {
    Power = 0,
    Framebuffer = 1,
    VirtualUart = 2,
    Vchiq = 3,
    Leds = 4,
    Buttons = 5,
    TouchScreen = 6,
    Count = 7,
    /// ARM to VideoCore property tags
    Property = 8,
}

impl Channel {
    /// Convert from the low 4 bits of a message.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Channel::Power),
            1 => Some(Channel::Framebuffer),
            2 => Some(Channel::VirtualUart),
            3 => Some(Channel::Vchiq),
            4 => Some(Channel::Leds),
            5 => Some(Channel::Buttons),
            6 => Some(Channel::TouchScreen),
            7 => Some(Channel::Count),
            8 => Some(Channel::Property),
            _ => None,
        }
    }
}

/// Compose a mailbox message from a buffer address and a channel.
#[inline]
pub fn compose(address: u32, channel: Channel) -> u32 {
    (address & !0xF) | (channel as u32 & 0xF)
}

/// Channel bits of a message.
#[inline]
pub fn channel_bits(message: u32) -> u32 {
    message & 0xF
}

/// Mailbox status/data registers.
///
/// The seam between the protocol and the hardware: the real implementation
/// lives in `hal::mailbox`, tests and the host build use
/// [`SimulatedFirmware`].
pub trait MailboxRegisters {
    /// Send side cannot take another message.
    fn is_full(&self) -> bool;
    /// Receive side holds no message.
    fn is_empty(&self) -> bool;
    /// Post a message.
    fn write(&mut self, message: u32);
    /// Take the next message.
    fn read(&mut self) -> u32;
}

/// What to do between two polls of a status flag.
pub trait WaitPolicy {
    /// Called once at the start of every exchange.
    fn reset(&mut self);
    /// Called before every re-poll. Returning `false` abandons the exchange.
    fn tick(&mut self) -> bool;
}

/// Spin forever. A device that never answers hangs the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct Spin;

impl WaitPolicy for Spin {
    fn reset(&mut self) {}

    #[inline]
    fn tick(&mut self) -> bool {
        core::hint::spin_loop();
        true
    }
}

/// Give up after a fixed number of polls per exchange.
#[derive(Debug, Clone, Copy)]
pub struct Bounded {
    limit: u32,
    polls: u32,
}

impl Bounded {
    pub const fn new(limit: u32) -> Self {
        Self { limit, polls: 0 }
    }

    /// Polls spent in the current exchange.
    pub fn polls(&self) -> u32 {
        self.polls
    }
}

impl WaitPolicy for Bounded {
    fn reset(&mut self) {
        self.polls = 0;
    }

    fn tick(&mut self) -> bool {
        if self.polls >= self.limit {
            return false;
        }
        self.polls += 1;
        true
    }
}

/// Mailbox channel driver bound to one shared buffer.
pub struct Mailbox<'a, R, W = Spin> {
    regs: R,
    wait: W,
    buffer: &'a MailboxBuffer,
}

impl<'a, R: MailboxRegisters, W: WaitPolicy> Mailbox<'a, R, W> {
    /// Create a driver over `regs` using `buffer` for every exchange.
    pub fn new(regs: R, wait: W, buffer: &'a MailboxBuffer) -> Self {
        Self { regs, wait, buffer }
    }

    /// The shared buffer.
    pub fn buffer(&self) -> &'a MailboxBuffer {
        self.buffer
    }

    /// Registers, e.g. to script a simulated device.
    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Hand the buffer to the firmware on `channel` and wait for the reply.
    ///
    /// Replies for other channels are skipped. Success requires the reply to
    /// carry our own message back and the buffer to hold the success code.
    pub fn call(&mut self, channel: Channel) -> Result<(), MailboxError> {
        self.wait.reset();

        let message = compose(self.buffer.bus_address(), channel);
        self.send(message)?;
        let reply = self.receive(channel)?;

        if reply != message {
            log::warn!("mailbox: reply {:#010x} for message {:#010x}", reply, message);
            return Err(MailboxError::AddressMismatch {
                sent: message,
                received: reply,
            });
        }

        let code = self.buffer.response_code();
        if code != RESPONSE_SUCCESS {
            log::warn!("mailbox: response code {:#010x}", code);
            return Err(MailboxError::ResponseCode(code));
        }

        Ok(())
    }

    fn send(&mut self, message: u32) -> Result<(), MailboxError> {
        while self.regs.is_full() {
            if !self.wait.tick() {
                log::warn!("mailbox: send side stuck full");
                return Err(MailboxError::Timeout);
            }
        }
        self.regs.write(message);
        Ok(())
    }

    fn receive(&mut self, channel: Channel) -> Result<u32, MailboxError> {
        loop {
            while self.regs.is_empty() {
                if !self.wait.tick() {
                    log::warn!("mailbox: no reply on channel {}", channel as u8);
                    return Err(MailboxError::Timeout);
                }
            }

            let reply = self.regs.read();
            if channel_bits(reply) == channel as u32 {
                return Ok(reply);
            }

            log::trace!("mailbox: skipped reply {:#010x} for another channel", reply);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_keeps_channel_in_low_bits() {
        assert_eq!(compose(0x0008_1230, Channel::Property), 0x0008_1238);
        assert_eq!(compose(0x0008_123F, Channel::Power), 0x0008_1230);
    }

    #[test]
    fn test_channel_from_u8() {
        assert_eq!(Channel::from_u8(8), Some(Channel::Property));
        assert_eq!(Channel::from_u8(1), Some(Channel::Framebuffer));
        assert_eq!(Channel::from_u8(9), None);
    }

    #[test]
    fn test_bounded_wait_policy() {
        let mut wait = Bounded::new(2);
        assert!(wait.tick());
        assert!(wait.tick());
        assert!(!wait.tick());
        assert_eq!(wait.polls(), 2);

        wait.reset();
        assert!(wait.tick());
    }

    #[test]
    fn test_spin_never_gives_up() {
        let mut wait = Spin;
        for _ in 0..1000 {
            assert!(wait.tick());
        }
    }
}
