//! Simulated VideoCore firmware
//!
//! A [`MailboxRegisters`] implementation that serves property requests
//! straight out of the shared buffer, the way the real firmware does, plus
//! a few knobs to misbehave on purpose: foreign-channel replies, bad
//! response codes, wrong addresses, a dead device.
//!
//! Used by the host build of the console and by the tests.

use heapless::Deque;

use super::buffer::{HEADER_WORDS, RESPONSE_ERROR, RESPONSE_SUCCESS};
use super::property::{Clock, PropertyResponse, Tag};
use super::{channel_bits, compose, Channel, MailboxBuffer, MailboxRegisters};
use crate::config::MAILBOX_WORDS;

/// Address used for replies injected on other channels.
const FOREIGN_ADDRESS: u32 = 0x000F_F000;

/// Depth of the reply queue.
const QUEUE_DEPTH: usize = 8;

/// Firmware model bound to one shared buffer.
pub struct SimulatedFirmware<'a> {
    buffer: &'a MailboxBuffer,
    replies: Deque<u32, QUEUE_DEPTH>,

    /// Board revision code
    pub revision: u32,
    /// MAC address bytes in firmware order
    pub mac: [u8; 6],
    pub uart_hz: u32,
    pub arm_hz: u32,
    pub core_hz: u32,
    /// Physical display size
    pub physical: (u32, u32),
    pub virtual_size: (u32, u32),
    pub depth: u32,

    reply_override: Option<PropertyResponse>,
    response_code: Option<u32>,
    foreign: Option<Channel>,
    address_xor: u32,
    silent: bool,
    jammed: bool,
    calls: u32,
    last_tag: Option<u32>,
}

impl<'a> SimulatedFirmware<'a> {
    /// A Raspberry Pi 3B as QEMU presents it.
    pub fn new(buffer: &'a MailboxBuffer) -> Self {
        Self {
            buffer,
            replies: Deque::new(),
            revision: 0x00a0_2082,
            mac: [0x52, 0x54, 0x00, 0x12, 0x34, 0x56],
            uart_hz: 48_000_000,
            arm_hz: 1_200_000_000,
            core_hz: 250_000_000,
            physical: (640, 480),
            virtual_size: (640, 480),
            depth: 32,
            reply_override: None,
            response_code: None,
            foreign: None,
            address_xor: 0,
            silent: false,
            jammed: false,
            calls: 0,
            last_tag: None,
        }
    }

    /// Answer every request with these words instead of the modelled value.
    pub fn set_reply(&mut self, words: &[u32]) {
        self.reply_override = Some(PropertyResponse::from_words(words));
    }

    /// Write `code` into the response-code word instead of success.
    pub fn fail_with(&mut self, code: u32) {
        self.response_code = Some(code);
    }

    /// Queue a reply on `channel` ahead of every real reply.
    pub fn interleave(&mut self, channel: Channel) {
        self.foreign = Some(channel);
    }

    /// Flip address bits in the reply message.
    pub fn corrupt_address(&mut self, xor: u32) {
        self.address_xor = xor & !0xF;
    }

    /// Never reply again.
    pub fn go_silent(&mut self) {
        self.silent = true;
    }

    /// Keep the send side permanently full.
    pub fn jam(&mut self) {
        self.jammed = true;
    }

    /// Messages accepted so far.
    pub fn calls(&self) -> u32 {
        self.calls
    }

    /// Tag id of the last property request served.
    pub fn last_tag(&self) -> Option<u32> {
        self.last_tag
    }

    fn serve_property(&mut self) {
        let tag_id = self.buffer.read(2);
        let request_words = (self.buffer.read(3) / 4) as usize;
        let response_words = (self.buffer.read(4) / 4) as usize;
        self.last_tag = Some(tag_id);

        if HEADER_WORDS + request_words.max(response_words) > MAILBOX_WORDS {
            self.buffer.write(1, RESPONSE_ERROR);
            return;
        }

        // Read the request before the reply overwrites it
        let mut request = [0u32; 4];
        for (i, slot) in request.iter_mut().enumerate().take(request_words) {
            *slot = self.buffer.read(HEADER_WORDS + i);
        }

        let reply = match self.reply_override.clone() {
            Some(reply) => Some(reply),
            None => Tag::from_id(tag_id).map(|tag| self.model_reply(tag, &request)),
        };

        let code = match reply {
            Some(reply) => {
                for (i, word) in reply.words().iter().take(response_words).enumerate() {
                    self.buffer.write(HEADER_WORDS + i, *word);
                }
                RESPONSE_SUCCESS
            }
            None => RESPONSE_ERROR,
        };

        self.buffer.write(1, self.response_code.unwrap_or(code));
    }

    fn model_reply(&mut self, tag: Tag, request: &[u32; 4]) -> PropertyResponse {
        match tag {
            Tag::GetBoardRevision => PropertyResponse::from_words(&[self.revision]),
            Tag::GetBoardMacAddress => {
                let m = self.mac;
                let low = u32::from_le_bytes([m[0], m[1], m[2], m[3]]);
                let high = u32::from_le_bytes([m[4], m[5], 0, 0]);
                PropertyResponse::from_words(&[low, high])
            }
            Tag::GetClockRate => {
                let id = request[0];
                let hz = match id {
                    x if x == Clock::Uart as u32 => self.uart_hz,
                    x if x == Clock::Arm as u32 => self.arm_hz,
                    x if x == Clock::Core as u32 => self.core_hz,
                    _ => 0,
                };
                PropertyResponse::from_words(&[id, hz])
            }
            Tag::SetPhysicalSize => {
                self.physical = (request[0], request[1]);
                PropertyResponse::from_words(&[request[0], request[1]])
            }
            Tag::SetVirtualSize => {
                self.virtual_size = (request[0], request[1]);
                PropertyResponse::from_words(&[request[0], request[1]])
            }
            Tag::SetVirtualOffset => PropertyResponse::from_words(&[request[0], request[1]]),
            Tag::SetDepth => {
                self.depth = request[0];
                PropertyResponse::from_words(&[request[0]])
            }
            Tag::SetPixelOrder => PropertyResponse::from_words(&[request[0]]),
            Tag::AllocateBuffer => {
                let (w, h) = self.virtual_size;
                let size = u64::from(w)
                    .saturating_mul(u64::from(h))
                    .saturating_mul(u64::from(self.depth))
                    / 8;
                let size = u32::try_from(size).unwrap_or(u32::MAX);
                PropertyResponse::from_words(&[0xFC10_0000, size])
            }
            Tag::GetPitch => {
                let pitch = self.virtual_size.0.saturating_mul(self.depth) / 8;
                PropertyResponse::from_words(&[pitch])
            }
        }
    }
}

impl MailboxRegisters for SimulatedFirmware<'_> {
    fn is_full(&self) -> bool {
        self.jammed
    }

    fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    fn write(&mut self, message: u32) {
        if self.silent {
            return;
        }
        self.calls += 1;

        if channel_bits(message) == Channel::Property as u32 {
            self.serve_property();
        }

        if let Some(channel) = self.foreign {
            let _ = self.replies.push_back(compose(FOREIGN_ADDRESS, channel));
        }
        let _ = self.replies.push_back(message ^ self.address_xor);
    }

    fn read(&mut self) -> u32 {
        self.replies.pop_front().unwrap_or(0)
    }
}
