//! Property tag queries
//!
//! Each query frames one tag, calls the property channel and reads typed
//! fields out of the reply. Request/response sizes per tag come from a
//! fixed table, they are never discovered at runtime.

use core::fmt;

use heapless::Vec;

use super::{Channel, Mailbox, MailboxError, MailboxRegisters, WaitPolicy};

/// Largest reply any known tag produces, in words.
pub const MAX_RESPONSE_WORDS: usize = 8;

/// Property tag ids (firmware-defined).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Tag {
    GetBoardRevision = 0x0001_0002,
    GetBoardMacAddress = 0x0001_0003,
    GetClockRate = 0x0003_0002,
    AllocateBuffer = 0x0004_0001,
    GetPitch = 0x0004_0008,
    SetPhysicalSize = 0x0004_8003,
    SetVirtualSize = 0x0004_8004,
    SetDepth = 0x0004_8005,
    SetPixelOrder = 0x0004_8006,
    SetVirtualOffset = 0x0004_8009,
}

/// Payload sizes of a tag, in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagLayout {
    pub request_words: usize,
    pub response_words: usize,
}

impl Tag {
    /// Every known tag
    pub const ALL: [Tag; 10] = [
        Tag::GetBoardRevision,
        Tag::GetBoardMacAddress,
        Tag::GetClockRate,
        Tag::AllocateBuffer,
        Tag::GetPitch,
        Tag::SetPhysicalSize,
        Tag::SetVirtualSize,
        Tag::SetDepth,
        Tag::SetPixelOrder,
        Tag::SetVirtualOffset,
    ];

    /// Wire id
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Look up a tag by wire id
    pub fn from_id(id: u32) -> Option<Tag> {
        Self::ALL.iter().copied().find(|t| t.id() == id)
    }

    /// Request/response word counts
    pub const fn layout(self) -> TagLayout {
        let (request_words, response_words) = match self {
            Tag::GetBoardRevision => (0, 1),
            Tag::GetBoardMacAddress => (0, 2),
            Tag::GetClockRate => (2, 2),
            Tag::AllocateBuffer => (1, 2),
            Tag::GetPitch => (0, 1),
            Tag::SetPhysicalSize => (2, 2),
            Tag::SetVirtualSize => (2, 2),
            Tag::SetDepth => (1, 1),
            Tag::SetPixelOrder => (1, 1),
            Tag::SetVirtualOffset => (2, 2),
        };
        TagLayout {
            request_words,
            response_words,
        }
    }
}

/// Reply words copied out of the shared buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyResponse {
    words: Vec<u32, MAX_RESPONSE_WORDS>,
}

impl PropertyResponse {
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Build from words; extra words beyond capacity are dropped.
    pub fn from_words(words: &[u32]) -> Self {
        let mut response = Self::new();
        for w in words {
            if response.words.push(*w).is_err() {
                break;
            }
        }
        response
    }

    /// Word `index`, zero if the reply was shorter.
    pub fn word(&self, index: usize) -> u32 {
        self.words.get(index).copied().unwrap_or(0)
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }
}

/// Something that can serve one property tag at a time.
pub trait PropertyChannel {
    fn query(&mut self, tag: Tag, request: &[u32]) -> Result<PropertyResponse, MailboxError>;
}

impl<R: MailboxRegisters, W: WaitPolicy> PropertyChannel for Mailbox<'_, R, W> {
    fn query(&mut self, tag: Tag, request: &[u32]) -> Result<PropertyResponse, MailboxError> {
        let layout = tag.layout();
        if request.len() != layout.request_words {
            return Err(MailboxError::RequestLength {
                expected: layout.request_words,
                actual: request.len(),
            });
        }

        let slot = self
            .buffer()
            .setup(tag.id(), layout.response_words * 4, request)?;
        self.call(Channel::Property)?;

        let mut response = PropertyResponse::new();
        for word in self.buffer().response(slot) {
            if response.words.push(word).is_err() {
                break;
            }
        }

        log::debug!("property {:#010x}: {:x?}", tag.id(), response.words());
        Ok(response)
    }
}

/// Board revision code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRevision(pub u32);

/// Revision codes with a known model name.
const BOARD_MODELS: [(u32, &str); 5] = [
    (0x00a0_2082, "rpi-3B BCM2837 1GiB Sony UK"),
    (0x0090_0092, "rpi-Zero BCM2835 512MB Sony UK"),
    (0x0000_0010, "rpi-1B+ BCM2835"),
    (0x00a0_1041, "rpi-2B BCM2836 1GiB Sony UK"),
    (0x00b0_3111, "rpi-4B BCM2711 2GiB Sony UK"),
];

impl BoardRevision {
    /// Model name, if the code is one of the known ones.
    pub fn model(&self) -> Option<&'static str> {
        BOARD_MODELS
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, name)| *name)
    }
}

/// Board MAC address, bytes in the order the firmware returns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddress(pub [u8; 6]);

/// How to print a [`MacAddress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacFormat {
    /// `0x` + bytes 3, 2, 1, 0 (the first reply word)
    LowWord,
    /// `0x0000` + bytes 5, 4 (the second reply word)
    HighWord,
    /// bytes 5 down to 0, colon separated
    Colon,
}

impl MacAddress {
    /// From the two little-endian reply words.
    pub fn from_words(low: u32, high: u32) -> Self {
        let l = low.to_le_bytes();
        let h = high.to_le_bytes();
        Self([l[0], l[1], l[2], l[3], h[0], h[1]])
    }

    pub fn display(&self, format: MacFormat) -> MacDisplay {
        MacDisplay { mac: *self, format }
    }
}

/// Display adapter returned by [`MacAddress::display`].
pub struct MacDisplay {
    mac: MacAddress,
    format: MacFormat,
}

impl fmt::Display for MacDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.mac.0;
        match self.format {
            MacFormat::LowWord => write!(f, "0x{:02X}{:02X}{:02X}{:02X}", b[3], b[2], b[1], b[0]),
            MacFormat::HighWord => write!(f, "0x0000{:02X}{:02X}", b[5], b[4]),
            MacFormat::Colon => write!(
                f,
                "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
                b[5], b[4], b[3], b[2], b[1], b[0]
            ),
        }
    }
}

/// Clock ids understood by the clock tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Clock {
    Emmc = 1,
    Uart = 2,
    Arm = 3,
    Core = 4,
    V3d = 5,
    H264 = 6,
    Isp = 7,
    Sdram = 8,
    Pixel = 9,
    Pwm = 10,
}

/// Reply of a clock rate query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockRate {
    pub id: u32,
    pub hz: u32,
}

/// Named queries over any [`PropertyChannel`].
pub trait PropertyQueries: PropertyChannel {
    fn board_revision(&mut self) -> Result<BoardRevision, MailboxError> {
        let r = self.query(Tag::GetBoardRevision, &[])?;
        Ok(BoardRevision(r.word(0)))
    }

    fn mac_address(&mut self) -> Result<MacAddress, MailboxError> {
        let r = self.query(Tag::GetBoardMacAddress, &[])?;
        Ok(MacAddress::from_words(r.word(0), r.word(1)))
    }

    fn clock_rate(&mut self, clock: Clock) -> Result<ClockRate, MailboxError> {
        // Second word clears the reply slot
        let r = self.query(Tag::GetClockRate, &[clock as u32, 0])?;
        Ok(ClockRate {
            id: r.word(0),
            hz: r.word(1),
        })
    }

    /// Returns the size the firmware actually applied.
    fn set_physical_size(&mut self, width: u32, height: u32) -> Result<(u32, u32), MailboxError> {
        let r = self.query(Tag::SetPhysicalSize, &[width, height])?;
        Ok((r.word(0), r.word(1)))
    }

    fn set_virtual_size(&mut self, width: u32, height: u32) -> Result<(u32, u32), MailboxError> {
        let r = self.query(Tag::SetVirtualSize, &[width, height])?;
        Ok((r.word(0), r.word(1)))
    }

    fn set_virtual_offset(&mut self, x: u32, y: u32) -> Result<(u32, u32), MailboxError> {
        let r = self.query(Tag::SetVirtualOffset, &[x, y])?;
        Ok((r.word(0), r.word(1)))
    }

    fn set_depth(&mut self, bits_per_pixel: u32) -> Result<u32, MailboxError> {
        let r = self.query(Tag::SetDepth, &[bits_per_pixel])?;
        Ok(r.word(0))
    }

    /// 0 = BGR, 1 = RGB
    fn set_pixel_order(&mut self, order: u32) -> Result<u32, MailboxError> {
        let r = self.query(Tag::SetPixelOrder, &[order])?;
        Ok(r.word(0))
    }

    /// Returns (bus address, size in bytes).
    fn allocate_buffer(&mut self, alignment: u32) -> Result<(u32, u32), MailboxError> {
        let r = self.query(Tag::AllocateBuffer, &[alignment])?;
        Ok((r.word(0), r.word(1)))
    }

    /// Bytes per framebuffer row.
    fn pitch(&mut self) -> Result<u32, MailboxError> {
        let r = self.query(Tag::GetPitch, &[])?;
        Ok(r.word(0))
    }
}

impl<T: PropertyChannel + ?Sized> PropertyQueries for T {}
