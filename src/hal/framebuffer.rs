//! Linear 32-bit framebuffer obtained through property tags.

use core::fmt;

use crate::mailbox::{MailboxError, PropertyChannel, PropertyQueries};
use crate::viewer::{FrameViewer, Image};

/// GPU bus addresses carry the cache alias in the top two bits.
const BUS_ADDRESS_MASK: u32 = 0x3FFF_FFFF;

const BITS_PER_PIXEL: u32 = 32;
const PIXEL_ORDER_RGB: u32 = 1;
const BUFFER_ALIGNMENT: u32 = 16;

/// Framebuffer bring-up error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferError {
    /// A property request failed
    Mailbox(MailboxError),
    /// Firmware refused 32-bit pixels
    UnsupportedDepth(u32),
    /// Firmware returned no buffer
    NoBuffer,
}

impl From<MailboxError> for FramebufferError {
    fn from(e: MailboxError) -> Self {
        FramebufferError::Mailbox(e)
    }
}

impl fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mailbox(e) => write!(f, "framebuffer: {}", e),
            Self::UnsupportedDepth(d) => write!(f, "framebuffer: depth {} not supported", d),
            Self::NoBuffer => write!(f, "framebuffer: no buffer allocated"),
        }
    }
}

/// Framebuffer memory handed out by the firmware.
pub struct Framebuffer {
    base: usize,
    width: u32,
    height: u32,
    pitch: u32,
}

impl Framebuffer {
    /// Ask the firmware for a `width` x `height` 32-bit RGB framebuffer.
    pub fn init(
        props: &mut dyn PropertyChannel,
        width: u32,
        height: u32,
    ) -> Result<Self, FramebufferError> {
        let (width, height) = props.set_physical_size(width, height)?;
        props.set_virtual_size(width, height)?;
        props.set_virtual_offset(0, 0)?;

        let depth = props.set_depth(BITS_PER_PIXEL)?;
        if depth != BITS_PER_PIXEL {
            return Err(FramebufferError::UnsupportedDepth(depth));
        }
        props.set_pixel_order(PIXEL_ORDER_RGB)?;

        let (bus_address, size) = props.allocate_buffer(BUFFER_ALIGNMENT)?;
        if bus_address == 0 || size == 0 {
            return Err(FramebufferError::NoBuffer);
        }
        let pitch = props.pitch()?;

        log::info!(
            "framebuffer {}x{} pitch {} at {:#010x}",
            width,
            height,
            pitch,
            bus_address & BUS_ADDRESS_MASK
        );

        Ok(Self {
            base: (bus_address & BUS_ADDRESS_MASK) as usize,
            width,
            height,
            pitch,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn put(&mut self, x: u32, y: u32, color: u32) {
        let offset = (y * self.pitch + x * 4) as usize;
        // SAFETY: callers clip to width/height; the firmware sized the
        // buffer as pitch * height bytes.
        unsafe { core::ptr::write_volatile((self.base + offset) as *mut u32, color) }
    }
}

impl FrameViewer for Framebuffer {
    fn clear(&mut self, color: u32) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.put(x, y, color);
            }
        }
    }

    fn draw_image(&mut self, image: &dyn Image, x: i32, y: i32) {
        // Visible part of the image, in image coordinates
        let x0 = (-x).max(0) as u32;
        let y0 = (-y).max(0) as u32;
        let x1 = (self.width as i64 - x as i64).clamp(0, image.width() as i64) as u32;
        let y1 = (self.height as i64 - y as i64).clamp(0, image.height() as i64) as u32;

        for iy in y0..y1 {
            for ix in x0..x1 {
                let color = image.pixel(ix, iy);
                self.put((x + ix as i32) as u32, (y + iy as i32) as u32, color);
            }
        }
    }
}
