//! Framebuffer viewer interface and demo pictures.
//!
//! The dispatcher only sees [`FrameViewer`]; pixels come from anything that
//! implements [`Image`]. The demo pictures are computed per pixel so the
//! kernel image carries no asset data.

/// A picture, pixels as 0x00RRGGBB.
pub trait Image {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel(&self, x: u32, y: u32) -> u32;
}

/// Something that can show pictures.
pub trait FrameViewer {
    /// Fill the whole screen.
    fn clear(&mut self, color: u32);
    /// Draw `image` with its top-left corner at (x, y); off-screen parts are
    /// clipped.
    fn draw_image(&mut self, image: &dyn Image, x: i32, y: i32);
}

/// Viewer for boards without a display.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullViewer;

impl FrameViewer for NullViewer {
    fn clear(&mut self, _color: u32) {}
    fn draw_image(&mut self, _image: &dyn Image, _x: i32, _y: i32) {}
}

/// Number of frames in the demo clip.
pub const VIDEO_FRAMES: usize = 8;

/// Still picture for `showimage`.
pub const DEMO_IMAGE: Gradient = Gradient {
    width: 480,
    height: 270,
};

/// Picture larger than the screen for `showlargeimage`.
pub const LARGE_IMAGE: Checkerboard = Checkerboard {
    width: 1920,
    height: 1080,
    cell: 60,
};

/// Horizontal red ramp over a vertical green ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub width: u32,
    pub height: u32,
}

impl Image for Gradient {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        let r = x * 255 / self.width.max(1);
        let g = y * 255 / self.height.max(1);
        (r << 16) | (g << 8) | 0x80
    }
}

/// Two-tone checkerboard with a colour shift across the picture, so that
/// scrolling is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkerboard {
    pub width: u32,
    pub height: u32,
    pub cell: u32,
}

impl Image for Checkerboard {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        let cell = self.cell.max(1);
        let shade = (x + y) * 255 / (self.width + self.height).max(1);
        if ((x / cell) + (y / cell)) % 2 == 0 {
            0x00FF_FFFF - (shade << 8)
        } else {
            shade
        }
    }
}

/// One frame of the demo clip: diamond rings moving outwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFrame {
    pub index: usize,
}

impl VideoFrame {
    pub const WIDTH: u32 = 453;
    pub const HEIGHT: u32 = 421;

    pub fn new(index: usize) -> Self {
        Self {
            index: index % VIDEO_FRAMES,
        }
    }
}

impl Image for VideoFrame {
    fn width(&self) -> u32 {
        Self::WIDTH
    }

    fn height(&self) -> u32 {
        Self::HEIGHT
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        let dx = (x as i32 - (Self::WIDTH / 2) as i32).unsigned_abs();
        let dy = (y as i32 - (Self::HEIGHT / 2) as i32).unsigned_abs();
        let ring = (dx + dy + (VIDEO_FRAMES - self.index) as u32 * 4) / 16;
        match ring % 3 {
            0 => 0x00E0_4020,
            1 => 0x0020_A0E0,
            _ => 0x0010_1010,
        }
    }
}
