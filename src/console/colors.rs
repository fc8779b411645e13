//! Terminal colour palette

/// Colour names, index = ANSI colour number.
pub const COLOR_NAMES: [&str; 8] = [
    "BLACK", "RED", "GREEN", "YELLOW", "BLUE", "PURPLE", "CYAN", "WHITE",
];

const FOREGROUND: [&str; 8] = [
    "\x1b[30m", "\x1b[31m", "\x1b[32m", "\x1b[33m", "\x1b[34m", "\x1b[35m", "\x1b[36m", "\x1b[37m",
];

const BACKGROUND: [&str; 8] = [
    "\x1b[40m", "\x1b[41m", "\x1b[42m", "\x1b[43m", "\x1b[44m", "\x1b[45m", "\x1b[46m", "\x1b[47m",
];

/// Clear screen and home the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// One of the eight palette colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(u8);

impl Color {
    pub const BLACK: Color = Color(0);
    pub const RED: Color = Color(1);
    pub const GREEN: Color = Color(2);
    pub const YELLOW: Color = Color(3);
    pub const BLUE: Color = Color(4);
    pub const PURPLE: Color = Color(5);
    pub const CYAN: Color = Color(6);
    pub const WHITE: Color = Color(7);

    /// Look up a colour name, ignoring case.
    pub fn from_name(name: &str) -> Option<Color> {
        COLOR_NAMES
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .map(|i| Color(i as u8))
    }

    pub fn name(&self) -> &'static str {
        COLOR_NAMES[self.0 as usize]
    }

    /// Escape sequence selecting this colour for text.
    pub fn foreground(&self) -> &'static str {
        FOREGROUND[self.0 as usize]
    }

    /// Escape sequence selecting this colour for the background.
    pub fn background(&self) -> &'static str {
        BACKGROUND[self.0 as usize]
    }
}
