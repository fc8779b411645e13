//! Command line parser
//!
//! Decides what a submitted line means. Zero-argument commands match the
//! whole line exactly, `help <name>` matches literally, and anything
//! starting with `setcolor` is parsed for its flags.

use super::commands::{find_command, CommandDescriptor};

/// A parsed command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `help` alone lists everything, `help <name>` shows one entry
    Help(Option<&'static CommandDescriptor>),
    Clear,
    SetColor {
        text: Option<&'a str>,
        background: Option<&'a str>,
    },
    ShowInfo,
    Printf,
    ExpandScreen,
    GetMacAddress,
    GetUartFreq,
    GetArmFreq,
    ShowImage,
    ShowLargeImage,
    ShowVideo,
    Logs,
    Unknown,
}

impl<'a> Command<'a> {
    /// Parse a complete line (no trailing newline).
    pub fn parse(line: &'a str) -> Self {
        match line {
            "help" => return Command::Help(None),
            "clear" => return Command::Clear,
            "showinfo" => return Command::ShowInfo,
            "printf" => return Command::Printf,
            "expandscreen" => return Command::ExpandScreen,
            "getmacaddress" => return Command::GetMacAddress,
            "getuartfreq" => return Command::GetUartFreq,
            "getarmfreq" => return Command::GetArmFreq,
            "showimage" => return Command::ShowImage,
            "showlargeimage" => return Command::ShowLargeImage,
            "showvideo" => return Command::ShowVideo,
            "logs" => return Command::Logs,
            _ => {}
        }

        if let Some(name) = line.strip_prefix("help ") {
            if let Some(cmd) = find_command(name) {
                return Command::Help(Some(cmd));
            }
        }

        if line.starts_with("setcolor") {
            return parse_setcolor(line);
        }

        Command::Unknown
    }
}

/// Pick the `-t` / `-b` values out of a `setcolor` line.
///
/// A flag always consumes the following token, the last occurrence wins.
/// Anything else is skipped.
fn parse_setcolor(line: &str) -> Command<'_> {
    let mut tokens = line.split(' ').filter(|t| !t.is_empty());
    let mut text = None;
    let mut background = None;

    while let Some(token) = tokens.next() {
        match token {
            "-t" => text = tokens.next(),
            "-b" => background = tokens.next(),
            _ => {}
        }
    }

    Command::SetColor { text, background }
}
