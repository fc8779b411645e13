//! Command table and handlers

use super::colors::{Color, CLEAR_SCREEN};
use super::parser::Command;
use super::{ConsoleError, LineHandler, Terminal};
use crate::config::{EXPANDED_HEIGHT, EXPANDED_WIDTH};
use crate::fixed::FixedPoint;
use crate::hal::Delay;
use crate::logging::{self, LogStream};
use crate::mailbox::property::MacFormat;
use crate::mailbox::{Clock, PropertyChannel, PropertyQueries};
use crate::viewer::{FrameViewer, VideoFrame, DEMO_IMAGE, LARGE_IMAGE};

/// Command descriptor
#[derive(Debug, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    /// One-line summary for `help`
    pub brief: &'static str,
    /// Long description for `help <name>`
    pub detail: &'static str,
}

/// All available commands, in completion order
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "help",
        brief: "Show detail information of each command\nUsage: help [command_name]",
        detail: "This command is used to provide a detailed description of available commands. If you want to know more about a specific command, type 'help [command_name]'.",
    },
    CommandDescriptor {
        name: "clear",
        brief: "Clears the screen",
        detail: "Typing 'clear' will remove all the content from your current view, giving you a clean screen to work with.",
    },
    CommandDescriptor {
        name: "setcolor",
        brief: "Sets text and/or background color\nUsage: setcolor -t [color] -b [background_color]",
        detail: "Use this command to customize your text and background colors. To change the text color, use the '-t' flag followed by your desired color. For changing the background, use the '-b' flag followed by your choice of color. For instance, 'setcolor -t red -b blue' will give you red text on a blue background.",
    },
    CommandDescriptor {
        name: "showinfo",
        brief: "Displays board information",
        detail: "Execute this command to view important board details. It will display the board revision, the board model when it is known, and the MAC address.",
    },
    CommandDescriptor {
        name: "printf",
        brief: "Test the formatted output",
        detail: "This command prints one line for each kind of formatted value: string, character, percent sign, decimal, float and hexadecimal.",
    },
    CommandDescriptor {
        name: "expandscreen",
        brief: "Expand the display screen",
        detail: "If the display screen is too small, 'expandscreen' asks the firmware for a 1024x768 screen and prints the size it actually got.",
    },
    CommandDescriptor {
        name: "getmacaddress",
        brief: "Display the MAC Address",
        detail: "To know the MAC address of your board, simply type 'getmacaddress'. It will fetch and display the MAC address in three groupings.",
    },
    CommandDescriptor {
        name: "getuartfreq",
        brief: "Display the UART Frequency",
        detail: "By entering 'getuartfreq', you can determine the clock frequency at which the UART is operating.",
    },
    CommandDescriptor {
        name: "getarmfreq",
        brief: "Display the ARM Frequency",
        detail: "If you're interested in the operational frequency of the ARM processor, use 'getarmfreq'. It will show the rate at which the ARM CPU is running.",
    },
    CommandDescriptor {
        name: "showimage",
        brief: "Draw the demo picture",
        detail: "Draws the demo picture in the top-left corner of the screen.",
    },
    CommandDescriptor {
        name: "showlargeimage",
        brief: "Draw a picture larger than the screen",
        detail: "Draws a picture larger than the screen. Use w, a, s and d to scroll it by 20 pixels, press Enter to leave scroll mode.",
    },
    CommandDescriptor {
        name: "showvideo",
        brief: "Play the demo clip",
        detail: "Plays the demo clip in a loop until Enter is pressed.",
    },
    CommandDescriptor {
        name: "logs",
        brief: "Show recent log messages",
        detail: "Prints the log messages recorded since the last 'logs' and empties the log buffer.",
    },
];

/// Find a command by exact name
pub fn find_command(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Get all command names for completion
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

/// Scroll step of `showlargeimage`, in pixels.
pub const SCROLL_STEP: i32 = 20;

/// Frame period of `showvideo`.
pub const FRAME_DELAY_MS: u64 = 60;

/// Runs parsed commands against the board.
pub struct Dispatcher<'a> {
    props: &'a mut dyn PropertyChannel,
    viewer: &'a mut dyn FrameViewer,
    delay: &'a mut dyn Delay,
    logs: &'a LogStream,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        props: &'a mut dyn PropertyChannel,
        viewer: &'a mut dyn FrameViewer,
        delay: &'a mut dyn Delay,
        logs: &'a LogStream,
    ) -> Self {
        Self {
            props,
            viewer,
            delay,
            logs,
        }
    }

    /// Run one command.
    pub fn execute(&mut self, cmd: Command<'_>, term: &mut dyn Terminal) -> Result<(), ConsoleError> {
        match cmd {
            Command::Help(None) => cmd_help(term),
            Command::Help(Some(c)) => {
                let _ = writeln!(term, "{}: {}", c.name, c.detail);
                Ok(())
            }
            Command::Clear => {
                let _ = term.write_str(CLEAR_SCREEN);
                Ok(())
            }
            Command::SetColor { text, background } => {
                set_color(text, background, term);
                Ok(())
            }
            Command::ShowInfo => {
                let board = self.show_board_revision(term);
                let mac = self.show_mac_address(term);
                board.and(mac)
            }
            Command::Printf => {
                cmd_printf(term);
                Ok(())
            }
            Command::ExpandScreen => self.expand_screen(term),
            Command::GetMacAddress => self.show_mac_address(term),
            Command::GetUartFreq => self.show_clock(Clock::Uart, term),
            Command::GetArmFreq => self.show_clock(Clock::Arm, term),
            Command::ShowImage => {
                self.viewer.draw_image(&DEMO_IMAGE, 0, 0);
                Ok(())
            }
            Command::ShowLargeImage => {
                self.scroll_large_image(term);
                Ok(())
            }
            Command::ShowVideo => {
                self.play_video(term);
                Ok(())
            }
            Command::Logs => {
                logging::drain_to(self.logs, term);
                Ok(())
            }
            Command::Unknown => {
                let _ = writeln!(term, "Unrecognized command!");
                Err(ConsoleError::UnknownCommand)
            }
        }
    }

    fn show_board_revision(&mut self, term: &mut dyn Terminal) -> Result<(), ConsoleError> {
        match self.props.board_revision() {
            Ok(rev) => {
                let _ = writeln!(term, "Board Revision: {}", rev.0);
                let _ = writeln!(term, "Board Revision(in Hexa): 0x{:08X}", rev.0);
                if let Some(model) = rev.model() {
                    let _ = write!(term, "Board model: {}", model);
                }
                let _ = write!(term, "\n\n");
                Ok(())
            }
            Err(e) => {
                let _ = writeln!(term, "Failed to get board revision.");
                Err(e.into())
            }
        }
    }

    fn show_mac_address(&mut self, term: &mut dyn Terminal) -> Result<(), ConsoleError> {
        match self.props.mac_address() {
            Ok(mac) => {
                let _ = writeln!(term, "MAC Address: {}", mac.display(MacFormat::LowWord));
                let _ = writeln!(term, "MAC Address: {}", mac.display(MacFormat::HighWord));
                let _ = write!(term, "MAC Address: {}\n\n", mac.display(MacFormat::Colon));
                Ok(())
            }
            Err(e) => {
                let _ = writeln!(term, "Failed to get MAC address.");
                Err(e.into())
            }
        }
    }

    fn show_clock(&mut self, clock: Clock, term: &mut dyn Terminal) -> Result<(), ConsoleError> {
        let (label, failure) = match clock {
            Clock::Arm => ("ARM Frequency", "Failed to get ARM frequency."),
            _ => ("UART Clock Rate", "Failed to get UART clock rate."),
        };

        match self.props.clock_rate(clock) {
            Ok(rate) => {
                let _ = write!(term, "{}: {} Hz\n\n", label, rate.hz);
                Ok(())
            }
            Err(e) => {
                let _ = writeln!(term, "{}", failure);
                Err(e.into())
            }
        }
    }

    fn expand_screen(&mut self, term: &mut dyn Terminal) -> Result<(), ConsoleError> {
        match self.props.set_physical_size(EXPANDED_WIDTH, EXPANDED_HEIGHT) {
            Ok((w, h)) => {
                let _ = write!(
                    term,
                    "\nGot Actual Physical Width: {}\nGot Actual Physical Height: {}\n",
                    w, h
                );
                Ok(())
            }
            Err(e) => {
                let _ = writeln!(term, "Failed to resize the screen.");
                Err(e.into())
            }
        }
    }

    /// WASD scrolling until Enter.
    fn scroll_large_image(&mut self, term: &mut dyn Terminal) {
        let _ = term.write_str("Use WASD to scroll. Press Enter to quit scroll mode ");
        let (mut x, mut y) = (0i32, 0i32);
        self.viewer.draw_image(&LARGE_IMAGE, x, y);

        loop {
            match term.read_byte() {
                b'w' => y -= SCROLL_STEP,
                b's' => y += SCROLL_STEP,
                b'd' => x += SCROLL_STEP,
                b'a' => x -= SCROLL_STEP,
                b'\n' => {
                    let _ = term.write_str("\n");
                    return;
                }
                _ => continue,
            }
            self.viewer.clear(0);
            self.viewer.draw_image(&LARGE_IMAGE, x, y);
        }
    }

    /// Cycle the clip until Enter.
    fn play_video(&mut self, term: &mut dyn Terminal) {
        let _ = term.write_str("Playing video \nPress Enter to stop ");
        let mut frame = 0usize;

        while term.poll_byte() != Some(b'\n') {
            self.viewer.draw_image(&VideoFrame::new(frame), 0, 0);
            self.delay.delay_ms(FRAME_DELAY_MS);
            frame = frame.wrapping_add(1);
        }

        let _ = term.write_str("\nVideo stopped\n");
    }
}

impl LineHandler for Dispatcher<'_> {
    fn handle_line(&mut self, line: &str, term: &mut dyn Terminal) -> Result<(), ConsoleError> {
        let cmd = Command::parse(line);
        log::debug!("dispatch {:?}", cmd);
        self.execute(cmd, term)
    }
}

// --- Command Implementations ---

fn cmd_help(out: &mut dyn Terminal) -> Result<(), ConsoleError> {
    let _ = writeln!(out, "*Supported commands:");
    for (i, name) in command_names().enumerate() {
        if i > 0 {
            let _ = out.write_str(", ");
        }
        let _ = out.write_str(name);
    }
    let _ = write!(out, "\n\n*General description:\n");
    for c in COMMANDS.iter().skip(1) {
        let _ = writeln!(out, "{} - {}", c.name, c.brief);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "*{}", COMMANDS[0].brief);
    let _ = writeln!(out);
    Ok(())
}

/// Foreground first, then background; unknown names emit nothing.
fn set_color(text: Option<&str>, background: Option<&str>, out: &mut dyn Terminal) {
    if let Some(color) = text.and_then(Color::from_name) {
        let _ = out.write_str(color.foreground());
    }
    if let Some(color) = background.and_then(Color::from_name) {
        let _ = out.write_str(color.background());
    }
}

fn cmd_printf(out: &mut dyn Terminal) {
    let _ = writeln!(out, "String: {}", "Hello");
    let _ = writeln!(out, "Character: {}", 'Z');
    let _ = writeln!(out, "Percentage sign: %");
    let _ = writeln!(out, "Decimal/integer number: {}", 212);
    let _ = writeln!(out, "This is a Float number: {} ", FixedPoint(0.21));
    let _ = writeln!(out, "Hexadecimal: {:X}", 195);
}
