//! Main console struct integrating all components

use super::{command_names, complete, ConsoleError, History, LineBuffer, LineHandler, Terminal};
use crate::config::{ConsoleConfig, LINE_SIZE, VERSION};

/// Terminal bell, sent when a byte does not fit.
const BEL: &str = "\x07";

/// Console state machine
///
/// Collects one line at a time. Execution happens synchronously inside
/// [`Console::process_byte`] when a newline arrives.
pub struct Console {
    config: ConsoleConfig,
    line: LineBuffer,
    history: History,
    /// Escape sequence state
    escape_state: EscapeState,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum EscapeState {
    Normal,
    Escape,  // Got ESC
    Bracket, // Got ESC [
}

impl Console {
    /// Create new console
    pub const fn new(config: ConsoleConfig) -> Self {
        Self {
            config,
            line: LineBuffer::new(),
            history: History::new(),
            escape_state: EscapeState::Normal,
        }
    }

    /// Process a single input byte
    ///
    /// Returns the handler's result when a line was submitted, and
    /// `LineTooLong` when a byte was rejected. Both are recoverable.
    pub fn process_byte(
        &mut self,
        byte: u8,
        handler: &mut dyn LineHandler,
        term: &mut dyn Terminal,
    ) -> Result<(), ConsoleError> {
        match self.escape_state {
            EscapeState::Normal => self.process_normal(byte, handler, term),
            EscapeState::Escape => {
                if byte == b'[' {
                    self.escape_state = EscapeState::Bracket;
                    return Ok(());
                }
                // Not a sequence: the byte is ordinary input
                self.escape_state = EscapeState::Normal;
                self.process_normal(byte, handler, term)
            }
            EscapeState::Bracket => match byte {
                // Parameter and intermediate bytes, e.g. the "1;5" of ESC [ 1 ; 5 A
                0x20..=0x3F => Ok(()),
                // Final byte
                0x40..=0x7E => {
                    self.escape_state = EscapeState::Normal;
                    match byte {
                        b'A' => self.history_previous(term), // Up arrow
                        b'B' => self.history_next(term),     // Down arrow
                        _ => {}
                    }
                    Ok(())
                }
                // Broken sequence, e.g. a newline
                _ => {
                    self.escape_state = EscapeState::Normal;
                    self.process_normal(byte, handler, term)
                }
            },
        }
    }

    fn process_normal(
        &mut self,
        byte: u8,
        handler: &mut dyn LineHandler,
        term: &mut dyn Terminal,
    ) -> Result<(), ConsoleError> {
        match byte {
            b'\n' => return self.submit(handler, term),

            b'\t' => self.handle_tab(term),

            b if b == self.config.history_previous => self.history_previous(term),

            b if b == self.config.history_next => self.history_next(term),

            // Backspace / delete
            0x08 | 0x7F => {
                if self.line.backspace().is_some() {
                    self.redraw(term);
                } else {
                    let _ = write!(term, "\r{}", self.config.prompt);
                }
            }

            0x1B => self.escape_state = EscapeState::Escape,

            // Printable character
            0x20..=0x7E => {
                if let Err(e) = self.line.push(byte) {
                    let _ = term.write_str(BEL);
                    return Err(e);
                }
                let _ = term.write_char(byte as char);
            }

            _ => {}
        }
        Ok(())
    }

    fn submit(
        &mut self,
        handler: &mut dyn LineHandler,
        term: &mut dyn Terminal,
    ) -> Result<(), ConsoleError> {
        let _ = term.write_str("\n");

        let result = if self.line.is_empty() {
            Ok(())
        } else {
            let line = self.line.as_str();
            self.history.push(line);
            handler.handle_line(line, term)
        };

        self.history.reset_browse();
        self.line.clear();
        self.print_prompt(term);
        result
    }

    /// Replace the line with the first command it is a prefix of.
    fn handle_tab(&mut self, term: &mut dyn Terminal) {
        if let Some(name) = complete(self.line.as_str(), command_names()) {
            self.line.set(name);
            self.redraw(term);
        }
    }

    fn history_previous(&mut self, term: &mut dyn Terminal) {
        let text = self.history.previous(self.line.as_str());
        self.line.set(text);
        self.redraw(term);
    }

    fn history_next(&mut self, term: &mut dyn Terminal) {
        let text = self.history.next();
        self.line.set(text);
        self.redraw(term);
    }

    /// Blank the terminal line, then reprint prompt and buffer.
    fn redraw(&self, term: &mut dyn Terminal) {
        let _ = write!(term, "\r{}", self.config.prompt);
        for _ in 0..LINE_SIZE {
            let _ = term.write_char(' ');
        }
        let _ = write!(term, "\r{}{}", self.config.prompt, self.line.as_str());
    }

    /// Print the prompt
    pub fn print_prompt(&self, term: &mut dyn Terminal) {
        let _ = term.write_str(self.config.prompt);
    }

    /// Print welcome banner
    pub fn print_banner(&self, term: &mut dyn Terminal) {
        let _ = writeln!(term, "\n{}", VERSION);
        let _ = writeln!(term, "Type 'help' for commands.\n");
        self.print_prompt(term);
    }

    /// Read and process bytes forever.
    pub fn run(&mut self, handler: &mut dyn LineHandler, term: &mut dyn Terminal) -> ! {
        loop {
            let byte = term.read_byte();
            if let Err(e) = self.process_byte(byte, handler, term) {
                log::debug!("console: {}", e);
            }
        }
    }

    /// Line being edited
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleConfig::new())
    }
}
