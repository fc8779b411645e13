//! Test doubles shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt;

use rpi_console::console::{ConsoleError, LineHandler, Terminal};
use rpi_console::hal::Delay;
use rpi_console::viewer::{FrameViewer, Image};

/// Terminal fed from a script, recording everything written.
pub struct ScriptedTerminal {
    input: VecDeque<u8>,
    pub output: String,
    /// `poll_byte` calls answered with `None` before the script continues
    pub idle_polls: usize,
    polls: usize,
}

impl ScriptedTerminal {
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            output: String::new(),
            idle_polls: 0,
            polls: 0,
        }
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl fmt::Write for ScriptedTerminal {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.push_str(s);
        Ok(())
    }
}

impl Terminal for ScriptedTerminal {
    fn read_byte(&mut self) -> u8 {
        self.input.pop_front().expect("script ran out of input")
    }

    fn poll_byte(&mut self) -> Option<u8> {
        if self.polls < self.idle_polls {
            self.polls += 1;
            return None;
        }
        self.input.pop_front()
    }
}

/// Line handler that only records what it was given.
#[derive(Default)]
pub struct RecordingHandler {
    pub lines: Vec<String>,
}

impl LineHandler for RecordingHandler {
    fn handle_line(&mut self, line: &str, _term: &mut dyn Terminal) -> Result<(), ConsoleError> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

/// What a [`RecordingViewer`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    Clear(u32),
    Image { width: u32, height: u32, x: i32, y: i32 },
}

#[derive(Default)]
pub struct RecordingViewer {
    pub calls: Vec<Draw>,
}

impl RecordingViewer {
    pub fn images(&self) -> Vec<(i32, i32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Draw::Image { x, y, .. } => Some((*x, *y)),
                Draw::Clear(_) => None,
            })
            .collect()
    }
}

impl FrameViewer for RecordingViewer {
    fn clear(&mut self, color: u32) {
        self.calls.push(Draw::Clear(color));
    }

    fn draw_image(&mut self, image: &dyn Image, x: i32, y: i32) {
        self.calls.push(Draw::Image {
            width: image.width(),
            height: image.height(),
            x,
            y,
        });
    }
}

/// Clock that advances only when asked to wait.
#[derive(Default)]
pub struct FakeDelay {
    pub now: u64,
    pub waits: Vec<u64>,
}

impl Delay for FakeDelay {
    fn now_us(&self) -> u64 {
        self.now
    }

    fn delay_us(&mut self, us: u64) {
        self.waits.push(us);
        self.now += us;
    }
}
