//! Line editor tests: bytes in, dispatches and echo out

mod common;

use common::{FakeDelay, RecordingHandler, RecordingViewer, ScriptedTerminal};
use rpi_console::config::{ConsoleConfig, LINE_SIZE};
use rpi_console::console::{Console, ConsoleError, Dispatcher, LineHandler};
use rpi_console::logging::LogStream;
use rpi_console::mailbox::{Bounded, Mailbox, MailboxBuffer, SimulatedFirmware};

const PROMPT: &str = "rpi> ";

/// Feed every byte, collecting the per-byte results.
fn feed(
    console: &mut Console,
    bytes: &[u8],
    handler: &mut dyn LineHandler,
    term: &mut ScriptedTerminal,
) -> Vec<Result<(), ConsoleError>> {
    let mut results = Vec::new();
    for b in bytes {
        results.push(console.process_byte(*b, handler, term));
    }
    results
}

fn redraw(line: &str) -> String {
    format!("\r{}{}\r{}{}", PROMPT, " ".repeat(LINE_SIZE), PROMPT, line)
}

#[test]
fn test_submit_dispatches_exact_line_once() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"getarmfreq\n", &mut handler, &mut term);

    assert_eq!(handler.lines, vec!["getarmfreq"]);
    assert!(console.line().is_empty());
    assert_eq!(term.output, format!("getarmfreq\n{}", PROMPT));
}

#[test]
fn test_editing_bytes_are_not_dispatched() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"helx\x7fp\x01\n", &mut handler, &mut term);

    assert_eq!(handler.lines, vec!["help"]);
    assert!(console.line().is_empty());
}

#[test]
fn test_empty_line_reprints_prompt_without_dispatch() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    let results = feed(&mut console, b"\n", &mut handler, &mut term);

    assert_eq!(results, vec![Ok(())]);
    assert!(handler.lines.is_empty());
    assert_eq!(term.output, format!("\n{}", PROMPT));
    assert_eq!(console.history().write_cursor(), 0);
}

#[test]
fn test_backspace_redraws_line() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"ab", &mut handler, &mut term);
    term.take_output();

    feed(&mut console, b"\x08", &mut handler, &mut term);
    assert_eq!(term.take_output(), redraw("a"));
    assert_eq!(console.line().as_str(), "a");
}

#[test]
fn test_backspace_on_empty_line_reprints_prompt() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    let results = feed(&mut console, b"\x7f", &mut handler, &mut term);

    assert_eq!(results, vec![Ok(())]);
    assert_eq!(term.output, format!("\r{}", PROMPT));
}

#[test]
fn test_tab_completes_set_to_setcolor() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"set", &mut handler, &mut term);
    term.take_output();
    feed(&mut console, b"\t", &mut handler, &mut term);

    assert_eq!(console.line().as_str(), "setcolor");
    assert_eq!(term.output, redraw("setcolor"));
}

#[test]
fn test_tab_without_match_is_noop() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"zz", &mut handler, &mut term);
    term.take_output();
    feed(&mut console, b"\t", &mut handler, &mut term);

    assert_eq!(console.line().as_str(), "zz");
    assert_eq!(term.output, "");
}

#[test]
fn test_history_markers_navigate() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"a\nb\nc\n", &mut handler, &mut term);

    feed(&mut console, b"_", &mut handler, &mut term);
    assert_eq!(console.line().as_str(), "c");
    feed(&mut console, b"_", &mut handler, &mut term);
    assert_eq!(console.line().as_str(), "b");
    feed(&mut console, b"_", &mut handler, &mut term);
    assert_eq!(console.line().as_str(), "a");
    term.take_output();

    feed(&mut console, b"+", &mut handler, &mut term);
    assert_eq!(console.line().as_str(), "b");
    assert_eq!(term.output, redraw("b"));
}

#[test]
fn test_ansi_arrows_navigate() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"clear\nhelp\n", &mut handler, &mut term);
    feed(&mut console, b"\x1b[A\x1b[A", &mut handler, &mut term);
    assert_eq!(console.line().as_str(), "clear");

    feed(&mut console, b"\x1b[B", &mut handler, &mut term);
    assert_eq!(console.line().as_str(), "help");

    // Unknown sequences are swallowed, parameters included
    feed(&mut console, b"\x1b[C\x1b[1;5D", &mut handler, &mut term);
    assert_eq!(console.line().as_str(), "help");
}

#[test]
fn test_stray_escape_keeps_next_byte() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"\x1bhelp\n", &mut handler, &mut term);

    assert_eq!(handler.lines, vec!["help"]);
}

#[test]
fn test_modified_arrow_does_not_leak_parameters() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"clear\n", &mut handler, &mut term);
    feed(&mut console, b"\x1b[1;5A", &mut handler, &mut term);
    assert_eq!(console.line().as_str(), "clear");

    feed(&mut console, b"\n", &mut handler, &mut term);
    assert_eq!(handler.lines, vec!["clear", "clear"]);
}

#[test]
fn test_newline_ends_broken_sequence() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"help\x1b[\n", &mut handler, &mut term);

    assert_eq!(handler.lines, vec!["help"]);
    assert!(console.line().is_empty());
}

#[test]
fn test_browsing_restores_live_line() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"showinfo\nget", &mut handler, &mut term);
    feed(&mut console, b"_", &mut handler, &mut term);
    assert_eq!(console.line().as_str(), "showinfo");
    feed(&mut console, b"+", &mut handler, &mut term);
    assert_eq!(console.line().as_str(), "get");
}

#[test]
fn test_recalled_line_can_be_resubmitted() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"printf\n_\n", &mut handler, &mut term);

    assert_eq!(handler.lines, vec!["printf", "printf"]);
    assert_eq!(console.history().write_cursor(), 2);
    assert!(console.history().is_live());
}

#[test]
fn test_custom_history_markers() {
    let config = ConsoleConfig {
        prompt: "> ",
        history_previous: b'[',
        history_next: b']',
    };
    let mut console = Console::new(config);
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    feed(&mut console, b"clear\n_[", &mut handler, &mut term);
    assert_eq!(console.line().as_str(), "clear");
    assert!(term.output.ends_with("\r> clear"));
}

#[test]
fn test_overflow_rings_bell_and_recovers() {
    let mut console = Console::default();
    let mut handler = RecordingHandler::default();
    let mut term = ScriptedTerminal::new(b"");

    let long = vec![b'x'; LINE_SIZE];
    let results = feed(&mut console, &long, &mut handler, &mut term);
    assert!(results.iter().all(|r| r.is_ok()));
    term.take_output();

    let results = feed(&mut console, b"y", &mut handler, &mut term);
    assert_eq!(results, vec![Err(ConsoleError::LineTooLong)]);
    assert_eq!(term.take_output(), "\x07");
    assert_eq!(console.line().len(), LINE_SIZE);

    feed(&mut console, b"\n", &mut handler, &mut term);
    assert_eq!(handler.lines, vec!["x".repeat(LINE_SIZE)]);
}

#[test]
fn test_unknown_command_appends_one_history_entry() {
    let buffer = MailboxBuffer::new();
    let mut mailbox = Mailbox::new(SimulatedFirmware::new(&buffer), Bounded::new(100), &buffer);
    let mut viewer = RecordingViewer::default();
    let mut delay = FakeDelay::default();
    let logs: LogStream = LogStream::new();
    let mut dispatcher = Dispatcher::new(&mut mailbox, &mut viewer, &mut delay, &logs);

    let mut console = Console::default();
    let mut term = ScriptedTerminal::new(b"");

    let results = feed(&mut console, b"frobnicate\n", &mut dispatcher, &mut term);

    assert_eq!(results.last(), Some(&Err(ConsoleError::UnknownCommand)));
    assert_eq!(
        term.output,
        format!("frobnicate\nUnrecognized command!\n{}", PROMPT)
    );
    assert_eq!(console.history().write_cursor(), 1);
    assert_eq!(console.history().entry(0), "frobnicate");
}

#[test]
fn test_banner_ends_with_prompt() {
    let console = Console::default();
    let mut term = ScriptedTerminal::new(b"");

    console.print_banner(&mut term);

    assert!(term.output.contains(rpi_console::VERSION));
    assert!(term.output.ends_with(PROMPT));
}
