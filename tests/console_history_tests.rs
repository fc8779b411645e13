//! History buffer tests

use rpi_console::console::history::{History, HISTORY_SIZE};

#[test]
fn test_history_empty() {
    let mut history = History::new();
    assert!(history.is_live());
    assert_eq!(history.previous(""), "");
    assert_eq!(history.next(), "");
}

#[test]
fn test_previous_walks_back_then_next_forward() {
    let mut history = History::new();

    history.push("a");
    history.push("b");
    history.push("c");

    assert_eq!(history.previous(""), "c");
    assert_eq!(history.previous(""), "b");
    assert_eq!(history.previous(""), "a");

    assert_eq!(history.next(), "b");
}

#[test]
fn test_live_line_restored_after_browsing() {
    let mut history = History::new();

    history.push("help");
    assert_eq!(history.previous("show"), "help");
    assert!(!history.is_live());

    // Back on the write slot: the stashed line
    assert_eq!(history.next(), "show");
    assert!(history.is_live());
}

#[test]
fn test_stash_only_taken_at_live_position() {
    let mut history = History::new();

    history.push("one");
    history.push("two");
    assert_eq!(history.previous("draft"), "two");
    // Not live any more, this text is not stored
    assert_eq!(history.previous("ignored"), "one");
    assert_eq!(history.next(), "two");
    assert_eq!(history.next(), "draft");
}

#[test]
fn test_write_cursor_wraps_and_overwrites_oldest() {
    let mut history = History::new();

    for i in 0..HISTORY_SIZE + 2 {
        history.push(&format!("cmd{}", i));
    }
    assert_eq!(history.write_cursor(), 2);
    // Oldest two slots were overwritten
    assert_eq!(history.entry(0), format!("cmd{}", HISTORY_SIZE));
    assert_eq!(history.entry(1), format!("cmd{}", HISTORY_SIZE + 1));
    assert_eq!(history.entry(2), "cmd2");

    assert_eq!(history.previous(""), format!("cmd{}", HISTORY_SIZE + 1));
}

#[test]
fn test_browse_is_circular() {
    let mut history = History::new();
    history.push("only");

    // One real entry, then empty slots going further back
    assert_eq!(history.previous("live"), "only");
    assert_eq!(history.previous(""), "");
    assert_eq!(history.browse_cursor(), HISTORY_SIZE - 1);

    for _ in 0..HISTORY_SIZE - 3 {
        history.previous("");
    }
    // Full circle lands on the stash
    assert_eq!(history.previous(""), "live");
    assert!(history.is_live());
}

#[test]
fn test_push_resets_browse() {
    let mut history = History::new();

    history.push("cmd1");
    history.push("cmd2");
    history.previous("");

    history.push("cmd3");
    assert!(history.is_live());
    assert_eq!(history.previous(""), "cmd3");
}
