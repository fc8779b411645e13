//! Tab completion tests

use rpi_console::console::command_names;
use rpi_console::console::completion::complete;

static TEST_COMMANDS: &[&str] = &["help", "set", "show", "save", "stats", "status"];

#[test]
fn test_complete_first_match_in_order() {
    assert_eq!(complete("s", TEST_COMMANDS.iter().copied()), Some("set"));
    assert_eq!(complete("st", TEST_COMMANDS.iter().copied()), Some("stats"));
}

#[test]
fn test_complete_repeat_is_stable() {
    // No cycling: the same prefix always yields the same entry
    for _ in 0..3 {
        assert_eq!(complete("sh", TEST_COMMANDS.iter().copied()), Some("show"));
    }
}

#[test]
fn test_complete_no_match() {
    assert_eq!(complete("xyz", TEST_COMMANDS.iter().copied()), None);
}

#[test]
fn test_complete_exact_match() {
    assert_eq!(complete("help", TEST_COMMANDS.iter().copied()), Some("help"));
}

#[test]
fn test_complete_set_against_command_table() {
    assert_eq!(complete("set", command_names()), Some("setcolor"));
}

#[test]
fn test_complete_table_order_decides() {
    // showinfo comes before showimage/showlargeimage/showvideo
    assert_eq!(complete("show", command_names()), Some("showinfo"));
    assert_eq!(complete("showv", command_names()), Some("showvideo"));
    assert_eq!(complete("get", command_names()), Some("getmacaddress"));
    assert_eq!(complete("", command_names()), Some("help"));
}
