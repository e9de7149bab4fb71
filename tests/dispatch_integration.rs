//! End-to-end dispatch against recording capabilities
//!
//! Each test builds a dispatcher over fakes, sends free text through
//! `process_command` and checks both the returned envelope and the
//! capability calls that were made.

mod common;

use common::{
    CallLog, FakeProcesses, MemoryClipboard, PanickingInput, RecordingBrowser, RecordingPower,
};
use jarvis::capability::Capabilities;
use jarvis::command::{Dispatcher, Intent};
use jarvis::core::config::JarvisConfig;
use serde_json::json;

fn dispatcher(caps: Capabilities) -> Dispatcher {
    Dispatcher::new(caps, JarvisConfig::default()).unwrap()
}

// ============================================================================
// Process termination
// ============================================================================

#[test]
fn test_kill_numeric_target_terminates_pid() {
    let log = CallLog::default();
    let mut d = dispatcher(Capabilities::unsupported().with_processes(FakeProcesses::new(log.clone())));

    let result = d.process_command("kill 4821");

    assert!(result.success);
    assert_eq!(result.action(), Some("kill"));
    assert_eq!(result.message, "Killed process 4821");
    assert_eq!(result.data, Some(json!({ "pid": 4821 })));
    assert_eq!(log.entries(), vec!["terminate_pid 4821"]);
}

#[test]
fn test_kill_name_target_closes_by_name() {
    let log = CallLog::default();
    let mut d = dispatcher(Capabilities::unsupported().with_processes(FakeProcesses::new(log.clone())));

    let result = d.process_command("Kill Chrome");

    assert!(result.success);
    assert_eq!(result.action(), Some("close"));
    assert_eq!(result.message, "Closed chrome.exe, chrome.exe");
    assert_eq!(log.entries(), vec!["terminate_by_name chrome"]);
}

#[test]
fn test_close_without_match_is_business_failure() {
    let log = CallLog::default();
    let mut d = dispatcher(Capabilities::unsupported().with_processes(FakeProcesses::new(log)));

    let result = d.process_command("close spotify");

    assert!(!result.success);
    assert_eq!(result.action(), Some("close"));
    assert_eq!(result.message, "No process matching 'spotify' found");
}

#[test]
fn test_terminate_missing_pid() {
    let log = CallLog::default();
    let mut d = dispatcher(Capabilities::unsupported().with_processes(FakeProcesses::new(log)));

    let result = d.process_command("terminate 9999");

    assert!(!result.success);
    assert_eq!(result.action(), Some("kill"));
    assert_eq!(result.message, "No process with PID 9999");
}

#[test]
fn test_terminate_unknown_name_uses_kill_tag() {
    let log = CallLog::default();
    let mut d = dispatcher(Capabilities::unsupported().with_processes(FakeProcesses::new(log)));

    let result = d.process_command("terminate vlc");

    assert!(!result.success);
    assert_eq!(result.action(), Some("kill"));
    assert_eq!(result.message, "Process not found");
}

// ============================================================================
// Windows
// ============================================================================

#[test]
fn test_snap_wins_over_window_state() {
    let mut d = dispatcher(Capabilities::unsupported());

    assert_eq!(d.classify("snap maximize window left"), Intent::Snap);
    assert_eq!(d.classify("Restore window then SNAP it right"), Intent::Snap);
    assert_eq!(d.classify("restore window"), Intent::WindowState);

    // Unsupported windows report the capability, not the window-state tag
    let result = d.process_command("snap maximize window left");
    assert!(!result.success);
    assert_eq!(result.action(), Some("error"));
    assert!(result.message.contains("WindowManager"));
}

// ============================================================================
// Power
// ============================================================================

#[test]
fn test_abort_wins_over_shutdown() {
    let log = CallLog::default();
    let mut d = dispatcher(Capabilities::unsupported().with_power(RecordingPower { log: log.clone() }));

    let result = d.process_command("abort shutdown");

    assert!(result.success);
    assert_eq!(result.action(), Some("power"));
    assert_eq!(result.message, "Shutdown aborted");
    assert_eq!(log.entries(), vec!["abort"]);
}

#[test]
fn test_restart_is_scheduled_with_configured_delay() {
    let log = CallLog::default();
    let mut config = JarvisConfig::default();
    config.power.shutdown_delay_secs = 30;
    let caps = Capabilities::unsupported().with_power(RecordingPower { log: log.clone() });
    let mut d = Dispatcher::new(caps, config).unwrap();

    let result = d.process_command("restart the system");

    assert!(result.success);
    assert_eq!(result.message, "Restarting in 30 seconds...");
    assert_eq!(log.entries(), vec!["schedule Restart 30"]);
}

// ============================================================================
// Calculation and web
// ============================================================================

#[test]
fn test_arithmetic_question() {
    let mut d = dispatcher(Capabilities::unsupported());

    let result = d.process_command("What is 2+2");

    assert!(result.success);
    assert_eq!(result.action(), Some("calculate"));
    assert_eq!(result.message, "2+2 = 4");
    let data = result.data.unwrap();
    assert_eq!(data["result"], json!(4));
    assert_eq!(data["expression"], json!("2+2"));
}

#[test]
fn test_division_by_zero_is_invalid_expression() {
    let mut d = dispatcher(Capabilities::unsupported());

    let result = d.process_command("calculate 1/0");

    assert!(!result.success);
    assert_eq!(result.action(), Some("calculate"));
    assert!(result.message.starts_with("Invalid expression"));
}

#[test]
fn test_known_site_opens_url() {
    let log = CallLog::default();
    let mut d = dispatcher(Capabilities::unsupported().with_browser(RecordingBrowser { log: log.clone() }));

    let result = d.process_command("go to github");

    assert!(result.success);
    assert_eq!(result.action(), Some("website"));
    assert_eq!(log.entries(), vec!["https://github.com"]);
}

#[test]
fn test_unknown_site_falls_back_to_search() {
    let log = CallLog::default();
    let mut d = dispatcher(Capabilities::unsupported().with_browser(RecordingBrowser { log: log.clone() }));

    let result = d.process_command("go to foounknownsite123");

    assert!(result.success);
    assert_eq!(result.action(), Some("search"));
    let url = "https://www.google.com/search?q=foounknownsite123";
    assert_eq!(result.data.unwrap()["url"], json!(url));
    assert_eq!(log.entries(), vec![url]);
}

#[test]
fn test_literal_url_keeps_its_casing() {
    let log = CallLog::default();
    let mut d = dispatcher(Capabilities::unsupported().with_browser(RecordingBrowser { log: log.clone() }));

    let result = d.process_command("go to https://Example.com/CaseSensitive/Path");

    assert!(result.success);
    assert_eq!(result.action(), Some("website"));
    assert_eq!(log.entries(), vec!["https://Example.com/CaseSensitive/Path"]);
}

#[test]
fn test_youtube_search_query_is_encoded() {
    let log = CallLog::default();
    let mut d = dispatcher(Capabilities::unsupported().with_browser(RecordingBrowser { log: log.clone() }));

    let result = d.process_command("play despacito remix on youtube");

    assert!(result.success);
    assert_eq!(result.action(), Some("youtube"));
    assert_eq!(
        log.entries(),
        vec!["https://www.youtube.com/results?search_query=despacito%20remix"]
    );
}

#[test]
fn test_copy_writes_clipboard() {
    let mut d = dispatcher(Capabilities::unsupported().with_clipboard(MemoryClipboard::default()));

    let result = d.process_command("copy hello there");

    assert!(result.success);
    assert_eq!(result.action(), Some("clipboard"));
    assert_eq!(result.data, Some(json!({ "text": "hello there" })));
}

// ============================================================================
// Failure envelopes
// ============================================================================

#[test]
fn test_unknown_text() {
    let mut d = dispatcher(Capabilities::unsupported());

    let result = d.process_command("asdkjaslkdj");

    assert!(!result.success);
    assert_eq!(result.action(), Some("unknown"));
    assert_eq!(d.classify("asdkjaslkdj"), Intent::Unknown);
}

#[test]
fn test_unavailable_capability_is_reported_not_raised() {
    let mut d = dispatcher(Capabilities::unsupported());

    let result = d.process_command("take a screenshot");

    assert!(!result.success);
    assert_eq!(result.action(), Some("error"));
    assert!(result.message.contains("ScreenCapture"));
}

#[test]
fn test_panicking_capability_becomes_error_envelope() {
    let mut d = dispatcher(Capabilities::unsupported().with_input(PanickingInput));

    let result = d.process_command("type hello");

    assert!(!result.success);
    assert_eq!(result.action(), Some("error"));
    assert_eq!(result.message, "Internal failure: keyboard exploded");

    // The dispatcher keeps working after a caught panic
    let next = d.process_command("hello");
    assert!(next.success);
    assert_eq!(next.action(), Some("greeting"));
    assert_eq!(d.state().processed(), 2);
}

#[test]
fn test_empty_command_is_unknown() {
    let mut d = dispatcher(Capabilities::unsupported());

    let result = d.process_command("   ");

    assert!(!result.success);
    assert_eq!(result.action(), Some("unknown"));
    assert!(!result.message.is_empty());
}
