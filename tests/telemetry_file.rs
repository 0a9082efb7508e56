// tests/telemetry_file.rs
//
// Own test binary: telemetry::init installs the process-wide subscriber.

use homework_status_bot::telemetry;

#[test]
fn log_file_receives_events_without_ansi() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bot.log");
    std::fs::write(&path, "stale line from previous run\n").unwrap();

    telemetry::init(Some(path.as_path())).expect("init tracing");
    tracing::error!(target: "homework_status_bot::poller", kind = "transport", "poll cycle failed");

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("stale line"), "file must be truncated");
    assert!(text.contains("poll cycle failed"), "{text}");
    assert!(text.contains("transport"), "{text}");
    assert!(!text.contains('\u{1b}'), "no ANSI escapes in file output");
}
