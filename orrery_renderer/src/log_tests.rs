use super::*;
use serial_test::serial;
use std::sync::{Arc, Mutex};

/// Test logger capturing entries into a shared vector
struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

fn install_capture() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    set_logger(CaptureLogger {
        entries: entries.clone(),
    });
    entries
}

#[test]
#[serial]
fn test_macros_route_through_global_logger() {
    let entries = install_capture();

    crate::render_info!("orrery::test", "hello {}", 42);
    crate::render_warn!("orrery::test", "careful");

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].severity, LogSeverity::Info);
    assert_eq!(entries[0].source, "orrery::test");
    assert_eq!(entries[0].message, "hello 42");
    assert_eq!(entries[1].severity, LogSeverity::Warn);
    assert!(entries[0].file.is_none());
    drop(entries);

    reset_logger();
}

#[test]
#[serial]
fn test_error_macro_carries_file_and_line() {
    let entries = install_capture();

    crate::render_error!("orrery::test", "boom");

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Error);
    assert!(entries[0].file.is_some());
    assert!(entries[0].line.is_some());
    drop(entries);

    reset_logger();
}

#[test]
#[serial]
fn test_render_err_logs_and_builds_error() {
    let entries = install_capture();

    let err = crate::render_err!("orrery::test", "submit failed: {}", -4);
    match err {
        crate::Error::BackendError(msg) => assert_eq!(msg, "submit failed: -4"),
        other => panic!("unexpected error variant: {:?}", other),
    }

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Error);
    assert_eq!(entries[0].message, "submit failed: -4");
    drop(entries);

    reset_logger();
}

#[test]
#[serial]
fn test_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}
