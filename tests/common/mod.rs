//! Shared builders for the integration harnesses.

use chrono::{DateTime, Duration, TimeZone, Utc};
use logview::{LogEntry, LogLevel};

/// Fixed base instant plus an offset in seconds, so timestamps are
/// deterministic and ordered by construction.
pub fn ts(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + Duration::seconds(offset_secs)
}

/// Entry with a subsystem tag and empty category/sender.
pub fn entry(offset_secs: i64, level: LogLevel, subsystem: &str, message: &str) -> LogEntry {
    LogEntry::new(ts(offset_secs), level, message).with_subsystem(subsystem)
}

/// The two-entry working set used across harnesses: an error from "net" and
/// a debug line from "ui".
pub fn sample_entries() -> Vec<LogEntry> {
    vec![
        entry(0, LogLevel::Error, "net", "timeout"),
        entry(1, LogLevel::Debug, "ui", "render"),
    ]
}
