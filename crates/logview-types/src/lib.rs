//! Shared types for logview
//!
//! This crate contains data structures used across multiple logview crates.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Log Levels
// ============================================================================

/// Log severity level.
///
/// The derive order is the severity order: `Debug < Info < Notice < Error < Fault`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Notice,
    Error,
    Fault,
}

impl LogLevel {
    /// All levels in severity order.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Notice,
        LogLevel::Error,
        LogLevel::Fault,
    ];

    /// Lowercase display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Error => "error",
            Self::Fault => "fault",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized level name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized log level: {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    /// Parse a level from common spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(Self::Debug),
            "info" | "default" => Ok(Self::Info),
            "notice" => Ok(Self::Notice),
            "error" | "err" => Ok(Self::Error),
            "fault" | "fatal" | "crit" => Ok(Self::Fault),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

// ============================================================================
// Log Entries
// ============================================================================

/// A single log entry as delivered by a fetch collaborator.
///
/// `subsystem`, `category` and `sender` may be empty; empty values never
/// participate in tag matching or statistics. Identity is structural: two
/// entries with identical fields are the same entry for UI purposes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Time the entry was recorded (UTC).
    pub timestamp: DateTime<Utc>,

    /// Severity of the entry.
    pub level: LogLevel,

    /// Subsystem that emitted the entry (may be empty).
    pub subsystem: String,

    /// Category within the subsystem (may be empty).
    pub category: String,

    /// Sender / library name (may be empty).
    pub sender: String,

    /// Fully composed human-readable message.
    pub message: String,
}

impl LogEntry {
    /// Create an entry with empty tag strings.
    pub fn new(timestamp: DateTime<Utc>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            level,
            subsystem: String::new(),
            category: String::new(),
            sender: String::new(),
            message: message.into(),
        }
    }

    /// Set the subsystem.
    pub fn with_subsystem(mut self, subsystem: impl Into<String>) -> Self {
        self.subsystem = subsystem.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the sender.
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    /// Short time-of-day label for list rendering (`HH:MM:SS.mmm`).
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S%.3f").to_string()
    }

    /// Whether two entries carry the same subsystem, category and sender.
    /// Consecutive entries sharing tags can be rendered as one group.
    pub fn shares_tags_with(&self, other: &LogEntry) -> bool {
        self.subsystem == other.subsystem
            && self.category == other.category
            && self.sender == other.sender
    }
}

impl std::fmt::Display for LogEntry {
    /// Full description of the entry. Doubles as its UI identity string.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {} {} {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.level,
            self.subsystem,
            self.category,
            self.sender,
            self.message
        )
    }
}

// ============================================================================
// Fetch Status
// ============================================================================

/// The only failure the core surfaces: a fetch collaborator reported an error.
///
/// The reason is kept behind an `Arc` so the status stays cheap to clone into
/// snapshots while retaining the full error chain for display.
#[derive(Clone, Debug, thiserror::Error)]
#[error("failed to fetch log entries: {0}")]
pub struct FetchError(pub Arc<anyhow::Error>);

impl From<anyhow::Error> for FetchError {
    fn from(reason: anyhow::Error) -> Self {
        Self(Arc::new(reason))
    }
}

/// Fetch lifecycle of the log-view model.
#[derive(Clone, Debug)]
pub enum Status {
    /// A fetch is in flight.
    Loading,
    /// The last fetch completed.
    Loaded,
    /// The last fetch failed; previously fetched entries are untouched.
    Failed(FetchError),
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The retained failure reason, if the last fetch failed.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl PartialEq for Status {
    /// Statuses compare by variant only; two failures are equal regardless
    /// of their reasons.
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Eq for Status {}
