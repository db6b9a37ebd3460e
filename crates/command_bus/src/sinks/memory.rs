//! MemoryLogger - records notifications for inspection

use std::sync::{Mutex, PoisonError};

use contracts::{BusLogger, LogSeverity};

/// One recorded notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub message: String,
}

/// Sink that records every notification in memory, in notification order.
///
/// Inspection surface for tests and demos.
#[derive(Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    /// Create an empty MemoryLogger
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded messages only, for compact assertions
    pub fn messages(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|entry| entry.message)
            .collect()
    }

    /// Discard recorded entries
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl BusLogger for MemoryLogger {
    fn log(&self, severity: LogSeverity, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                severity,
                message: message.to_string(),
            });
    }
}
