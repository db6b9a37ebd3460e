//! Ordered fan-out of lifecycle events to subscribed sinks

use std::sync::Arc;

use contracts::{BusLogger, LogSeverity};

/// Ordered list of observer sinks.
///
/// Append-only: no removal, no dedup. Notification is synchronous and runs
/// in subscription order. Sinks cannot fail by signature; a sink that panics
/// aborts the dispatch in progress.
#[derive(Default)]
pub struct LogFanout {
    loggers: Vec<Arc<dyn BusLogger>>,
}

impl LogFanout {
    /// Create an empty fan-out
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sink
    pub fn subscribe(&mut self, logger: Arc<dyn BusLogger>) {
        self.loggers.push(logger);
    }

    /// Subscribed sinks, in subscription order
    pub fn loggers(&self) -> &[Arc<dyn BusLogger>] {
        &self.loggers
    }

    /// Forward one lifecycle event to every sink
    pub fn notify(&self, severity: LogSeverity, message: &str) {
        for logger in &self.loggers {
            logger.log(severity, message);
        }
    }
}
