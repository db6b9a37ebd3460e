//! TracingLogger - forwards bus lifecycle events to `tracing`

use contracts::{BusLogger, LogSeverity};
use tracing::{error, info, warn};

/// Sink that emits bus notifications through the `tracing` subscriber
pub struct TracingLogger {
    name: String,
}

impl TracingLogger {
    /// Create a new TracingLogger with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Sink name (used as a log field)
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl BusLogger for TracingLogger {
    fn log(&self, severity: LogSeverity, message: &str) {
        match severity {
            LogSeverity::Information => info!(sink = %self.name, "{message}"),
            LogSeverity::Warning => warn!(sink = %self.name, "{message}"),
            LogSeverity::Exception => error!(sink = %self.name, "{message}"),
        }
    }
}
