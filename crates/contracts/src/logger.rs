//! Observer contract for bus lifecycle events

use std::fmt;

/// Severity tag attached to every lifecycle notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogSeverity {
    /// Routine lifecycle event
    Information,
    /// Policy change
    Warning,
    /// Registration rejection, missing handler, or handler failure
    Exception,
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Exception => "exception",
        };
        f.write_str(label)
    }
}

/// Observer notified of bus lifecycle events, in subscription order.
///
/// Infallible by signature; a sink that panics aborts the dispatch in
/// progress.
pub trait BusLogger: Send + Sync {
    /// Receive one lifecycle event.
    fn log(&self, severity: LogSeverity, message: &str);
}
