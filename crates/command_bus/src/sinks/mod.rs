//! Sink implementations
//!
//! Contains TracingLogger and MemoryLogger.

mod log;
mod memory;

pub use self::log::TracingLogger;
pub use self::memory::{LogEntry, MemoryLogger};
