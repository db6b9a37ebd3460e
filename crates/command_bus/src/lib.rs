//! # Command Bus
//!
//! Synchronous in-process command dispatch.
//!
//! Responsibilities:
//! - Route a command to the single handler registered for its type identity
//! - Record per-dispatch bookkeeping (acknowledging handlers, caught
//!   exceptions)
//! - Fan lifecycle events out to subscribed sinks
//! - Apply the exception-suppression policy

pub mod bus;
pub mod fanout;
pub mod metrics;
pub mod sinks;

pub use contracts::{
    BusLogger, CaughtException, ChainedCommandHandler, Command, CommandBusError, CommandHandler,
    CommandKind, HandleCommand, HandlerError, LogSeverity,
};

pub use bus::CommandBus;
pub use fanout::LogFanout;
pub use sinks::{LogEntry, MemoryLogger, TracingLogger};
