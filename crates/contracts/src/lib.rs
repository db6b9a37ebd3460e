//! # Contracts
//!
//! Frozen interface contracts for the command bus, defining inter-crate
//! types and traits. Business crates can only depend on this crate, reverse
//! dependencies are prohibited.
//!
//! ## Routing Model
//! - A command is routed by its type identity ([`CommandKind`], a `TypeId`
//!   token captured per concrete type)
//! - Exactly one handler per command kind; later registrations replace
//!   earlier ones

mod command;
mod error;
mod handler;
mod logger;

pub use command::{Command, CommandKind};
pub use error::{CaughtException, CommandBusError};
pub use handler::{ChainedCommandHandler, CommandHandler, HandleCommand, HandlerError};
pub use logger::{BusLogger, LogSeverity};
