//! Handler capability traits
//!
//! Handlers are supplied and owned by the caller; the bus stores
//! `Arc<dyn CommandHandler>` so the same instance may be retained and reused
//! elsewhere.

use std::sync::Arc;

use crate::command::{Command, CommandKind};

/// Failure raised by a handler while handling a command.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// The invocation capability.
pub trait HandleCommand: Send + Sync {
    /// Handle one command.
    ///
    /// The concrete command type is recovered with
    /// `command.as_any().downcast_ref()`.
    ///
    /// # Errors
    /// Any failure the handler raises; the bus records it and re-raises it
    /// according to its suppression policy.
    fn handle_this(&self, command: &dyn Command) -> Result<(), HandlerError>;
}

/// Base capability set every command handler exposes.
pub trait CommandHandler: Send + Sync {
    /// Handler identity recorded in acknowledgment bookkeeping.
    fn name(&self) -> &str;

    /// The command kind this handler is configured for, unset by default.
    ///
    /// Informational metadata only; routing uses the key supplied at
    /// registration.
    fn assigned_command(&self) -> Option<CommandKind> {
        None
    }

    /// Record the command kind this handler is configured for.
    fn assign_command(&mut self, _kind: CommandKind) {}

    /// Invocation capability probe.
    ///
    /// Registration rejects handlers that return `None`.
    fn invoker(&self) -> Option<&dyn HandleCommand>;
}

/// A handler that forwards the command to a successor after acting.
///
/// Forwarding happens inside the handler's own [`HandleCommand::handle_this`]
/// and bypasses the bus, so the successor never appears in bus bookkeeping.
pub trait ChainedCommandHandler: CommandHandler {
    /// Set the handler to invoke after this one's own logic.
    fn assign_next_handler(&mut self, next: Arc<dyn CommandHandler>);

    /// True when a successor is configured.
    fn has_next_handler(&self) -> bool;
}
