//! Error taxonomy for registration and dispatch
//!
//! Structural misuse (`MissingHandlerMethod`, `NoHandlerRegistered`) always
//! surfaces to the caller; `HandlerFailed` is the only policy-controlled
//! variant.

use std::sync::Arc;

use thiserror::Error;

use crate::command::CommandKind;

/// A handler failure captured during dispatch.
///
/// Shared between the bus's caught-exceptions record and the re-raised
/// [`CommandBusError::HandlerFailed`], so both refer to the same failure.
pub type CaughtException = Arc<dyn std::error::Error + Send + Sync>;

/// Unified error type for bus operations
#[derive(Debug, Error)]
pub enum CommandBusError {
    /// Registration-time: the handler exposes no invocation capability.
    /// Raised before any mutation, never suppressed.
    #[error("the command handler {handler} is missing a required handle_this method")]
    MissingHandlerMethod { handler: String },

    /// Dispatch-time: no handler registered for the command's kind.
    /// Raised before any invocation or bookkeeping, never suppressed.
    #[error("there is no command handler assigned to the {command} command")]
    NoHandlerRegistered { command: &'static str },

    /// The invoked handler failed. Recorded always; re-raised only while the
    /// bus is throwing caught exceptions.
    #[error("command handler {handler} failed: {cause}")]
    HandlerFailed {
        handler: String,
        cause: CaughtException,
    },
}

impl CommandBusError {
    /// Create a missing-handler-method error
    pub fn missing_handler_method(handler: impl Into<String>) -> Self {
        Self::MissingHandlerMethod {
            handler: handler.into(),
        }
    }

    /// Create a no-handler-registered error
    pub fn no_handler_registered(command: CommandKind) -> Self {
        Self::NoHandlerRegistered {
            command: command.name(),
        }
    }

    /// Create a handler-failed error
    pub fn handler_failed(handler: impl Into<String>, cause: CaughtException) -> Self {
        Self::HandlerFailed {
            handler: handler.into(),
            cause,
        }
    }
}
