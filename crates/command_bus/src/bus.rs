//! CommandBus - registration table, routing, and per-dispatch bookkeeping

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use contracts::{
    BusLogger, CaughtException, CommandBusError, CommandHandler, CommandKind, LogSeverity,
};
use tracing::{debug, error};

use crate::fanout::LogFanout;
use crate::metrics::{
    record_command_handled, record_command_received, record_exception_suppressed,
    record_handler_failure, record_handler_registered,
};

/// Synchronous command dispatcher.
///
/// Routes a command to the single handler registered for its type identity,
/// records which handlers acknowledged the most recent dispatch and which
/// exceptions were caught along the way, and fans lifecycle events out to
/// subscribed sinks. Caught handler failures are re-raised to the caller by
/// default; [`suppress_caught_exceptions`](Self::suppress_caught_exceptions)
/// switches the bus to best-effort dispatch where failures are only
/// recorded.
///
/// The bus provides no internal locking: mutating methods take `&mut self`,
/// so single-threaded use is enforced by the borrow checker. Sharing a bus
/// across threads requires an external mutex around every call.
pub struct CommandBus {
    handlers: HashMap<CommandKind, Arc<dyn CommandHandler>>,
    acknowledging_handlers: Vec<String>,
    caught_exceptions: Vec<CaughtException>,
    suppress_caught_exceptions: bool,
    fanout: LogFanout,
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBus {
    /// Create a bus with no handlers, no sinks, and the throw policy active
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            acknowledging_handlers: Vec::new(),
            caught_exceptions: Vec::new(),
            suppress_caught_exceptions: false,
            fanout: LogFanout::new(),
        }
    }

    /// Register `handler` for the command type `C`.
    ///
    /// A later registration for the same command type silently replaces the
    /// earlier one.
    ///
    /// # Errors
    /// [`CommandBusError::MissingHandlerMethod`] when the handler exposes no
    /// invocation capability; the table is not touched in that case.
    pub fn register<C: Any>(
        &mut self,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<(), CommandBusError> {
        let kind = CommandKind::of::<C>();
        let handler_name = handler.name().to_string();

        self.fanout.notify(
            LogSeverity::Information,
            &format!(
                "Assigning {} command to {} command handler.",
                kind.name(),
                handler_name
            ),
        );

        if handler.invoker().is_none() {
            let message = format!(
                "The command handler {handler_name} is missing a required handle_this method."
            );
            self.fanout.notify(LogSeverity::Exception, &message);
            error!(handler = %handler_name, "handler exposes no invocation capability");
            return Err(CommandBusError::missing_handler_method(handler_name));
        }

        self.handlers.insert(kind, handler);
        record_handler_registered(kind);
        debug!(
            command = kind.short_name(),
            handler = %handler_name,
            "command handler registered"
        );

        self.fanout.notify(
            LogSeverity::Information,
            &format!(
                "{} command was assigned to {} command handler.",
                kind.name(),
                handler_name
            ),
        );
        Ok(())
    }

    /// Registered handlers keyed by command kind. Read-only snapshot.
    pub fn handlers(&self) -> &HashMap<CommandKind, Arc<dyn CommandHandler>> {
        &self.handlers
    }

    /// Route `command` to its registered handler.
    ///
    /// The per-dispatch outcome state ([`acknowledging_handlers`] and
    /// [`caught_exceptions`]) replaces the previous call's state once a
    /// handler is found; a failed lookup leaves it untouched. The invoked
    /// handler acknowledges the command whether or not it fails.
    ///
    /// # Errors
    /// - [`CommandBusError::NoHandlerRegistered`] when no handler is
    ///   registered for `C`; raised regardless of the suppression policy.
    /// - [`CommandBusError::HandlerFailed`] when the handler fails and the
    ///   bus is throwing caught exceptions. Under the suppress policy the
    ///   failure is recorded and the call returns `Ok(())`.
    ///
    /// [`acknowledging_handlers`]: Self::acknowledging_handlers
    /// [`caught_exceptions`]: Self::caught_exceptions
    pub fn dispatch<C: Any>(&mut self, command: &C) -> Result<(), CommandBusError> {
        let kind = CommandKind::of::<C>();
        record_command_received(kind);

        self.fanout.notify(
            LogSeverity::Information,
            &format!("{} command was received.", kind.name()),
        );

        let Some(handler) = self.handlers.get(&kind).map(Arc::clone) else {
            let message = format!(
                "There is no command handler assigned to the {} command.",
                kind.name()
            );
            self.fanout.notify(LogSeverity::Exception, &message);
            error!(command = kind.short_name(), "no command handler registered");
            return Err(CommandBusError::no_handler_registered(kind));
        };
        let handler_name = handler.name().to_string();

        // Outcome state reflects only the most recent dispatch. Cleared after
        // lookup, before invocation.
        self.acknowledging_handlers.clear();
        self.caught_exceptions.clear();

        self.fanout.notify(
            LogSeverity::Information,
            &format!("Sending command to {handler_name} command handler."),
        );
        debug!(
            command = kind.short_name(),
            handler = %handler_name,
            "dispatching command"
        );

        // Registration rejects handlers without an invoker; re-checked here
        // instead of unwrapping.
        let Some(invoker) = handler.invoker() else {
            return Err(CommandBusError::missing_handler_method(handler_name));
        };

        let mut failure: Option<CaughtException> = None;
        if let Err(err) = invoker.handle_this(command) {
            let caught: CaughtException = Arc::from(err);
            self.fanout.notify(
                LogSeverity::Exception,
                &format!("Exception encountered: {caught}"),
            );
            error!(
                command = kind.short_name(),
                handler = %handler_name,
                error = %caught,
                "command handler failed"
            );
            record_handler_failure(kind, &handler_name);
            self.caught_exceptions.push(Arc::clone(&caught));
            if self.is_throwing_caught_exceptions() {
                failure = Some(caught);
            } else {
                record_exception_suppressed();
            }
        }

        // Finally-equivalent bookkeeping: the handler acknowledged the
        // command whether or not it failed, before any re-raise.
        self.fanout.notify(
            LogSeverity::Information,
            &format!("Command was handled by {handler_name} command handler."),
        );
        self.acknowledging_handlers.push(handler_name.clone());
        record_command_handled(kind, &handler_name);

        match failure {
            Some(cause) => Err(CommandBusError::handler_failed(handler_name, cause)),
            None => Ok(()),
        }
    }

    /// Handler identities that acknowledged the most recent dispatch
    pub fn acknowledging_handlers(&self) -> &[String] {
        &self.acknowledging_handlers
    }

    /// Failures caught during the most recent dispatch
    pub fn caught_exceptions(&self) -> &[CaughtException] {
        &self.caught_exceptions
    }

    /// Swallow handler failures after recording them
    pub fn suppress_caught_exceptions(&mut self) {
        self.fanout
            .notify(LogSeverity::Warning, "Exception throwing was disabled.");
        debug!("exception throwing disabled");
        self.suppress_caught_exceptions = true;
    }

    /// Re-raise handler failures to the caller (the default)
    pub fn resume_throwing_caught_exceptions(&mut self) {
        self.fanout
            .notify(LogSeverity::Warning, "Exception throwing was enabled.");
        debug!("exception throwing enabled");
        self.suppress_caught_exceptions = false;
    }

    /// True while handler failures are swallowed after being recorded
    pub fn is_suppressing_caught_exceptions(&self) -> bool {
        self.suppress_caught_exceptions
    }

    /// True while handler failures are re-raised to the caller
    pub fn is_throwing_caught_exceptions(&self) -> bool {
        !self.suppress_caught_exceptions
    }

    /// Subscribe another lifecycle sink
    pub fn register_logger(&mut self, logger: Arc<dyn BusLogger>) {
        self.fanout.subscribe(logger);
    }

    /// Subscribed sinks, in subscription order
    pub fn loggers(&self) -> &[Arc<dyn BusLogger>] {
        self.fanout.loggers()
    }
}
