//! Ping/Pong Demo
//!
//! Wires a command bus with tracing and in-memory sinks, registers plain,
//! chained, and failing handlers, then dispatches under both suppression
//! policies.
//!
//! Run with: cargo run --bin ping_pong

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use command_bus::{CommandBus, MemoryLogger, TracingLogger};
use contracts::{
    ChainedCommandHandler, Command, CommandHandler, HandleCommand, HandlerError, LogSeverity,
};

struct Ping;
struct Pong;
struct SelfDestruct;

/// Replies to whatever it receives and counts the replies
struct EchoHandler {
    name: &'static str,
    replies: AtomicUsize,
}

impl EchoHandler {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            replies: AtomicUsize::new(0),
        }
    }
}

impl HandleCommand for EchoHandler {
    fn handle_this(&self, command: &dyn Command) -> Result<(), HandlerError> {
        let reply = if command.as_any().downcast_ref::<Ping>().is_some() {
            "pong"
        } else {
            "ping"
        };
        self.replies.fetch_add(1, Ordering::Relaxed);
        tracing::info!(handler = self.name, reply, "echo");
        Ok(())
    }
}

impl CommandHandler for EchoHandler {
    fn name(&self) -> &str {
        self.name
    }

    fn invoker(&self) -> Option<&dyn HandleCommand> {
        Some(self)
    }
}

/// Counts traffic, then forwards the command to its successor
struct RelayHandler {
    seen: AtomicUsize,
    next: Option<Arc<dyn CommandHandler>>,
}

impl RelayHandler {
    fn new() -> Self {
        Self {
            seen: AtomicUsize::new(0),
            next: None,
        }
    }
}

impl HandleCommand for RelayHandler {
    fn handle_this(&self, command: &dyn Command) -> Result<(), HandlerError> {
        self.seen.fetch_add(1, Ordering::Relaxed);
        if let Some(next) = &self.next {
            if let Some(invoker) = next.invoker() {
                invoker.handle_this(command)?;
            }
        }
        Ok(())
    }
}

impl CommandHandler for RelayHandler {
    fn name(&self) -> &str {
        "RelayHandler"
    }

    fn invoker(&self) -> Option<&dyn HandleCommand> {
        Some(self)
    }
}

impl ChainedCommandHandler for RelayHandler {
    fn assign_next_handler(&mut self, next: Arc<dyn CommandHandler>) {
        self.next = Some(next);
    }

    fn has_next_handler(&self) -> bool {
        self.next.is_some()
    }
}

#[derive(Debug)]
struct DemoFailure;

impl std::fmt::Display for DemoFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("refusing to self-destruct")
    }
}

impl std::error::Error for DemoFailure {}

struct StubbornHandler;

impl HandleCommand for StubbornHandler {
    fn handle_this(&self, _command: &dyn Command) -> Result<(), HandlerError> {
        Err(Box::new(DemoFailure))
    }
}

impl CommandHandler for StubbornHandler {
    fn name(&self) -> &str {
        "StubbornHandler"
    }

    fn invoker(&self) -> Option<&dyn HandleCommand> {
        Some(self)
    }
}

fn main() -> anyhow::Result<()> {
    observability::init()?;

    let mut bus = CommandBus::new();
    let memory = Arc::new(MemoryLogger::new());
    bus.register_logger(Arc::new(TracingLogger::new("bus")));
    bus.register_logger(memory.clone());

    // Ping goes through a relay that forwards to the echo handler; the
    // forwarded hop is invisible to the bus.
    let echo = Arc::new(EchoHandler::new("EchoHandler"));
    let mut relay = RelayHandler::new();
    relay.assign_next_handler(echo.clone());
    bus.register::<Ping>(Arc::new(relay))?;
    bus.register::<Pong>(echo.clone())?;
    bus.register::<SelfDestruct>(Arc::new(StubbornHandler))?;

    bus.dispatch(&Ping)?;
    bus.dispatch(&Pong)?;
    tracing::info!(
        acknowledging = ?bus.acknowledging_handlers(),
        echo_replies = echo.replies.load(Ordering::Relaxed),
        "round trip complete"
    );

    // Best-effort mode: the failure is recorded, not raised.
    bus.suppress_caught_exceptions();
    bus.dispatch(&SelfDestruct)?;
    tracing::info!(
        caught = bus.caught_exceptions().len(),
        "failure suppressed and recorded"
    );

    // Back to fail-fast: the same dispatch now surfaces the failure.
    bus.resume_throwing_caught_exceptions();
    if let Err(err) = bus.dispatch(&SelfDestruct) {
        tracing::warn!(error = %err, "failure re-raised under the throw policy");
    }

    let exceptions = memory
        .entries()
        .into_iter()
        .filter(|entry| entry.severity == LogSeverity::Exception)
        .count();
    tracing::info!(
        lifecycle_events = memory.entries().len(),
        exception_events = exceptions,
        "session recorded by the memory sink"
    );

    Ok(())
}
