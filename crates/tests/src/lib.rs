//! # Integration Tests
//!
//! End-to-end scenarios wiring the contracts and command_bus crates
//! together:
//! - Registration, dispatch, and outcome bookkeeping
//! - Best-effort batches under the suppression policy
//! - Chained handlers and shared handler instances
//! - Sink notification ordering across multiple sinks

#[cfg(test)]
mod contract_tests {
    use contracts::{CommandBusError, CommandKind, LogSeverity};

    struct Ping;

    #[test]
    fn test_contracts_are_usable_standalone() {
        let kind = CommandKind::of::<Ping>();
        assert_eq!(kind, CommandKind::of::<Ping>());
        assert_eq!(LogSeverity::Exception.to_string(), "exception");

        let err = CommandBusError::no_handler_registered(kind);
        assert!(err.to_string().contains("Ping"));
    }
}

#[cfg(test)]
mod bus_scenarios {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use command_bus::{CommandBus, MemoryLogger};
    use contracts::{
        BusLogger, ChainedCommandHandler, Command, CommandBusError, CommandHandler, HandleCommand,
        HandlerError, LogSeverity,
    };

    struct CreateOrder {
        #[allow(dead_code)]
        order_id: u64,
    }

    struct CancelOrder {
        #[allow(dead_code)]
        order_id: u64,
    }

    struct AuditTrail;

    /// Counts every command it sees, regardless of concrete type
    struct CountingHandler {
        name: &'static str,
        handled: AtomicUsize,
    }

    impl CountingHandler {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                handled: AtomicUsize::new(0),
            }
        }

        fn handled(&self) -> usize {
            self.handled.load(Ordering::Relaxed)
        }
    }

    impl HandleCommand for CountingHandler {
        fn handle_this(&self, _command: &dyn Command) -> Result<(), HandlerError> {
            self.handled.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    impl CommandHandler for CountingHandler {
        fn name(&self) -> &str {
            self.name
        }

        fn invoker(&self) -> Option<&dyn HandleCommand> {
            Some(self)
        }
    }

    /// Fails on every nth command it receives
    struct FlakyHandler {
        seen: AtomicUsize,
        fail_every: usize,
    }

    impl FlakyHandler {
        fn new(fail_every: usize) -> Self {
            Self {
                seen: AtomicUsize::new(0),
                fail_every,
            }
        }
    }

    #[derive(Debug)]
    struct OutOfStock;

    impl std::fmt::Display for OutOfStock {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("item is out of stock")
        }
    }

    impl std::error::Error for OutOfStock {}

    impl HandleCommand for FlakyHandler {
        fn handle_this(&self, _command: &dyn Command) -> Result<(), HandlerError> {
            let seen = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
            if seen % self.fail_every == 0 {
                return Err(Box::new(OutOfStock));
            }
            Ok(())
        }
    }

    impl CommandHandler for FlakyHandler {
        fn name(&self) -> &str {
            "FlakyHandler"
        }

        fn invoker(&self) -> Option<&dyn HandleCommand> {
            Some(self)
        }
    }

    /// Forwards to a successor after recording the command's kind
    struct AuditingHandler {
        recorded: Mutex<Vec<&'static str>>,
        next: Option<Arc<dyn CommandHandler>>,
    }

    impl AuditingHandler {
        fn new() -> Self {
            Self {
                recorded: Mutex::new(Vec::new()),
                next: None,
            }
        }
    }

    impl HandleCommand for AuditingHandler {
        fn handle_this(&self, command: &dyn Command) -> Result<(), HandlerError> {
            let label = if command.as_any().downcast_ref::<CreateOrder>().is_some() {
                "create"
            } else {
                "other"
            };
            self.recorded.lock().unwrap().push(label);
            if let Some(next) = &self.next {
                if let Some(invoker) = next.invoker() {
                    invoker.handle_this(command)?;
                }
            }
            Ok(())
        }
    }

    impl CommandHandler for AuditingHandler {
        fn name(&self) -> &str {
            "AuditingHandler"
        }

        fn invoker(&self) -> Option<&dyn HandleCommand> {
            Some(self)
        }
    }

    impl ChainedCommandHandler for AuditingHandler {
        fn assign_next_handler(&mut self, next: Arc<dyn CommandHandler>) {
            self.next = Some(next);
        }

        fn has_next_handler(&self) -> bool {
            self.next.is_some()
        }
    }

    #[test]
    fn test_routing_by_command_type() {
        let create_handler = Arc::new(CountingHandler::new("CreateOrderHandler"));
        let cancel_handler = Arc::new(CountingHandler::new("CancelOrderHandler"));

        let mut bus = CommandBus::new();
        bus.register::<CreateOrder>(create_handler.clone()).unwrap();
        bus.register::<CancelOrder>(cancel_handler.clone()).unwrap();
        assert_eq!(bus.handlers().len(), 2);

        bus.dispatch(&CreateOrder { order_id: 1 }).unwrap();
        bus.dispatch(&CreateOrder { order_id: 2 }).unwrap();
        bus.dispatch(&CancelOrder { order_id: 1 }).unwrap();

        assert_eq!(create_handler.handled(), 2);
        assert_eq!(cancel_handler.handled(), 1);
        assert_eq!(bus.acknowledging_handlers(), ["CancelOrderHandler"]);
    }

    #[test]
    fn test_best_effort_batch_under_suppression() {
        let mut bus = CommandBus::new();
        bus.register::<CreateOrder>(Arc::new(FlakyHandler::new(3)))
            .unwrap();
        bus.suppress_caught_exceptions();

        let mut failures = 0;
        for order_id in 0..9 {
            bus.dispatch(&CreateOrder { order_id }).unwrap();
            failures += bus.caught_exceptions().len();
        }

        // Every third command failed, every failure was recorded, none
        // surfaced to the caller.
        assert_eq!(failures, 3);

        bus.resume_throwing_caught_exceptions();
        for order_id in 0..2 {
            bus.dispatch(&CreateOrder { order_id }).unwrap();
        }
        let result = bus.dispatch(&CreateOrder { order_id: 99 });
        assert!(matches!(result, Err(CommandBusError::HandlerFailed { .. })));
    }

    #[test]
    fn test_shared_handler_instance_serves_two_command_types() {
        let handler = Arc::new(CountingHandler::new("OrderHandler"));

        let mut bus = CommandBus::new();
        bus.register::<CreateOrder>(handler.clone()).unwrap();
        bus.register::<CancelOrder>(handler.clone()).unwrap();

        bus.dispatch(&CreateOrder { order_id: 1 }).unwrap();
        bus.dispatch(&CancelOrder { order_id: 1 }).unwrap();

        // The caller still owns the same instance the bus invoked.
        assert_eq!(handler.handled(), 2);
    }

    #[test]
    fn test_chain_runs_inside_the_invoked_handler() {
        let successor = Arc::new(CountingHandler::new("CreateOrderHandler"));
        let mut auditor = AuditingHandler::new();
        auditor.assign_next_handler(successor.clone());
        let auditor = Arc::new(auditor);

        let mut bus = CommandBus::new();
        bus.register::<CreateOrder>(auditor.clone()).unwrap();
        bus.dispatch(&CreateOrder { order_id: 7 }).unwrap();

        assert_eq!(*auditor.recorded.lock().unwrap(), ["create"]);
        assert_eq!(successor.handled(), 1);
        // The bus saw one handler; the forwarded call bypassed it.
        assert_eq!(bus.acknowledging_handlers(), ["AuditingHandler"]);
    }

    #[test]
    fn test_chained_handler_failure_propagates_through_the_chain() {
        let successor = Arc::new(FlakyHandler::new(1));
        let mut auditor = AuditingHandler::new();
        auditor.assign_next_handler(successor);

        let mut bus = CommandBus::new();
        bus.register::<CreateOrder>(Arc::new(auditor)).unwrap();

        let result = bus.dispatch(&CreateOrder { order_id: 1 });

        // The successor's failure surfaces as the invoked handler's failure.
        assert!(matches!(
            result,
            Err(CommandBusError::HandlerFailed { ref handler, .. }) if handler == "AuditingHandler"
        ));
        assert_eq!(bus.caught_exceptions().len(), 1);
    }

    /// Sink that tags entries with its own id in a shared journal
    struct TaggingLogger {
        id: usize,
        journal: Arc<Mutex<Vec<(usize, LogSeverity, String)>>>,
    }

    impl BusLogger for TaggingLogger {
        fn log(&self, severity: LogSeverity, message: &str) {
            self.journal
                .lock()
                .unwrap()
                .push((self.id, severity, message.to_string()));
        }
    }

    #[test]
    fn test_every_sink_sees_every_lifecycle_event_in_order() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let mut bus = CommandBus::new();
        for id in 0..2 {
            bus.register_logger(Arc::new(TaggingLogger {
                id,
                journal: Arc::clone(&journal),
            }));
        }

        bus.register::<AuditTrail>(Arc::new(CountingHandler::new("AuditTrailHandler")))
            .unwrap();
        bus.dispatch(&AuditTrail).unwrap();

        let entries = journal.lock().unwrap().clone();
        // Five lifecycle events (assigning, assigned, received, sending,
        // handled), each fanned out to both sinks, sink 0 first.
        assert_eq!(entries.len(), 10);
        for pair in entries.chunks(2) {
            assert_eq!(pair[0].0, 0);
            assert_eq!(pair[1].0, 1);
            assert_eq!(pair[0].2, pair[1].2);
        }

        let sink0: Vec<&str> = entries
            .iter()
            .filter(|entry| entry.0 == 0)
            .map(|entry| entry.2.as_str())
            .collect();
        assert!(sink0[0].starts_with("Assigning"));
        assert!(sink0[1].contains("was assigned to"));
        assert!(sink0[2].ends_with("command was received."));
        assert!(sink0[3].starts_with("Sending command to"));
        assert!(sink0[4].starts_with("Command was handled by"));
    }

    #[test]
    fn test_memory_logger_captures_a_whole_session() {
        let sink = Arc::new(MemoryLogger::new());
        let mut bus = CommandBus::new();
        bus.register_logger(sink.clone());

        bus.register::<CreateOrder>(Arc::new(FlakyHandler::new(1)))
            .unwrap();
        bus.suppress_caught_exceptions();
        bus.dispatch(&CreateOrder { order_id: 1 }).unwrap();

        let entries = sink.entries();
        let exceptions: Vec<_> = entries
            .iter()
            .filter(|entry| entry.severity == LogSeverity::Exception)
            .collect();
        assert_eq!(exceptions.len(), 1);
        assert!(exceptions[0].message.contains("out of stock"));

        let warnings: Vec<_> = entries
            .iter()
            .filter(|entry| entry.severity == LogSeverity::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Exception throwing was disabled.");
    }
}
