//! Bus metrics via the `metrics` facade
//!
//! Pure emission; installing a recorder is up to the embedding binary.

use contracts::CommandKind;
use metrics::counter;

/// Record a successful handler registration
pub fn record_handler_registered(command: CommandKind) {
    counter!("command_bus_handlers_registered_total", "command" => command.short_name())
        .increment(1);
}

/// Record a command arriving at the bus
pub fn record_command_received(command: CommandKind) {
    counter!("command_bus_commands_received_total", "command" => command.short_name())
        .increment(1);
}

/// Record a completed handler invocation, successful or not
pub fn record_command_handled(command: CommandKind, handler: &str) {
    counter!(
        "command_bus_commands_handled_total",
        "command" => command.short_name(),
        "handler" => handler.to_string()
    )
    .increment(1);
}

/// Record a failure raised by a handler
pub fn record_handler_failure(command: CommandKind, handler: &str) {
    counter!(
        "command_bus_handler_failures_total",
        "command" => command.short_name(),
        "handler" => handler.to_string()
    )
    .increment(1);
}

/// Record a failure swallowed by the suppression policy
pub fn record_exception_suppressed() {
    counter!("command_bus_exceptions_suppressed_total").increment(1);
}
