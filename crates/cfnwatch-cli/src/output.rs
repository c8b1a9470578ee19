use std::io::Write;

use cfnwatch_core::format::{format_event, format_watching};
use cfnwatch_core::{EventSink, StackEvent};
use chrono::Local;

/// Prints to stdout with event times in the local timezone.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl TerminalSink {
    fn print_line(&self, line: &str) {
        // One locked write per line keeps concurrent watchers from
        // interleaving. A closed stdout (e.g. `| head`) is not an error here.
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}

impl EventSink for TerminalSink {
    fn watching(&self, stack: &str) {
        self.print_line(&format_watching(stack));
    }

    fn emit(&self, _stack: &str, event: &StackEvent) {
        self.print_line(&format_event(event, &Local));
    }
}
