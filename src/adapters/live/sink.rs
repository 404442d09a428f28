//! Live adapter for the `ReplySink` port: success lines to stdout,
//! failure lines to stderr.

use crate::ports::sink::ReplySink;

/// Sink that writes to the process's standard streams.
pub struct StdioSink;

impl ReplySink for StdioSink {
    fn emit_line(&self, text: &str) {
        println!("{text}");
    }

    fn emit_error(&self, text: &str) {
        eprintln!("{text}");
    }
}
