//! Reply sink port — the seam to the host that owns user interaction.
//!
//! The surrounding chat/CLI host is out of scope here; all the core ever
//! asks of it is to show one line of success or one line of failure.

use std::sync::Mutex;

/// Receives the single-line output of a command.
pub trait ReplySink: Send + Sync {
    /// Emits a success line.
    fn emit_line(&self, text: &str);
    /// Emits a failure line.
    fn emit_error(&self, text: &str);
}

impl<T: ReplySink + ?Sized> ReplySink for std::sync::Arc<T> {
    fn emit_line(&self, text: &str) {
        (**self).emit_line(text);
    }

    fn emit_error(&self, text: &str) {
        (**self).emit_error(text);
    }
}

/// Sink that captures output in memory, for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty capturing sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Success lines emitted so far.
    ///
    /// # Panics
    ///
    /// Panics if a previous writer panicked while holding the lock.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("sink lock poisoned").clone()
    }

    /// Failure lines emitted so far.
    ///
    /// # Panics
    ///
    /// Panics if a previous writer panicked while holding the lock.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("sink lock poisoned").clone()
    }
}

impl ReplySink for MemorySink {
    fn emit_line(&self, text: &str) {
        self.lines.lock().expect("sink lock poisoned").push(text.to_string());
    }

    fn emit_error(&self, text: &str) {
        self.errors.lock().expect("sink lock poisoned").push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_keeps_lines_and_errors_apart() {
        let sink = MemorySink::new();
        sink.emit_line("Ticket 1: ok - url");
        sink.emit_error("failed to retrieve ticket data");
        assert_eq!(sink.lines(), vec!["Ticket 1: ok - url"]);
        assert_eq!(sink.errors(), vec!["failed to retrieve ticket data"]);
    }
}
