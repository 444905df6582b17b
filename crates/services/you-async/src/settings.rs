use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Destination for debug request/response lines
///
/// Cheap to clone; clones share the underlying writer.
#[derive(Clone)]
pub struct LogSink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl LogSink {
    /// Wraps any writer
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        let writer: Box<dyn Write + Send> = Box::new(writer);
        Self {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Standard error
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    /// Standard output
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// Writes one line. Write failures are reported through `tracing` only.
    pub fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            tracing::warn!(error = %e, "failed to write to You API log sink");
        }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink").finish_non_exhaustive()
    }
}

/// Operational settings read by the client at request time
///
/// Owned by the caller and handed to [`crate::Client::with_settings`]. Settings
/// are meant to be fixed before the client is built; a client never observes
/// later changes to a value it was not given.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    log_sink: LogSink,
    debug: bool,
}

impl Settings {
    /// Default settings: stderr sink, debug off
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutates the settings in place
    pub fn configure(&mut self, mutator: impl FnOnce(&mut Self)) {
        mutator(self);
    }

    /// By-value form of [`Settings::configure`]
    #[must_use]
    pub fn configured(mut self, mutator: impl FnOnce(&mut Self)) -> Self {
        self.configure(mutator);
        self
    }

    /// Enables or disables request/response logging to the sink
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Replaces the log sink
    #[must_use]
    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.log_sink = sink;
        self
    }

    /// Sets the debug flag
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Sets the log sink
    pub fn set_log_sink(&mut self, sink: LogSink) {
        self.log_sink = sink;
    }

    /// Whether debug logging is on
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// The log sink
    #[must_use]
    pub const fn log_sink(&self) -> &LogSink {
        &self.log_sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SharedBuffer;

    #[test]
    fn defaults() {
        let settings = Settings::new();
        assert!(!settings.debug());
    }

    #[test]
    fn configure_mutates_in_place() {
        let buf = SharedBuffer::default();
        let mut settings = Settings::new();
        settings.configure(|s| {
            s.set_debug(true);
            s.set_log_sink(LogSink::new(buf.clone()));
        });

        assert!(settings.debug());
        settings.log_sink().write_line("hello");
        assert_eq!(buf.contents(), "hello\n");
    }

    #[test]
    fn configured_by_value() {
        let settings = Settings::new().configured(|s| s.set_debug(true));
        assert!(settings.debug());
    }

    #[test]
    fn clones_share_the_writer() {
        let buf = SharedBuffer::default();
        let sink = LogSink::new(buf.clone());
        let other = sink.clone();

        sink.write_line("a");
        other.write_line("b");
        assert_eq!(buf.contents(), "a\nb\n");
    }
}
