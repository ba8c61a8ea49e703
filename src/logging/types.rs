//! Core logging types: message kinds and the [`Log`] trait.

/// Kind of message passed through a [`Log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Section header.
    Heading,
    /// Regular progress output.
    Info,
    /// Detail shown only with `--verbose` (always written to the log file).
    Debug,
    /// Something the user should look at; processing continues.
    Warn,
    /// A failure for the current item.
    Error,
    /// Row of the link table for an entry that was linked or replaced.
    Linked,
    /// Row of the link table under `--dry-run`.
    Planned,
    /// A finished import-time report, possibly spanning several lines.
    Report,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) routes messages through `tracing`;
/// tests substitute an in-memory implementation so procedures can be
/// checked for what they reported.
pub trait Log: Send + Sync {
    /// Emit `msg` as a message of kind `level`.
    fn log(&self, level: Level, msg: &str);

    /// Log a section header.
    fn heading(&self, msg: &str) {
        self.log(Level::Heading, msg);
    }
    /// Log an informational message.
    fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str) {
        self.log(Level::Debug, msg);
    }
    /// Log a warning message.
    fn warn(&self, msg: &str) {
        self.log(Level::Warn, msg);
    }
    /// Log an error message.
    fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }
    /// Log a link table row for a link that was made.
    fn linked(&self, row: &str) {
        self.log(Level::Linked, row);
    }
    /// Log a link table row under `--dry-run`.
    fn planned(&self, row: &str) {
        self.log(Level::Planned, row);
    }
    /// Log a rendered import-time report.
    fn report(&self, report: &str) {
        self.log(Level::Report, report);
    }
}
