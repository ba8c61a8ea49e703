//! Structured logger backed by `tracing`.
use std::path::PathBuf;

use super::subscriber::target;
use super::types::{Level, Log};
use super::utils::log_file_path;

/// Logger that routes envsetup output through `tracing`.
///
/// Each [`Level`] maps to an event target, so the console and the
/// per-command log file at `$XDG_CACHE_HOME/envsetup/<command>.log` can
/// render link rows, dry-run rows and import-time reports differently.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display at the end of a run.  The log
    /// file itself is created by [`init_subscriber`](super::subscriber::init_subscriber);
    /// this constructor does not write to the file.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Point the user at the log file (console only).
    pub fn print_log_location(&self) {
        if let Some(path) = &self.log_file {
            tracing::info!(target: target::LOG_FILE, "{}", path.display());
        }
    }
}

impl Log for Logger {
    fn log(&self, level: Level, msg: &str) {
        match level {
            Level::Heading => tracing::info!(target: target::HEADING, "{msg}"),
            Level::Info => tracing::info!("{msg}"),
            Level::Debug => tracing::debug!("{msg}"),
            Level::Warn => tracing::warn!("{msg}"),
            Level::Error => tracing::error!("{msg}"),
            Level::Linked => tracing::info!(target: target::LINKED, "{msg}"),
            Level::Planned => tracing::info!(target: target::PLANNED, "{msg}"),
            Level::Report => tracing::info!(target: target::REPORT, "{msg}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    fn contents(tmp: &tempfile::TempDir) -> String {
        fs::read_to_string(tmp.path().join("envsetup/test.log")).unwrap()
    }

    #[test]
    fn log_file_is_created_with_header() {
        let (_log, tmp, _guard) = isolated_logger();
        assert!(contents(&tmp).contains("envsetup "), "run header should be written");
    }

    #[test]
    fn debug_always_written_to_file() {
        let (log, tmp, _guard) = isolated_logger();
        let marker = format!("debug-marker-{}", std::process::id());
        log.debug(&marker);
        let text = contents(&tmp);
        assert!(text.contains("[debug]"));
        assert!(text.contains(&marker), "debug messages should always appear in the log file");
    }

    #[test]
    fn link_error_row_written_with_error_tag() {
        let (log, tmp, _guard) = isolated_logger();
        log.error(".bashrc --> bash/.bashrc   file already exists");
        let text = contents(&tmp);
        assert!(text.contains("[error] .bashrc --> bash/.bashrc   file already exists"));
    }

    #[test]
    fn linked_and_planned_rows_are_distinguished() {
        let (log, tmp, _guard) = isolated_logger();
        log.linked(".bashrc --> bash/.bashrc   SUCCESS.");
        log.planned(".gitconfig --> git/.gitconfig   would link");
        let text = contents(&tmp);
        assert!(text.contains("[link] .bashrc --> bash/.bashrc   SUCCESS."));
        assert!(text.contains("[planned] .gitconfig --> git/.gitconfig   would link"));
    }

    #[test]
    fn heading_written_with_arrow() {
        let (log, tmp, _guard) = isolated_logger();
        log.heading("Creating links");
        assert!(contents(&tmp).contains("==> Creating links"));
    }

    #[test]
    fn report_is_written_line_by_line() {
        let (log, tmp, _guard) = isolated_logger();
        log.report("Module under test: json\n  Unit-of-Measure: ms");
        let text = contents(&tmp);
        assert!(text.contains("[report] Module under test: json\n"));
        assert!(text.contains("[report]   Unit-of-Measure: ms\n"));
    }

    #[test]
    fn log_location_stays_out_of_the_file() {
        let (log, tmp, _guard) = isolated_logger();
        log.print_log_location();
        assert!(!contents(&tmp).contains("test.log"));
    }
}
