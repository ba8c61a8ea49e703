//! Log file location and timestamps.
use std::ffi::OsString;
use std::path::PathBuf;

use crate::platform::Platform;

/// Timestamp written in the run header of a log file.
pub(super) const HEADER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Timestamp prefixed to every log file line.
pub(super) const LINE_TIME_FORMAT: &str = "%H:%M:%S";

/// Directory holding the per-command log files.
///
/// `$XDG_CACHE_HOME/envsetup`, falling back to `<home>/.cache/envsetup`.
/// `None` when neither variable is set.
fn log_dir(lookup: impl Fn(&str) -> Option<OsString>, home_var: &str) -> Option<PathBuf> {
    let cache = match lookup("XDG_CACHE_HOME").filter(|v| !v.is_empty()) {
        Some(cache) => PathBuf::from(cache),
        None => PathBuf::from(lookup(home_var)?).join(".cache"),
    };
    Some(cache.join("envsetup"))
}

/// Path of the log file for `command` (`link.log`, `import-time.log`, ...).
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = log_dir(|var| std::env::var_os(var), Platform::detect().home_var())?;
    Some(dir.join(format!("{command}.log")))
}

/// Current local time rendered with `format`.
pub(super) fn now(format: &str) -> String {
    chrono::Local::now().format(format).to_string()
}
