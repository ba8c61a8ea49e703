//! Command: estimate the import time of a Python module.
use std::num::NonZeroU32;

use anyhow::{Context as _, Result};

use crate::cli::ImportTimeOpts;
use crate::import_time::{self, PythonRegistry, python::resolve_interpreter};
use crate::logging::{Log, Logger};
use crate::platform::Platform;

/// Run the `import-time` command and print the report.
///
/// # Errors
///
/// Returns an error if no interpreter is found, the module cannot be
/// imported, or the interpreter stops answering.
pub fn run(opts: &ImportTimeOpts, log: &Logger) -> Result<()> {
    let runs = NonZeroU32::new(opts.runs).context("--runs must be at least 1")?;

    let python = resolve_interpreter(opts.python.as_deref(), &Platform::detect())?;
    log.debug(&format!("using interpreter {}", python.display()));
    let mut registry = PythonRegistry::spawn(&python)?;

    log.heading(&format!(
        "Estimating import time of '{}' over {runs} run(s)",
        opts.module
    ));
    let date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let report = import_time::estimate(&mut registry, &opts.module, runs, date, log)?;

    log.report(&report.to_string());
    Ok(())
}
