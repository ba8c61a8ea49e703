//! Python import-time estimator.
//!
//! Measures how long importing a module takes the first time (cold, after
//! purging it from the module registry) and on subsequent imports (a cache
//! hit), and counts the modules a fresh import pulls in.  All interpreter
//! access goes through [`ModuleRegistry`].
pub mod python;
mod registry;
pub mod report;
pub mod stats;

use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::{ImportTimeError, RegistryError};
use crate::logging::Log;

pub use python::PythonRegistry;
pub use registry::{InterpreterInfo, ModuleRegistry, is_within};
pub use report::ImportTimeReport;

/// Unit every sample is expressed in.
pub const UNIT_OF_MEASURE: &str = "ms";

/// Number of runs when none is requested.
pub const DEFAULT_RUNS: u32 = 100;

/// Samples collected for one module.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportTimings {
    /// Module under test.
    pub module_name: String,
    /// Unit of every value below.
    pub unit_of_measure: &'static str,
    /// One cold import per run.
    pub initial: Vec<f64>,
    /// The import immediately following each cold import.
    pub subsequent: Vec<f64>,
    /// Mean of back-to-back imports timed as one loop.
    pub subsequent_timeit_mean: f64,
}

/// Modules newly loaded by one fresh import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleCounts {
    /// Top-level modules.
    pub modules: usize,
    /// Dotted submodules.
    pub submodules: usize,
}

/// Fail early when `module` cannot be imported at all.
///
/// # Errors
///
/// Returns [`ImportTimeError::ModuleNotImportable`] if the import fails,
/// or any registry failure.
pub fn ensure_importable(
    registry: &mut dyn ModuleRegistry,
    module: &str,
) -> Result<(), ImportTimeError> {
    registry.import(module).map(drop).map_err(|e| not_importable(module, e))
}

/// Collect `runs` initial and subsequent samples plus the timeit-style mean.
///
/// # Errors
///
/// Returns an error if any import or purge fails.
#[allow(clippy::cast_precision_loss)]
pub fn measure(
    registry: &mut dyn ModuleRegistry,
    module: &str,
    runs: NonZeroU32,
) -> Result<ImportTimings, ImportTimeError> {
    let n = runs.get();
    let mut initial = Vec::with_capacity(n as usize);
    let mut subsequent = Vec::with_capacity(n as usize);

    for _ in 0..n {
        registry.purge(module)?;
        initial.push(millis(registry.import(module)?));
        subsequent.push(millis(registry.import(module)?));
    }

    registry.purge(module)?;
    let total = registry.import_repeatedly(module, n)?;

    Ok(ImportTimings {
        module_name: module.to_string(),
        unit_of_measure: UNIT_OF_MEASURE,
        initial,
        subsequent,
        subsequent_timeit_mean: millis(total) / f64::from(n),
    })
}

/// Count the top-level modules and submodules one fresh import of `module`
/// adds to the registry.
///
/// # Errors
///
/// Returns [`ImportTimeError::StillLoaded`] if purging did not unload
/// `module`, or any registry failure.
pub fn count_imported_modules(
    registry: &mut dyn ModuleRegistry,
    module: &str,
) -> Result<ModuleCounts, ImportTimeError> {
    registry.purge(module)?;
    let before = registry.loaded_modules()?;
    if before.contains(module) {
        return Err(ImportTimeError::StillLoaded(module.to_string()));
    }

    registry.import(module)?;
    let after = registry.loaded_modules()?;

    let (submodules, modules): (Vec<&String>, Vec<&String>) =
        after.difference(&before).partition(|m| m.contains('.'));

    Ok(ModuleCounts {
        modules: modules.len(),
        submodules: submodules.len(),
    })
}

/// Run the full estimate for `module` and assemble its report.
///
/// `date` is printed as is.
///
/// # Errors
///
/// Returns [`ImportTimeError::ModuleNotImportable`] if the module cannot be
/// imported, or any failure of the steps above.
pub fn estimate(
    registry: &mut dyn ModuleRegistry,
    module: &str,
    runs: NonZeroU32,
    date: String,
    log: &dyn Log,
) -> Result<ImportTimeReport, ImportTimeError> {
    let interpreter = registry.interpreter()?;
    log.debug(&format!(
        "interpreter {} ({})",
        interpreter.executable.display(),
        interpreter.version
    ));

    ensure_importable(registry, module)?;

    log.debug(&format!("timing {runs} imports of '{module}'"));
    let timings = measure(registry, module, runs)?;

    let counts = count_imported_modules(registry, module)?;
    log.debug(&format!(
        "'{module}' loads {} module(s) and {} submodule(s)",
        counts.modules, counts.submodules
    ));

    Ok(ImportTimeReport {
        interpreter,
        date,
        timings,
        counts,
    })
}

#[allow(clippy::cast_precision_loss)]
fn millis(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}

fn not_importable(module: &str, err: RegistryError) -> ImportTimeError {
    match err {
        RegistryError::ImportFailed { reason, .. } => ImportTimeError::ModuleNotImportable {
            module: module.to_string(),
            reason,
        },
        other => other.into(),
    }
}
