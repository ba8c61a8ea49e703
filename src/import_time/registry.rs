//! The module-registry seam between the estimator and an interpreter.
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::RegistryError;

/// Identity of the interpreter behind a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterInfo {
    /// Full version string as reported by the interpreter.
    pub version: String,
    /// Path of the running interpreter executable.
    pub executable: PathBuf,
}

/// Scoped handle on an interpreter's table of loaded modules.
///
/// Every method is a side effect on that table: importing adds entries,
/// purging removes them.  Durations are measured inside the interpreter.
#[cfg_attr(test, mockall::automock)]
pub trait ModuleRegistry {
    /// Version and executable of the interpreter.
    ///
    /// # Errors
    ///
    /// Returns an error if the interpreter cannot be queried.
    fn interpreter(&mut self) -> Result<InterpreterInfo, RegistryError>;

    /// Import `name` once and return how long the import statement took.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ImportFailed`] if the module cannot be
    /// imported.
    fn import(&mut self, name: &str) -> Result<Duration, RegistryError>;

    /// Remove `name` and every `name.*` submodule from the registry.
    ///
    /// Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the interpreter cannot be reached.
    fn purge(&mut self, name: &str) -> Result<usize, RegistryError>;

    /// Names of every module currently loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the interpreter cannot be reached.
    fn loaded_modules(&mut self) -> Result<BTreeSet<String>, RegistryError>;

    /// Import `name` once untimed, then time `number` further imports as a
    /// single loop and return the total.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ImportFailed`] if the module cannot be
    /// imported.
    fn import_repeatedly(&mut self, name: &str, number: u32) -> Result<Duration, RegistryError>;
}

/// Whether `module` is `root` itself or one of its dotted submodules.
#[must_use]
pub fn is_within(module: &str, root: &str) -> bool {
    module
        .strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}
