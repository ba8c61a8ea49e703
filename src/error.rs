//! Domain-specific error types for the environment setup tool.
//!
//! Internal modules return typed errors (e.g., [`ConfigError`], [`LinkError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ConfigError      environment, links.toml, group selection
//! LinkError        directory creation, removal, symlink creation
//! RegistryError    talking to the interpreter behind a module registry
//! ImportTimeError  import-time estimation (wraps RegistryError)
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Windows `ERROR_PRIVILEGE_NOT_HELD`, returned by `CreateSymbolicLinkW`
/// when the process is neither elevated nor running in Developer Mode.
pub const WIN_ERROR_PRIVILEGE_NOT_HELD: i32 = 1314;

/// Errors that arise while resolving the link configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither `HOME` nor (on Windows) `USERPROFILE` is set.
    #[error("cannot determine home directory: {0} is not set")]
    MissingHome(&'static str),

    /// `links.toml` exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// `links.toml` is not valid TOML or does not match the expected schema.
    #[error("invalid config file {path}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A group declared in `links.toml` lists no files.
    #[error("group '{0}' does not list any files")]
    EmptyGroup(String),

    /// A group name passed on the command line is not recognised.
    #[error("unknown file group '{name}': expected one of {known}")]
    UnknownGroup {
        /// Name that was requested.
        name: String,
        /// Comma-separated list of recognised group names.
        known: String,
    },
}

/// Fatal errors raised while creating a symlink.
///
/// Per-file conditions such as "destination already exists" are not errors;
/// they are reported as outcomes and processing continues.
#[derive(Error, Debug)]
pub enum LinkError {
    /// Windows refused to create the symlink for lack of privileges.
    #[error(
        "creating symlink {link} requires elevated privileges on Windows: \
         start the console as administrator (or enable Developer Mode) and run envsetup again"
    )]
    PrivilegeRequired {
        /// The link that could not be created.
        link: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// Any other filesystem failure.
    #[error("failed to {action} {path}: {source}")]
    Io {
        /// What was being attempted (e.g. `"create parent directory"`).
        action: &'static str,
        /// Path the action was applied to.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },
}

impl LinkError {
    /// Build an [`LinkError::Io`] for `action` on `path`.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Errors reported by a [`ModuleRegistry`](crate::import_time::ModuleRegistry).
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Importing the module raised an `ImportError` inside the interpreter.
    #[error("import of '{module}' failed: {reason}")]
    ImportFailed {
        /// Module that failed to import.
        module: String,
        /// Message reported by the interpreter.
        reason: String,
    },

    /// The interpreter could not be found on `PATH`.
    #[error("python interpreter '{program}' not found: {source}")]
    InterpreterNotFound {
        /// Program name or path that was looked up.
        program: String,
        /// Lookup failure.
        source: which::Error,
    },

    /// The interpreter process could not be started.
    #[error("failed to start interpreter {program}: {source}")]
    Spawn {
        /// Program that was executed.
        program: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// Reading from or writing to the interpreter failed.
    #[error("lost connection to interpreter: {0}")]
    Transport(#[from] std::io::Error),

    /// The interpreter answered with something unexpected.
    #[error("interpreter protocol error: {0}")]
    Protocol(String),
}

/// Errors that arise while estimating import times.
#[derive(Error, Debug)]
pub enum ImportTimeError {
    /// The module cannot be imported in the active environment.
    #[error(
        "couldn't import module '{module}'! Make sure it is installed in your active Python environment ({reason})"
    )]
    ModuleNotImportable {
        /// Module that was requested.
        module: String,
        /// Why the import failed.
        reason: String,
    },

    /// The module was still present in the registry after being purged.
    #[error("module '{0}' is still loaded after purging it from the module registry")]
    StillLoaded(String),

    /// The registry itself failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
