//! Idempotent resource primitives (check + apply pattern).
pub mod fs;
pub mod symlink;

use crate::error::LinkError;

pub use symlink::SymlinkResource;

/// State of a resource on disk.
///
/// # Examples
///
/// ```
/// use envsetup_cli::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "/other/path".into() };
///
/// assert_ne!(missing, correct);
/// assert_ne!(wrong, correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist (or is only a dangling leftover).
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// Description of what is there now.
        current: String,
    },
    /// Resource cannot be applied (a real directory is in the way).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created where nothing (or only a dangling link) was.
    Applied,
    /// A live entry was removed and the resource created in its place.
    Replaced,
}

/// Unified interface for resources that can be checked and applied.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    fn current_state(&self) -> ResourceState;

    /// Bring the resource into the desired state, replacing whatever is there.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures
    /// or missing privileges.
    fn apply(&self) -> Result<ResourceChange, LinkError>;
}
