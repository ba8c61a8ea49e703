//! Symlink resource.
use std::io;
use std::path::{Path, PathBuf};

use super::{Resource, ResourceChange, ResourceState};
use crate::error::{LinkError, WIN_ERROR_PRIVILEGE_NOT_HELD};

/// A symlink resource that can be checked and applied.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// Whether something (including a dangling link) occupies the target path.
    #[must_use]
    pub fn target_occupied(&self) -> bool {
        self.target.symlink_metadata().is_ok()
    }
}

impl Resource for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn current_state(&self) -> ResourceState {
        let Ok(meta) = self.target.symlink_metadata() else {
            return ResourceState::Missing;
        };

        if meta.file_type().is_symlink() {
            return match std::fs::read_link(&self.target) {
                Ok(existing) if paths_equal(&existing, &self.source) => ResourceState::Correct,
                // dangling links count as missing
                _ if !self.target.exists() => ResourceState::Missing,
                Ok(existing) => ResourceState::Incorrect {
                    current: format!("points to {}", existing.display()),
                },
                Err(e) => ResourceState::Incorrect {
                    current: format!("unreadable link: {e}"),
                },
            };
        }

        if meta.is_dir() {
            ResourceState::Invalid {
                reason: "target is a real directory".to_string(),
            }
        } else {
            ResourceState::Incorrect {
                current: "target is a regular file".to_string(),
            }
        }
    }

    fn apply(&self) -> Result<ResourceChange, LinkError> {
        super::fs::ensure_parent_dir(&self.target)?;

        // a dangling leftover is removed but does not count as a replacement
        let replaced = self.target.exists();
        if self.target_occupied() {
            super::fs::remove_existing(&self.target)?;
        }

        create_symlink(&self.source, &self.target)?;

        Ok(if replaced {
            ResourceChange::Replaced
        } else {
            ResourceChange::Applied
        })
    }
}

/// Compare two paths for equality, handling UNC prefix normalization on Windows.
fn paths_equal(a: &Path, b: &Path) -> bool {
    let normalize = |p: &Path| -> PathBuf {
        #[cfg(windows)]
        {
            let s = p.to_string_lossy();
            if let Some(stripped) = s.strip_prefix(r"\\?\") {
                return PathBuf::from(stripped);
            }
        }
        p.to_path_buf()
    };

    normalize(a) == normalize(b)
}

/// Create a symlink at `link` pointing to `target`.
fn create_symlink(target: &Path, link: &Path) -> Result<(), LinkError> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(target, link);

    #[cfg(windows)]
    let result = if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    };

    result.map_err(|e| symlink_error(e, link, cfg!(windows)))
}

/// Translate a failed symlink creation into a [`LinkError`].
///
/// Windows reports `ERROR_PRIVILEGE_NOT_HELD` when the console is not
/// elevated; that case gets its own variant with instructions for the user.
fn symlink_error(err: io::Error, link: &Path, on_windows: bool) -> LinkError {
    if on_windows && err.raw_os_error() == Some(WIN_ERROR_PRIVILEGE_NOT_HELD) {
        LinkError::PrivilegeRequired {
            link: link.to_path_buf(),
            source: err,
        }
    } else {
        LinkError::io("create symlink", link, err)
    }
}
