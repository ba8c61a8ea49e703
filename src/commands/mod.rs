//! Top-level subcommand orchestration.
pub mod completions;
pub mod import_time;
pub mod link;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;

/// Environment variable naming the dotfiles repository root.
pub const ROOT_ENV: &str = "ENVSETUP_ROOT";

/// Whether `dir` looks like a dotfiles repository.
#[must_use]
pub fn is_repo_root(dir: &Path) -> bool {
    dir.join("bash").is_dir()
}

/// Determine the dotfiles repository root.
///
/// Checked in order: `--root`, `ENVSETUP_ROOT`, the directory holding the
/// binary (including a `target/<profile>/` build inside the repository),
/// then the current directory.  The result is absolute; a relative
/// `--root` or `ENVSETUP_ROOT` is taken relative to the current directory.
///
/// # Errors
///
/// Returns an error if no candidate looks like a dotfiles repository.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    find_root(
        global.root.as_deref(),
        std::env::var_os(ROOT_ENV).map(PathBuf::from),
        std::env::current_exe().ok(),
        &std::env::current_dir()?,
    )
}

fn find_root(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    exe: Option<PathBuf>,
    cwd: &Path,
) -> Result<PathBuf> {
    // Link targets are written as-is, so a relative root would dangle.
    let given = explicit
        .map(Path::to_path_buf)
        .or_else(|| from_env.filter(|r| !r.as_os_str().is_empty()));
    if let Some(root) = given {
        return dunce::canonicalize(cwd.join(&root))
            .with_context(|| format!("dotfiles root {} does not exist", root.display()));
    }

    if let Some(exe) = exe
        && let Some(parent) = exe.parent()
    {
        let candidates = [
            parent.to_path_buf(),   // binary next to the dotfiles
            parent.join(".."),      // bin/ → repo root
            parent.join("../.."),   // target/release/ → repo root
        ];
        for candidate in &candidates {
            if is_repo_root(candidate) {
                return Ok(dunce::canonicalize(candidate)?);
            }
        }
    }

    if is_repo_root(cwd) {
        return Ok(cwd.to_path_buf());
    }

    anyhow::bail!("cannot determine dotfiles root. Use --root or set {ROOT_ENV}");
}
