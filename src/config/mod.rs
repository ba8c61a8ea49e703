//! Link configuration: environment roots, file groups, and `links.toml`.
pub mod env;
pub mod file_map;
pub mod groups;
pub mod toml_loader;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub use env::LinkEnv;
pub use file_map::FileMap;
pub use groups::{FileGroup, Selection, builtin_groups};

/// Optional per-repository file listing extra or replacement groups.
pub const LINKS_FILE: &str = "links.toml";

/// Shape of `links.toml`.
///
/// ```toml
/// [groups.nvim]
/// files = ["init.lua"]
/// source = "nvim"
/// target = ".config/nvim"
/// optional = true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinksFile {
    #[serde(default)]
    groups: BTreeMap<String, GroupSpec>,
}

/// One `[groups.<name>]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupSpec {
    files: Vec<String>,
    source: PathBuf,
    /// Relative to the home directory; empty or absent means home itself.
    #[serde(default)]
    target: PathBuf,
    #[serde(default = "default_optional")]
    optional: bool,
}

const fn default_optional() -> bool {
    true
}

/// Load the groups available in the repository at `root`.
///
/// Starts from [`builtin_groups`]; every group in `links.toml` replaces the
/// built-in group of the same name or is appended after them.
///
/// # Errors
///
/// Returns an error if `links.toml` cannot be read or parsed, or a group in
/// it lists no files.
pub fn load_groups(root: &Path, env: &LinkEnv) -> Result<Vec<FileGroup>, ConfigError> {
    let mut groups = builtin_groups(env);
    let file: LinksFile = toml_loader::load_config(&root.join(LINKS_FILE))?;

    for (name, spec) in file.groups {
        if spec.files.is_empty() {
            return Err(ConfigError::EmptyGroup(name));
        }
        let group = FileGroup::new(
            name,
            FileMap::new(spec.files, spec.source, spec.target),
            spec.optional,
        );
        match groups.iter_mut().find(|g| g.name == group.name) {
            Some(existing) => *existing = group,
            None => groups.push(group),
        }
    }

    Ok(groups)
}

/// Shared test helpers for config unit tests.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub mod test_helpers {
    use super::LinkEnv;
    use std::path::{Path, PathBuf};

    /// A [`LinkEnv`] rooted at `home` with default sub-directories.
    #[must_use]
    pub fn env_at(home: &Path) -> LinkEnv {
        LinkEnv {
            home: home.to_path_buf(),
            config_subdir: PathBuf::from(".config"),
            xonsh_subdir: PathBuf::from(".config/xonsh"),
        }
    }

    /// Write `content` as `links.toml` into a fresh temp dir.
    pub fn repo_with_links_toml(content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join(super::LINKS_FILE), content).expect("write links.toml");
        dir
    }
}
