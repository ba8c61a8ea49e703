//! Mapping of repository files to their location under the home directory.
use std::path::PathBuf;

/// A logical group of file names sharing a source and a destination
/// sub-directory.
///
/// `repo_subdir` is relative to the repository root and `home_subdir` to
/// the home directory (empty means the home directory itself).  Names are
/// kept in declaration order with duplicates removed, so every name
/// resolves to a distinct source and a distinct destination path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMap {
    file_names: Vec<String>,
    repo_subdir: PathBuf,
    home_subdir: PathBuf,
}

impl FileMap {
    /// Create a mapping for `file_names` from `repo_subdir` to `home_subdir`.
    #[must_use]
    pub fn new<I, S>(file_names: I, repo_subdir: impl Into<PathBuf>, home_subdir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in file_names {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Self {
            file_names: names,
            repo_subdir: repo_subdir.into(),
            home_subdir: home_subdir.into(),
        }
    }

    /// File names in declaration order.
    #[must_use]
    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }

    /// Yield `(repo-relative source, home-relative destination)` for every file.
    pub fn relative_pairs(&self) -> impl Iterator<Item = (PathBuf, PathBuf)> + '_ {
        self.file_names
            .iter()
            .map(|name| (self.repo_subdir.join(name), self.home_subdir.join(name)))
    }
}
