//! Resolution of selected file groups into concrete link entries.
use std::path::{Path, PathBuf};

use crate::config::{FileGroup, Selection};

/// One file to link: repository-relative source, home-relative destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Name of the group the file belongs to.
    pub group: String,
    /// Source path relative to the repository root.
    pub source: PathBuf,
    /// Destination path relative to the home directory.
    pub destination: PathBuf,
}

/// Every entry selected for a run, plus the two roots they resolve against.
#[derive(Debug, Clone)]
pub struct LinkPlan {
    /// Dotfiles repository root.
    pub repo: PathBuf,
    /// Home directory.
    pub home: PathBuf,
    /// Entries in group order, then file order within each group.
    pub entries: Vec<LinkEntry>,
}

impl LinkPlan {
    /// Build the plan for the groups `selection` includes.
    #[must_use]
    pub fn new(
        repo: impl Into<PathBuf>,
        home: impl Into<PathBuf>,
        groups: &[FileGroup],
        selection: &Selection,
    ) -> Self {
        let entries = groups
            .iter()
            .filter(|g| selection.includes(g))
            .flat_map(|g| {
                g.files
                    .relative_pairs()
                    .map(|(source, destination)| LinkEntry {
                        group: g.name.clone(),
                        source,
                        destination,
                    })
            })
            .collect();
        Self {
            repo: repo.into(),
            home: home.into(),
            entries,
        }
    }

    /// Absolute path the link for `entry` points to.
    #[must_use]
    pub fn source_path(&self, entry: &LinkEntry) -> PathBuf {
        self.repo.join(&entry.source)
    }

    /// Absolute path where the link for `entry` is created.
    #[must_use]
    pub fn destination_path(&self, entry: &LinkEntry) -> PathBuf {
        self.home.join(&entry.destination)
    }

    /// Column widths `(destination, source)` for aligned rows.
    #[must_use]
    pub fn column_widths(&self) -> (usize, usize) {
        self.entries.iter().fold((0, 0), |(dw, sw), e| {
            (dw.max(display_width(&e.destination)), sw.max(display_width(&e.source)))
        })
    }
}

fn display_width(path: &Path) -> usize {
    path.display().to_string().chars().count()
}
