//! Built-in file groups and the selection of optional ones.
use std::collections::BTreeSet;

use super::env::LinkEnv;
use super::file_map::FileMap;
use crate::error::ConfigError;

/// Bash rc files, always linked.
pub const BASH: &str = "bash";
/// Git configuration, always linked.
pub const GIT: &str = "git";
/// Bash-native git prompt script.
pub const GIT_PROMPT: &str = "git-prompt";
/// Starship prompt theme.
pub const STARSHIP: &str = "starship";
/// Xonsh run-control file.
pub const XONSH: &str = "xonsh";

/// Pairs of groups that configure the same thing; enabling both only warns.
pub const OVERLAPPING: &[(&str, &str)] = &[(GIT_PROMPT, STARSHIP)];

/// A named [`FileMap`] that is either always linked or opt-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// Group name, used by `--group` and in `links.toml`.
    pub name: String,
    /// Files belonging to the group.
    pub files: FileMap,
    /// Whether the group must be enabled explicitly.
    pub optional: bool,
}

impl FileGroup {
    /// Create a group.
    #[must_use]
    pub fn new(name: impl Into<String>, files: FileMap, optional: bool) -> Self {
        Self {
            name: name.into(),
            files,
            optional,
        }
    }
}

/// The groups every dotfiles checkout provides.
#[must_use]
pub fn builtin_groups(env: &LinkEnv) -> Vec<FileGroup> {
    vec![
        FileGroup::new(
            BASH,
            FileMap::new(
                [".bashrc", ".bash_aliases", ".bash_profile", ".bash_completion"],
                "bash",
                "",
            ),
            false,
        ),
        FileGroup::new(GIT, FileMap::new([".gitconfig"], "git", ""), false),
        FileGroup::new(
            GIT_PROMPT,
            FileMap::new(["git-prompt.sh"], "bash", env.config_subdir.join("bash")),
            true,
        ),
        FileGroup::new(
            STARSHIP,
            FileMap::new(["starship.toml"], "themes", env.config_subdir.clone()),
            true,
        ),
        FileGroup::new(
            XONSH,
            FileMap::new(["rc.xsh"], "xonsh", env.xonsh_subdir.clone()),
            true,
        ),
    ]
}

/// The set of optional groups enabled for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    enabled: BTreeSet<String>,
}

impl Selection {
    /// Validate `requested` group names against `groups`.
    ///
    /// Naming a group that is always linked is accepted and has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownGroup`] for a name no group carries.
    pub fn resolve<I, S>(requested: I, groups: &[FileGroup]) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut enabled = BTreeSet::new();
        for name in requested {
            let name = name.as_ref();
            if !groups.iter().any(|g| g.name == name) {
                return Err(ConfigError::UnknownGroup {
                    name: name.to_string(),
                    known: groups
                        .iter()
                        .map(|g| g.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                });
            }
            enabled.insert(name.to_string());
        }
        Ok(Self { enabled })
    }

    /// Whether `group` takes part in this run.
    #[must_use]
    pub fn includes(&self, group: &FileGroup) -> bool {
        !group.optional || self.enabled.contains(&group.name)
    }

    /// Whether the group called `name` was explicitly enabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// Overlapping pairs that are both enabled.
    #[must_use]
    pub fn overlaps(&self) -> Vec<(&'static str, &'static str)> {
        OVERLAPPING
            .iter()
            .copied()
            .filter(|(a, b)| self.is_enabled(a) && self.is_enabled(b))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn env() -> LinkEnv {
        LinkEnv {
            home: PathBuf::from("/home/me"),
            config_subdir: PathBuf::from(".config"),
            xonsh_subdir: PathBuf::from(".config/xonsh"),
        }
    }

    fn group<'a>(groups: &'a [FileGroup], name: &str) -> &'a FileGroup {
        groups.iter().find(|g| g.name == name).expect("group exists")
    }

    #[test]
    fn builtin_group_names() {
        let names: Vec<_> = builtin_groups(&env()).into_iter().map(|g| g.name).collect();
        assert_eq!(names, [BASH, GIT, GIT_PROMPT, STARSHIP, XONSH]);
    }

    #[test]
    fn only_bash_and_git_are_mandatory() {
        let groups = builtin_groups(&env());
        let mandatory: Vec<_> = groups
            .iter()
            .filter(|g| !g.optional)
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(mandatory, [BASH, GIT]);
    }

    #[test]
    fn git_prompt_lands_in_config_bash() {
        let groups = builtin_groups(&env());
        let pairs: Vec<_> = group(&groups, GIT_PROMPT).files.relative_pairs().collect();
        assert_eq!(pairs[0].0, PathBuf::from("bash/git-prompt.sh"));
        assert_eq!(pairs[0].1, PathBuf::from(".config/bash/git-prompt.sh"));
    }

    #[test]
    fn starship_and_xonsh_follow_env() {
        let mut e = env();
        e.config_subdir = PathBuf::from("/xdg");
        e.xonsh_subdir = PathBuf::from("/xonsh");
        let groups = builtin_groups(&e);
        let starship: Vec<_> = group(&groups, STARSHIP).files.relative_pairs().collect();
        assert_eq!(starship[0].1, PathBuf::from("/xdg/starship.toml"));
        let xonsh: Vec<_> = group(&groups, XONSH).files.relative_pairs().collect();
        assert_eq!(xonsh[0].0, PathBuf::from("xonsh/rc.xsh"));
        assert_eq!(xonsh[0].1, PathBuf::from("/xonsh/rc.xsh"));
    }

    #[test]
    fn selection_includes_mandatory_and_enabled_groups() {
        let groups = builtin_groups(&env());
        let sel = Selection::resolve([STARSHIP], &groups).unwrap();
        let included: Vec<_> = groups
            .iter()
            .filter(|g| sel.includes(g))
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(included, [BASH, GIT, STARSHIP]);
    }

    #[test]
    fn unknown_group_is_rejected() {
        let groups = builtin_groups(&env());
        let err = Selection::resolve(["zsh"], &groups).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'zsh'"), "unexpected message: {msg}");
        assert!(msg.contains("starship"), "known groups should be listed: {msg}");
    }

    #[test]
    fn overlapping_groups_are_reported() {
        let groups = builtin_groups(&env());
        let sel = Selection::resolve([GIT_PROMPT, STARSHIP], &groups).unwrap();
        assert_eq!(sel.overlaps(), vec![(GIT_PROMPT, STARSHIP)]);
        let single = Selection::resolve([GIT_PROMPT], &groups).unwrap();
        assert!(single.overlaps().is_empty());
    }
}
