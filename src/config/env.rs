//! Environment-derived link roots.
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::platform::Platform;

/// Config sub-directory used when `XDG_CONFIG_HOME` is unset or empty.
pub const DEFAULT_CONFIG_SUBDIR: &str = ".config";

/// Roots that link destinations are resolved against.
///
/// `config_subdir` and `xonsh_subdir` are relative to `home` unless the
/// corresponding environment variable holds an absolute path, in which case
/// joining onto `home` yields that absolute path unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEnv {
    /// The user's home directory.
    pub home: PathBuf,
    /// `$XDG_CONFIG_HOME`, default `.config`.
    pub config_subdir: PathBuf,
    /// `$XONSH_CONFIG_DIR`, default `<config_subdir>/xonsh`.
    pub xonsh_subdir: PathBuf,
}

impl LinkEnv {
    /// Read the roots from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingHome`] if the home variable is not set.
    pub fn from_env(platform: &Platform) -> Result<Self, ConfigError> {
        Self::from_lookup(platform, |key| std::env::var(key).ok())
    }

    /// Build the roots from an arbitrary variable lookup.
    ///
    /// On Windows `USERPROFILE` is consulted before `HOME`.  Empty values
    /// are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingHome`] if no home variable is set.
    pub fn from_lookup(
        platform: &Platform,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let home = var(platform.home_var())
            .or_else(|| var("HOME"))
            .ok_or(ConfigError::MissingHome(platform.home_var()))?;

        let config_subdir =
            PathBuf::from(var("XDG_CONFIG_HOME").unwrap_or_else(|| DEFAULT_CONFIG_SUBDIR.into()));
        let xonsh_subdir = var("XONSH_CONFIG_DIR")
            .map_or_else(|| config_subdir.join("xonsh"), PathBuf::from);

        Ok(Self {
            home: PathBuf::from(home),
            config_subdir,
            xonsh_subdir,
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::platform::Os;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_only_home_is_set() {
        let env = LinkEnv::from_lookup(&Platform::new(Os::Linux), lookup(&[("HOME", "/home/me")]))
            .unwrap();
        assert_eq!(env.home, PathBuf::from("/home/me"));
        assert_eq!(env.config_subdir, PathBuf::from(".config"));
        assert_eq!(env.xonsh_subdir, PathBuf::from(".config/xonsh"));
    }

    #[test]
    fn xdg_config_home_overrides_config_subdir() {
        let env = LinkEnv::from_lookup(
            &Platform::new(Os::Linux),
            lookup(&[("HOME", "/home/me"), ("XDG_CONFIG_HOME", "/etc/me")]),
        )
        .unwrap();
        assert_eq!(env.config_subdir, PathBuf::from("/etc/me"));
        assert_eq!(env.xonsh_subdir, PathBuf::from("/etc/me/xonsh"));
        assert_eq!(env.home.join(&env.config_subdir), PathBuf::from("/etc/me"));
    }

    #[test]
    fn xonsh_config_dir_is_independent() {
        let env = LinkEnv::from_lookup(
            &Platform::new(Os::Linux),
            lookup(&[("HOME", "/home/me"), ("XONSH_CONFIG_DIR", "/opt/xonsh")]),
        )
        .unwrap();
        assert_eq!(env.config_subdir, PathBuf::from(".config"));
        assert_eq!(env.xonsh_subdir, PathBuf::from("/opt/xonsh"));
    }

    #[test]
    fn empty_xdg_config_home_is_ignored() {
        let env = LinkEnv::from_lookup(
            &Platform::new(Os::Linux),
            lookup(&[("HOME", "/home/me"), ("XDG_CONFIG_HOME", "")]),
        )
        .unwrap();
        assert_eq!(env.config_subdir, PathBuf::from(".config"));
    }

    #[test]
    fn missing_home_is_an_error() {
        let err = LinkEnv::from_lookup(&Platform::new(Os::Linux), lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingHome("HOME")));
    }

    #[test]
    fn windows_prefers_userprofile() {
        let env = LinkEnv::from_lookup(
            &Platform::new(Os::Windows),
            lookup(&[("HOME", "/msys/home"), ("USERPROFILE", r"C:\Users\me")]),
        )
        .unwrap();
        assert_eq!(env.home, PathBuf::from(r"C:\Users\me"));
    }

    #[test]
    fn windows_falls_back_to_home() {
        let env = LinkEnv::from_lookup(&Platform::new(Os::Windows), lookup(&[("HOME", "/msys/home")]))
            .unwrap();
        assert_eq!(env.home, PathBuf::from("/msys/home"));
    }
}
