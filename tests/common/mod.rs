// Shared helpers for integration tests.
//
// Provides a temporary dotfiles repository next to a temporary home
// directory, an in-memory `Log`, and a simulated module registry, so each
// integration test can run in isolation without touching the real home
// directory or needing a Python interpreter.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use envsetup_cli::config::LinkEnv;
use envsetup_cli::error::RegistryError;
use envsetup_cli::import_time::{InterpreterInfo, ModuleRegistry, is_within};
use envsetup_cli::logging::{Level, Log};

/// Every file the built-in groups expect in a dotfiles repository.
pub const DOTFILES: &[&str] = &[
    "bash/.bashrc",
    "bash/.bash_aliases",
    "bash/.bash_profile",
    "bash/.bash_completion",
    "bash/git-prompt.sh",
    "git/.gitconfig",
    "themes/starship.toml",
    "xonsh/rc.xsh",
];

/// A dotfiles repository and a home directory, both under one
/// [`tempfile::TempDir`] that is deleted on drop.
pub struct LinkTestContext {
    tmp: tempfile::TempDir,
}

impl LinkTestContext {
    /// Create a context whose repository holds every file in [`DOTFILES`].
    pub fn new() -> Self {
        TestContextBuilder::new().with_files(DOTFILES).build()
    }

    /// Path to the repository root.
    pub fn repo(&self) -> PathBuf {
        self.tmp.path().join("repo")
    }

    /// Path to the home directory.
    pub fn home(&self) -> PathBuf {
        self.tmp.path().join("home")
    }

    /// Scratch directory outside both roots (e.g. for `XDG_CACHE_HOME`).
    pub fn scratch(&self) -> PathBuf {
        self.tmp.path().join("scratch")
    }

    /// Link environment rooted at [`Self::home`] with default sub-directories.
    pub fn env(&self) -> LinkEnv {
        LinkEnv {
            home: self.home(),
            config_subdir: PathBuf::from(".config"),
            xonsh_subdir: PathBuf::from(".config/xonsh"),
        }
    }

    /// Target of the symlink at `rel` under the home directory.
    pub fn link_target(&self, rel: &str) -> PathBuf {
        std::fs::read_link(self.home().join(rel)).expect("read link")
    }
}

/// Fluent builder for [`LinkTestContext`].
pub struct TestContextBuilder {
    ctx: LinkTestContext,
}

impl TestContextBuilder {
    /// Begin with an empty repository and an empty home directory.
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let ctx = LinkTestContext { tmp };
        for dir in [ctx.repo(), ctx.home(), ctx.scratch()] {
            std::fs::create_dir_all(dir).expect("create test dir");
        }
        Self { ctx }
    }

    /// Create each repository-relative file, with its path as content.
    pub fn with_files(self, files: &[&str]) -> Self {
        for file in files {
            let path = self.ctx.repo().join(file);
            std::fs::create_dir_all(path.parent().expect("parent")).expect("create dir");
            std::fs::write(&path, file).expect("write dotfile");
        }
        self
    }

    /// Write `links.toml` into the repository.
    pub fn with_links_toml(self, content: &str) -> Self {
        std::fs::write(self.ctx.repo().join("links.toml"), content).expect("write links.toml");
        self
    }

    /// Write `content` to the home-relative file `rel`.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        let path = self.ctx.home().join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create dir");
        std::fs::write(path, content).expect("write home file");
        self
    }

    /// Finalise and return the context.
    pub fn build(self) -> LinkTestContext {
        self.ctx
    }
}

/// [`Log`] that keeps every message in memory.
#[derive(Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<(Level, String)>>,
}

impl RecordingLog {
    /// Messages logged at `level`, in order.
    pub fn at(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .expect("log lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Log for RecordingLog {
    fn log(&self, level: Level, msg: &str) {
        self.lines
            .lock()
            .expect("log lock")
            .push((level, msg.to_string()));
    }
}

/// Module registry simulating an interpreter in which only `package` (and
/// its submodules) can be imported.
///
/// A cold import of `package` loads `package` plus `dependencies` and
/// takes `cold`; a repeated import takes `warm`.
pub struct SimulatedRegistry {
    package: String,
    dependencies: Vec<String>,
    loaded: BTreeSet<String>,
    cold: Duration,
    warm: Duration,
    /// Number of cold imports performed so far.
    pub cold_imports: usize,
}

impl SimulatedRegistry {
    /// A registry where `package` pulls in `dependencies` when imported.
    pub fn new(package: &str, dependencies: &[&str]) -> Self {
        Self {
            package: package.to_string(),
            dependencies: dependencies.iter().map(|d| (*d).to_string()).collect(),
            loaded: ["builtins", "sys", "os"].map(String::from).into(),
            cold: Duration::from_millis(12),
            warm: Duration::from_micros(3),
            cold_imports: 0,
        }
    }

    /// Whether `name` is currently loaded.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains(name)
    }
}

impl ModuleRegistry for SimulatedRegistry {
    fn interpreter(&mut self) -> Result<InterpreterInfo, RegistryError> {
        Ok(InterpreterInfo {
            version: "3.12.4 (main, Jun  6 2024, 18:26:44) [GCC 13.2.0]".to_string(),
            executable: Path::new("/opt/python/bin/python3").to_path_buf(),
        })
    }

    fn import(&mut self, name: &str) -> Result<Duration, RegistryError> {
        if !is_within(name, &self.package) {
            return Err(RegistryError::ImportFailed {
                module: name.to_string(),
                reason: format!("ModuleNotFoundError: No module named '{name}'"),
            });
        }
        if self.loaded.contains(name) {
            return Ok(self.warm);
        }
        self.cold_imports += 1;
        self.loaded.insert(name.to_string());
        self.loaded.extend(self.dependencies.iter().cloned());
        Ok(self.cold)
    }

    fn purge(&mut self, name: &str) -> Result<usize, RegistryError> {
        let before = self.loaded.len();
        self.loaded.retain(|m| !is_within(m, name));
        Ok(before - self.loaded.len())
    }

    fn loaded_modules(&mut self) -> Result<BTreeSet<String>, RegistryError> {
        Ok(self.loaded.clone())
    }

    fn import_repeatedly(&mut self, name: &str, number: u32) -> Result<Duration, RegistryError> {
        self.import(name)?;
        Ok(self.warm * number)
    }
}

/// Path of a Python interpreter on `PATH`, if there is one.
pub fn python_on_path() -> Option<PathBuf> {
    ["python3", "python"]
        .into_iter()
        .find_map(|p| which::which(p).ok())
}
