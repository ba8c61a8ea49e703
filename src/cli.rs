//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::import_time::DEFAULT_RUNS;

/// Top-level CLI entry point for the environment setup tool.
#[derive(Parser, Debug)]
#[command(
    name = "envsetup",
    about = "Link dotfiles into the home directory and measure Python import times",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override dotfiles root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Symlink dotfiles from the repository into the home directory
    Link(LinkOpts),
    /// Estimate how long importing a Python module takes
    ImportTime(ImportTimeOpts),
    /// Print shell completions to stdout
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the per-command log file.
    #[must_use]
    pub const fn log_name(&self) -> &'static str {
        match self {
            Self::Link(_) => "link",
            Self::ImportTime(_) => "import-time",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `link` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct LinkOpts {
    /// Also link the bash git prompt script
    #[arg(short = 'g', long = "link_git_prompt", visible_alias = "link-git-prompt")]
    pub link_git_prompt: bool,

    /// Also link the starship prompt theme
    #[arg(
        short = 's',
        long = "link_starship_config",
        visible_alias = "link-starship-config"
    )]
    pub link_starship_config: bool,

    /// Also link the xonsh run-control file
    #[arg(
        short = 'x',
        long = "link_xonsh_config",
        visible_alias = "link-xonsh-config"
    )]
    pub link_xonsh_config: bool,

    /// Replace files that already exist at the destination
    #[arg(short, long)]
    pub force: bool,

    /// Enable additional optional groups by name
    #[arg(long = "group", value_delimiter = ',', value_name = "NAME")]
    pub groups: Vec<String>,
}

impl LinkOpts {
    /// Every optional group requested, flags first, in a stable order.
    #[must_use]
    pub fn requested_groups(&self) -> Vec<String> {
        use crate::config::groups::{GIT_PROMPT, STARSHIP, XONSH};

        [
            (self.link_git_prompt, GIT_PROMPT),
            (self.link_starship_config, STARSHIP),
            (self.link_xonsh_config, XONSH),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then(|| name.to_string()))
        .chain(self.groups.iter().cloned())
        .collect()
    }
}

/// Options for the `import-time` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ImportTimeOpts {
    /// Module to import, e.g. `json` or `xml.etree.ElementTree`
    pub module: String,

    /// Number of runs to compute statistics over
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_RUNS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub runs: u32,

    /// Python interpreter to run (name on PATH or path)
    #[arg(long, env = "ENVSETUP_PYTHON")]
    pub python: Option<PathBuf>,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
