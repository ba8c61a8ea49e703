//! Command: print shell completions.
use std::io::Write;

use clap::CommandFactory as _;

use crate::cli::{Cli, CompletionsOpts};

/// Write the completion script for `opts.shell` to `out`.
pub fn write(opts: &CompletionsOpts, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(opts.shell, &mut cmd, name, out);
}

/// Print the completion script for `opts.shell` to stdout.
pub fn run(opts: &CompletionsOpts) {
    write(opts, &mut std::io::stdout());
}
