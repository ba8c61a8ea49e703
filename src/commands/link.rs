//! Command: symlink dotfiles into the home directory.
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, LinkOpts};
use crate::config::{self, LinkEnv, Selection};
use crate::link::{self, LinkOptions, LinkPlan, LinkReport};
use crate::logging::{Log, Logger};
use crate::platform::Platform;

/// Run the `link` command.
///
/// Per-file problems (existing destination, missing source) are reported
/// and do not fail the command.
///
/// # Errors
///
/// Returns an error if the repository root or home directory cannot be
/// determined, the configuration is invalid, or a filesystem operation
/// fails while linking.
pub fn run(global: &GlobalOpts, opts: &LinkOpts, log: &Logger) -> Result<()> {
    let platform = Platform::detect();
    let root = super::resolve_root(global)?;
    log.debug(&format!("dotfiles root: {}", root.display()));

    let env = LinkEnv::from_env(&platform)?;
    let report = link_from(&root, &env, opts, global.dry_run, log)?;

    log.heading(&report.summary(global.dry_run));
    log.print_log_location();
    Ok(())
}

/// Link the groups selected by `opts` from `root` into `env.home`.
///
/// # Errors
///
/// Returns an error if `links.toml` is invalid, a requested group is
/// unknown, or linking hits a filesystem failure.
pub fn link_from(
    root: &Path,
    env: &LinkEnv,
    opts: &LinkOpts,
    dry_run: bool,
    log: &dyn Log,
) -> Result<LinkReport> {
    let groups = config::load_groups(root, env)
        .with_context(|| format!("loading file groups from {}", root.display()))?;
    let selection = Selection::resolve(opts.requested_groups(), &groups)?;

    for (a, b) in selection.overlaps() {
        log.warn(&format!(
            "both '{a}' and '{b}' are enabled; they configure the same prompt"
        ));
    }

    let plan = LinkPlan::new(root, &env.home, &groups, &selection);
    log.debug(&format!("{} file(s) selected", plan.entries.len()));

    let options = LinkOptions {
        force: opts.force,
        dry_run,
    };
    Ok(link::execute(&plan, options, log)?)
}
