//! Dotfile symlinker: turns a [`LinkPlan`] into symlinks under the home directory.
//!
//! Each entry is handled independently.  A destination that already exists
//! is reported and left alone unless `force` is set; only filesystem
//! failures while changing something abort the run.
mod plan;

pub use plan::{LinkEntry, LinkPlan};

use crate::error::LinkError;
use crate::logging::Log;
use crate::resources::{Resource, ResourceChange, ResourceState, SymlinkResource};

/// Behaviour switches for [`execute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkOptions {
    /// Replace existing destinations.
    pub force: bool,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
}

/// What happened to a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new link was created.
    Linked,
    /// An existing destination was replaced by the link.
    Replaced,
    /// The destination exists and `force` was not given.
    AlreadyExists {
        /// What occupies the destination.
        current: String,
    },
    /// The source file is not present in the repository.
    ///
    /// The entry is skipped rather than linked, so no dangling link is left
    /// in the home directory.
    SourceMissing,
    /// The destination cannot be replaced even with `force`.
    Blocked {
        /// Why the destination was left alone.
        reason: String,
    },
    /// Dry run: a new link would be created.
    WouldLink,
    /// Dry run: an existing destination would be replaced.
    WouldReplace,
}

impl LinkOutcome {
    /// Whether the outcome is reported as an error for its entry.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyExists { .. } | Self::SourceMissing | Self::Blocked { .. }
        )
    }

    /// Status text printed after the entry's row.
    #[must_use]
    pub fn status(&self) -> String {
        match self {
            Self::Linked => "SUCCESS.".to_string(),
            Self::Replaced => "SUCCESS (replaced existing file).".to_string(),
            Self::AlreadyExists { current } => {
                format!("file already exists ({current}); remove it or rerun with --force")
            }
            Self::SourceMissing => "source file is missing from the repository".to_string(),
            Self::Blocked { reason } => format!("{reason}; not removed"),
            Self::WouldLink => "would link".to_string(),
            Self::WouldReplace => "would replace existing file".to_string(),
        }
    }
}

/// Outcome of every entry of a plan, in plan order.
#[derive(Debug, Clone, Default)]
pub struct LinkReport {
    /// Entry and what happened to it.
    pub results: Vec<(LinkEntry, LinkOutcome)>,
}

impl LinkReport {
    /// Number of entries whose outcome satisfies `pred`.
    pub fn count(&self, pred: impl Fn(&LinkOutcome) -> bool) -> usize {
        self.results.iter().filter(|(_, o)| pred(o)).count()
    }

    /// Number of entries reported as errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(LinkOutcome::is_error)
    }

    /// One-line tally of the run.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let errors = self.error_count();
        if dry_run {
            let link = self.count(|o| *o == LinkOutcome::WouldLink);
            let replace = self.count(|o| *o == LinkOutcome::WouldReplace);
            format!("{link} would link, {replace} would replace, {errors} errors")
        } else {
            let linked = self.count(|o| *o == LinkOutcome::Linked);
            let replaced = self.count(|o| *o == LinkOutcome::Replaced);
            format!("{linked} linked, {replaced} replaced, {errors} errors")
        }
    }
}

/// Create the links described by `plan`.
///
/// Prints a header naming both roots, then one aligned row per entry
/// through `log`.
///
/// # Errors
///
/// Returns the first filesystem failure that occurs while creating a
/// directory, removing a destination, or creating a link.  Entries already
/// processed keep their links.
pub fn execute(plan: &LinkPlan, opts: LinkOptions, log: &dyn Log) -> Result<LinkReport, LinkError> {
    let (dest_width, source_width) = plan.column_widths();
    let mut report = LinkReport::default();

    log.heading(&format!(
        "Creating links from HOME='{}' to files in '{}'",
        plan.home.display(),
        plan.repo.display()
    ));

    for entry in &plan.entries {
        let resource = SymlinkResource::new(plan.source_path(entry), plan.destination_path(entry));
        log.debug(&format!("checking {}", resource.description()));

        let outcome = link_one(&resource, opts, log)?;

        let row = format!(
            "{:dest_width$} --> {:source_width$}   {}",
            entry.destination.display().to_string(),
            entry.source.display().to_string(),
            outcome.status(),
        );
        if outcome.is_error() {
            log.error(&row);
        } else if opts.dry_run {
            log.planned(&row);
        } else {
            log.linked(&row);
        }

        report.results.push((entry.clone(), outcome));
    }

    Ok(report)
}

fn link_one(
    resource: &SymlinkResource,
    opts: LinkOptions,
    log: &dyn Log,
) -> Result<LinkOutcome, LinkError> {
    if !resource.source.exists() {
        return Ok(LinkOutcome::SourceMissing);
    }

    let state = resource.current_state();
    match &state {
        ResourceState::Invalid { reason } => {
            return Ok(if opts.force {
                LinkOutcome::Blocked {
                    reason: reason.clone(),
                }
            } else {
                LinkOutcome::AlreadyExists {
                    current: reason.clone(),
                }
            });
        }
        ResourceState::Correct if !opts.force => {
            return Ok(LinkOutcome::AlreadyExists {
                current: "already linked to the repository".to_string(),
            });
        }
        ResourceState::Incorrect { current } if !opts.force => {
            return Ok(LinkOutcome::AlreadyExists {
                current: current.clone(),
            });
        }
        ResourceState::Missing | ResourceState::Correct | ResourceState::Incorrect { .. } => {}
    }

    if opts.dry_run {
        return Ok(if state == ResourceState::Missing {
            LinkOutcome::WouldLink
        } else {
            LinkOutcome::WouldReplace
        });
    }

    if state == ResourceState::Missing && resource.target_occupied() {
        log.debug(&format!(
            "removing dangling link {}",
            resource.target.display()
        ));
    }

    Ok(match resource.apply()? {
        ResourceChange::Applied => LinkOutcome::Linked,
        ResourceChange::Replaced => LinkOutcome::Replaced,
    })
}
