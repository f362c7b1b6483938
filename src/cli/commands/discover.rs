//! discover command - Find the repository enclosing a path

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::git::{self, CeilingRejection, CeilingSet};
use crate::ui::output;

#[derive(Debug, Serialize)]
struct DiscoverReport<'a> {
    start: &'a Path,
    across_filesystems: bool,
    ceilings: Vec<&'a Path>,
    git_dir: Option<&'a Path>,
}

/// Find the repository at or above `path`.
///
/// `across` overrides the configured default when set. `ceilings` are
/// appended to the configured ceiling directories.
pub fn discover(
    ctx: &Context,
    path: Option<&Path>,
    across: Option<bool>,
    ceilings: &[String],
) -> Result<()> {
    let start = match path {
        Some(p) => ctx.resolve(p)?,
        None => ctx.base_dir()?,
    };
    let across_filesystems = across.unwrap_or_else(|| ctx.config.across_filesystems());
    let (ceiling_set, dropped) = merge_ceilings(ctx.config.ceiling_directories(), ceilings);
    for (location, reason) in dropped {
        output::warn(
            format!("ignoring ceiling '{}': {}", location, reason),
            ctx.verbosity(),
        );
    }

    let found = git::discover(&start, across_filesystems, &ceiling_set).with_context(|| {
        format!("failed to discover repository from '{}'", start.display())
    })?;

    if ctx.json {
        let report = DiscoverReport {
            start: &start,
            across_filesystems,
            ceilings: ceiling_set.iter().collect(),
            git_dir: found.as_deref(),
        };
        output::json(&report)?;
        return Ok(());
    }

    match found {
        Some(git_dir) => output::result(git_dir.display()),
        None => output::print(
            format!("no repository found at or above '{}'", start.display()),
            ctx.verbosity(),
        ),
    }
    Ok(())
}

/// Configured ceilings first, then the ones from the command line. Returns
/// the locations that were dropped, with the reason.
fn merge_ceilings<'a>(
    configured: &'a [String],
    extra: &'a [String],
) -> (CeilingSet, Vec<(&'a str, CeilingRejection)>) {
    let mut set = CeilingSet::new();
    let mut dropped = Vec::new();
    for location in configured.iter().chain(extra) {
        if let Err(reason) = set.try_push(location) {
            dropped.push((location.as_str(), reason));
        }
    }
    (set, dropped)
}
