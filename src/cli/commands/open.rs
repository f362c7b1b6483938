//! open command - Open a repository and describe it

use std::path::Path;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::git::{GitError, Repository};
use crate::ui::output::{self, Verbosity};

#[derive(Debug, Serialize)]
struct OpenReport<'a> {
    git_dir: &'a Path,
    work_dir: Option<&'a Path>,
    bare: bool,
}

/// Open the repository at `path` and print its layout.
///
/// Failure to open is reported with the error's category, e.g.
/// `repository error: could not find repository at '/tmp/x'`.
pub fn open(ctx: &Context, path: &Path) -> Result<()> {
    let path = ctx.resolve(path)?;

    let repo = match Repository::open(&path) {
        Ok(repo) => repo,
        Err(err) => bail!("{}", describe_failure(&path, &err)),
    };

    let report = OpenReport {
        git_dir: repo.git_dir(),
        work_dir: repo.work_dir(),
        bare: repo.is_bare(),
    };

    if ctx.json {
        output::json(&report)?;
        return Ok(());
    }

    if ctx.verbosity() == Verbosity::Quiet {
        output::result(report.git_dir.display());
        return Ok(());
    }

    output::result(format!("git dir:  {}", report.git_dir.display()));
    match report.work_dir {
        Some(dir) => output::result(format!("work dir: {}", dir.display())),
        None => output::result("work dir: (none)"),
    }
    output::result(format!("bare:     {}", report.bare));
    Ok(())
}

fn describe_failure(path: &Path, err: &GitError) -> String {
    format!(
        "cannot open '{}' [{}]: {}",
        path.display(),
        err.class_name(),
        err.message()
    )
}
