//! cli
//!
//! Command-line interface layer for gitwalk.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install logging
//! - Load configuration and dispatch to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! [`commands`], which call into [`crate::git`] for all repository access.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "GITWALK_LOG";

/// Per-invocation settings shared by all command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory to run in, `None` for the process working directory
    pub cwd: Option<PathBuf>,
    /// Enable debug output
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
    /// Machine-readable output
    pub json: bool,
    /// Loaded configuration
    pub config: Config,
}

impl Context {
    /// Output verbosity derived from the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Resolve `path` against the context's working directory.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        Ok(self.base_dir()?.join(path))
    }

    /// The directory commands run in.
    pub fn base_dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir().context("failed to read current directory"),
        }
    }
}

/// Install the `tracing` subscriber on stderr.
///
/// `GITWALK_LOG` takes precedence; otherwise `--debug` enables debug events
/// from this crate and everything else stays at `warn`.
fn init_logging(debug: bool) {
    let default = if debug { "gitwalk=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be set when running inside tests.
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let config = Config::load().context("failed to load configuration")?;
    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        json: cli.json || config.json(),
        config,
    };

    commands::dispatch(cli.command, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(cwd: Option<&str>) -> Context {
        Context {
            cwd: cwd.map(PathBuf::from),
            debug: false,
            quiet: false,
            json: false,
            config: Config::default(),
        }
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let ctx = context(Some("/work"));
        assert_eq!(
            ctx.resolve(Path::new("/elsewhere")).unwrap(),
            PathBuf::from("/elsewhere")
        );
    }

    #[test]
    fn resolve_joins_relative_paths_to_cwd() {
        let ctx = context(Some("/work"));
        assert_eq!(
            ctx.resolve(Path::new("src")).unwrap(),
            PathBuf::from("/work/src")
        );
    }

    #[test]
    fn base_dir_defaults_to_process_cwd() {
        let ctx = context(None);
        assert_eq!(ctx.base_dir().unwrap(), std::env::current_dir().unwrap());
    }
}
