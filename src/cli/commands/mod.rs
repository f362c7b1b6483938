//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves paths and merges flags with configured defaults
//! 2. Calls into [`crate::git`]
//! 3. Formats and displays output
//!
//! Handlers never touch libgit2 directly.

mod completion;
mod config_cmd;
mod discover;
mod open;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list};
pub use discover::discover;
pub use open::open;

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Discover {
            path,
            across_fs,
            no_across_fs,
            ceilings,
        } => {
            let across = if across_fs {
                Some(true)
            } else if no_across_fs {
                Some(false)
            } else {
                None
            };
            discover::discover(ctx, path.as_deref(), across, &ceilings)
        }
        Command::Open { path } => open::open(ctx, &path),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
