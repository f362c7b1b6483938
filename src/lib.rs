//! gitwalk - typed access to git repositories
//!
//! gitwalk opens git repositories by path and discovers the repository that
//! encloses an arbitrary directory. Every engine failure comes back as a
//! typed [`git::GitError`] carrying the engine's category and message.
//!
//! # Architecture
//!
//! - [`git`] - Single doorway to the git engine (open, discover, errors)
//! - [`core`] - Configuration schema and loading
//! - [`cli`] - Command-line interface layer (parses args, calls into `git`)
//! - [`ui`] - Output formatting
//!
//! # Invariants
//!
//! 1. A pending engine error is consumed exactly once
//! 2. Discovery buffers and repository handles are released exactly once
//! 3. A failed open never yields a handle

pub mod cli;
pub mod core;
pub mod git;
pub mod ui;
