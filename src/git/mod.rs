//! git
//!
//! Single doorway to the git engine.
//!
//! # Architecture
//!
//! All repository access flows through this module. Only [`engine`] talks to
//! `git2`; everything else goes through the [`Engine`] trait so the same code
//! runs against libgit2 in production and [`mock::MockEngine`] in tests.
//!
//! # Responsibilities
//!
//! - Opening repositories ([`Repository`])
//! - Discovering the enclosing repository of a path ([`discover`])
//! - Translating engine failures into [`GitError`]
//!
//! # Invariants
//!
//! - Every engine failure surfaces as a typed [`GitError`], never retried
//! - A [`Repository`] releases its engine resource exactly once
//! - Discovery buffers are released on every exit path
//!
//! # Example
//!
//! ```no_run
//! use gitwalk::git::{discover, CeilingSet, GitError, Repository};
//!
//! let Some(git_dir) = discover(".", false, &CeilingSet::new())? else {
//!     println!("not inside a repository");
//!     return Ok(());
//! };
//!
//! match Repository::open(&git_dir) {
//!     Ok(repo) => println!("bare: {}", repo.is_bare()),
//!     Err(GitError::Repository { message }) => println!("not a repository: {}", message),
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), GitError>(())
//! ```

mod discover;
pub mod engine;
mod error;
pub mod last_error;
pub mod mock;
mod repository;
mod submodule;

pub use discover::{discover, discover_with, CeilingRejection, CeilingSet};
pub use engine::{Engine, EngineFailure, Git2Engine};
pub use error::{GitError, NO_ERROR_MESSAGE};
pub use repository::Repository;
pub use submodule::SubmoduleIgnore;
