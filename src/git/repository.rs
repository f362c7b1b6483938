//! git::repository
//!
//! An open repository.
//!
//! # Ownership
//!
//! [`Repository`] exclusively owns one engine repository resource. It cannot
//! be cloned, never exposes the raw resource, and releases it exactly once
//! when dropped. A failed open returns an error and owns nothing.

use std::path::{Path, PathBuf};

use super::discover::{discover_with, CeilingSet};
use super::engine::{Engine, Git2Engine, RepositoryResource};
use super::GitError;

/// An open git repository, bare or with a working directory.
///
/// # Example
///
/// ```no_run
/// use gitwalk::git::Repository;
///
/// let repo = Repository::open("/path/to/project")?;
/// println!("git dir: {}", repo.git_dir().display());
/// if let Some(work_dir) = repo.work_dir() {
///     println!("work dir: {}", work_dir.display());
/// }
/// # Ok::<(), gitwalk::git::GitError>(())
/// ```
pub struct Repository<E: Engine = Git2Engine> {
    engine: E,
    /// Always `Some` until dropped.
    handle: Option<E::Handle>,
}

impl<E: Engine> std::fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("git_dir", &self.git_dir())
            .field("bare", &self.is_bare())
            .finish()
    }
}

impl Repository<Git2Engine> {
    /// Open the repository at `path` using libgit2.
    ///
    /// `path` may be a git directory (bare or `.git`) or a working
    /// directory; the layout is detected automatically. Parent directories
    /// are not searched, use [`discover`](super::discover) for that.
    ///
    /// # Errors
    ///
    /// Returns the engine's error, translated through [`GitError::last`],
    /// if `path` is not a repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        Self::open_with(Git2Engine, path)
    }

    /// Look for a repository at or above `start_path`.
    ///
    /// Same as [`discover`](super::discover).
    pub fn discover(
        start_path: impl AsRef<Path>,
        across_filesystems: bool,
        ceiling_dirs: &CeilingSet,
    ) -> Result<Option<PathBuf>, GitError> {
        discover_with(&Git2Engine, start_path, across_filesystems, ceiling_dirs)
    }
}

impl<E: Engine> Repository<E> {
    /// Open the repository at `path` with the given engine.
    pub fn open_with(engine: E, path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening repository");

        match engine.open_repository(path) {
            Ok(handle) => Ok(Self {
                engine,
                handle: Some(handle),
            }),
            Err(_) => Err(GitError::last()),
        }
    }

    fn resource(&self) -> &E::Handle {
        match self.handle.as_ref() {
            Some(handle) => handle,
            None => unreachable!("repository used after release"),
        }
    }

    /// Path to the git directory.
    pub fn git_dir(&self) -> &Path {
        self.resource().git_dir()
    }

    /// Path to the working directory, `None` for a bare repository.
    pub fn work_dir(&self) -> Option<&Path> {
        self.resource().work_dir()
    }

    /// Whether the repository has no working directory.
    pub fn is_bare(&self) -> bool {
        self.resource().is_bare()
    }
}

impl<E: Engine> Drop for Repository<E> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.engine.release_repository(handle);
        }
    }
}
