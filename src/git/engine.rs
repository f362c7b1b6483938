//! git::engine
//!
//! The seam between this crate and the underlying git engine.
//!
//! # Design
//!
//! [`Engine`] names the few entry points the rest of the crate needs: open a
//! repository, release it, and run the upward discovery walk into a
//! caller-allocated buffer. Failing calls return [`EngineFailure`] and leave
//! the details in the thread's [last-error slot](super::last_error).
//!
//! [`Git2Engine`] is the production implementation over `git2`. It is the
//! only code in the crate that calls `git2` for repository access.
//! [`MockEngine`](super::mock::MockEngine) is a deterministic in-memory
//! implementation for tests.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use super::error::class_of;
use super::last_error::set_last_error;

/// Marker for a failed engine call.
///
/// The class and message of the failure are in the calling thread's
/// last-error slot; read them with [`GitError::last`](super::GitError::last).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineFailure;

/// Read-only view of an open repository resource.
pub trait RepositoryResource {
    /// Path to the git directory (`.git` or the bare repository itself).
    fn git_dir(&self) -> &Path;

    /// Path to the working directory, `None` for bare repositories.
    fn work_dir(&self) -> Option<&Path>;

    /// Whether the repository has no working directory.
    fn is_bare(&self) -> bool;
}

/// Output buffer for [`Engine::discover_repository`].
pub trait PathBuffer {
    /// The path the engine wrote, empty when nothing was found.
    fn contents(&self) -> &OsStr;
}

/// The git engine entry points used by this crate.
pub trait Engine {
    /// An open repository owned by the caller until released.
    type Handle: RepositoryResource;

    /// A discovery output buffer owned by the caller until released.
    type Buffer: PathBuffer;

    /// Open the repository at `path`, detecting bare and non-bare layouts.
    ///
    /// Does not search parent directories. On failure nothing is allocated.
    fn open_repository(&self, path: &Path) -> Result<Self::Handle, EngineFailure>;

    /// Release a handle returned by [`Engine::open_repository`].
    fn release_repository(&self, handle: Self::Handle);

    /// Allocate an empty discovery buffer.
    fn new_buffer(&self) -> Self::Buffer;

    /// Walk upward from `start` looking for a repository.
    ///
    /// `ceiling_dirs` is a platform path list (see [`std::env::join_paths`]).
    /// On success the buffer holds the repository's git directory, or is
    /// left empty when the walk found nothing.
    fn discover_repository(
        &self,
        out: &mut Self::Buffer,
        start: &Path,
        across_fs: bool,
        ceiling_dirs: &OsStr,
    ) -> Result<(), EngineFailure>;

    /// Release a buffer returned by [`Engine::new_buffer`].
    fn release_buffer(&self, buffer: Self::Buffer);
}

/// Engine backed by libgit2 through the `git2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Engine;

/// Repository handle for [`Git2Engine`].
pub struct Git2Handle {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git2Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2Handle")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl RepositoryResource for Git2Handle {
    fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    fn work_dir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }
}

/// Discovery buffer for [`Git2Engine`].
#[derive(Debug, Default)]
pub struct Git2Buffer {
    path: OsString,
}

impl PathBuffer for Git2Buffer {
    fn contents(&self) -> &OsStr {
        &self.path
    }
}

/// Record a `git2` failure in the last-error slot.
fn record(err: &git2::Error) -> EngineFailure {
    tracing::debug!(
        class = class_of(err),
        code = err.raw_code(),
        message = err.message(),
        "git engine call failed"
    );
    set_last_error(class_of(err), err.message());
    EngineFailure
}

/// libgit2 reports an exhausted discovery walk as `NotFound` in the
/// repository class.
fn is_walk_exhausted(err: &git2::Error) -> bool {
    err.code() == git2::ErrorCode::NotFound && err.class() == git2::ErrorClass::Repository
}

impl Engine for Git2Engine {
    type Handle = Git2Handle;
    type Buffer = Git2Buffer;

    fn open_repository(&self, path: &Path) -> Result<Git2Handle, EngineFailure> {
        git2::Repository::open(path)
            .map(|repo| Git2Handle { repo })
            .map_err(|e| record(&e))
    }

    fn release_repository(&self, handle: Git2Handle) {
        drop(handle.repo);
    }

    fn new_buffer(&self) -> Git2Buffer {
        Git2Buffer::default()
    }

    fn discover_repository(
        &self,
        out: &mut Git2Buffer,
        start: &Path,
        across_fs: bool,
        ceiling_dirs: &OsStr,
    ) -> Result<(), EngineFailure> {
        let mut flags = git2::RepositoryOpenFlags::empty();
        if across_fs {
            flags |= git2::RepositoryOpenFlags::CROSS_FS;
        }
        let ceilings: Vec<PathBuf> = std::env::split_paths(ceiling_dirs)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();

        match git2::Repository::open_ext(start, flags, &ceilings) {
            Ok(repo) => {
                out.path = repo.path().as_os_str().to_os_string();
                Ok(())
            }
            Err(e) if is_walk_exhausted(&e) => {
                tracing::debug!(start = %start.display(), "no repository found");
                out.path.clear();
                Ok(())
            }
            Err(e) => Err(record(&e)),
        }
    }

    fn release_buffer(&self, buffer: Git2Buffer) {
        drop(buffer);
    }
}
