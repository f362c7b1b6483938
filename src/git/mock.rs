//! git::mock
//!
//! Mock engine implementation for deterministic testing.
//!
//! # Design
//!
//! The mock engine provides an in-memory implementation of the [`Engine`]
//! trait. Repositories, mount points and failures are configured up front;
//! the discovery walk is simulated over plain paths without touching the
//! filesystem. Every handle and buffer allocation and release is counted so
//! tests can check resource discipline.
//!
//! # Example
//!
//! ```
//! use gitwalk::git::mock::MockEngine;
//! use gitwalk::git::{discover_with, CeilingSet, Repository};
//!
//! let engine = MockEngine::new();
//! engine.add_repository("/work/project");
//!
//! let found = discover_with(&engine, "/work/project/src", false, &CeilingSet::new()).unwrap();
//! assert_eq!(found.unwrap().to_str(), Some("/work/project/.git"));
//!
//! let repo = Repository::open_with(engine.clone(), "/work/project").unwrap();
//! assert!(!repo.is_bare());
//! drop(repo);
//! assert_eq!(engine.stats().handles_released, 1);
//! ```

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::engine::{Engine, EngineFailure, PathBuffer, RepositoryResource};
use super::last_error::set_last_error;

/// Mock engine for testing.
///
/// Clones share state, so a test can keep one clone for inspection while
/// another is moved into a [`Repository`](super::Repository).
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    inner: Arc<Mutex<MockEngineInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockEngineInner {
    /// Registered repositories by the directory that holds them.
    repositories: HashMap<PathBuf, MockRepo>,
    /// Directories where a different filesystem is mounted.
    mount_points: Vec<PathBuf>,
    /// Call to fail, with the class and message to record.
    fail_on: Option<(FailOn, i32, String)>,
    /// Ceiling lists received by `discover_repository`.
    ceiling_lists: Vec<OsString>,
    stats: MockStats,
}

#[derive(Debug, Clone)]
struct MockRepo {
    git_dir: PathBuf,
    work_dir: Option<PathBuf>,
}

/// Which engine call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    /// Fail `open_repository`.
    Open,
    /// Fail `discover_repository`.
    Discover,
}

/// Allocation and release counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockStats {
    pub handles_allocated: usize,
    pub handles_released: usize,
    pub buffers_allocated: usize,
    pub buffers_released: usize,
}

impl MockStats {
    /// Whether every allocated handle and buffer has been released.
    pub fn balanced(&self) -> bool {
        self.handles_allocated == self.handles_released
            && self.buffers_allocated == self.buffers_released
    }
}

/// Repository handle handed out by [`MockEngine`].
#[derive(Debug)]
pub struct MockHandle {
    repo: MockRepo,
}

impl RepositoryResource for MockHandle {
    fn git_dir(&self) -> &Path {
        &self.repo.git_dir
    }

    fn work_dir(&self) -> Option<&Path> {
        self.repo.work_dir.as_deref()
    }

    fn is_bare(&self) -> bool {
        self.repo.work_dir.is_none()
    }
}

/// Discovery buffer handed out by [`MockEngine`].
#[derive(Debug, Default)]
pub struct MockBuffer {
    path: OsString,
}

impl PathBuffer for MockBuffer {
    fn contents(&self) -> &OsStr {
        &self.path
    }
}

impl MockEngine {
    /// Create an engine with no repositories.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockEngineInner> {
        // A panicking test must not poison the counters for the assertions
        // that follow it.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a non-bare repository with its working directory at `work_dir`.
    pub fn add_repository(&self, work_dir: impl Into<PathBuf>) {
        let work_dir = work_dir.into();
        let repo = MockRepo {
            git_dir: work_dir.join(".git"),
            work_dir: Some(work_dir.clone()),
        };
        self.lock().repositories.insert(work_dir, repo);
    }

    /// Register a bare repository at `git_dir`.
    pub fn add_bare_repository(&self, git_dir: impl Into<PathBuf>) {
        let git_dir = git_dir.into();
        let repo = MockRepo {
            git_dir: git_dir.clone(),
            work_dir: None,
        };
        self.lock().repositories.insert(git_dir, repo);
    }

    /// Mark `path` as the root of a different filesystem.
    pub fn add_mount_point(&self, path: impl Into<PathBuf>) {
        self.lock().mount_points.push(path.into());
    }

    /// Make the given call fail with `class` and `message`.
    pub fn fail_on(&self, call: FailOn, class: i32, message: impl Into<String>) {
        self.lock().fail_on = Some((call, class, message.into()));
    }

    /// Stop injecting failures.
    pub fn clear_failure(&self) {
        self.lock().fail_on = None;
    }

    /// Allocation and release counters.
    pub fn stats(&self) -> MockStats {
        self.lock().stats
    }

    /// Ceiling lists received by `discover_repository`, in call order.
    pub fn ceiling_lists(&self) -> Vec<OsString> {
        self.lock().ceiling_lists.clone()
    }

    fn injected_failure(inner: &MockEngineInner, call: FailOn) -> Result<(), EngineFailure> {
        match &inner.fail_on {
            Some((fail, class, message)) if *fail == call => {
                set_last_error(*class, message.clone());
                Err(EngineFailure)
            }
            _ => Ok(()),
        }
    }

    /// Find a repository at `dir`, either as a working directory or as the
    /// git directory itself.
    fn repository_at(inner: &MockEngineInner, dir: &Path) -> Option<MockRepo> {
        if let Some(repo) = inner.repositories.get(dir) {
            return Some(repo.clone());
        }
        inner
            .repositories
            .values()
            .find(|repo| repo.git_dir == dir)
            .cloned()
    }

    /// The mount point a path lives on, `None` for the root filesystem.
    fn device_of<'a>(inner: &'a MockEngineInner, path: &Path) -> Option<&'a Path> {
        inner
            .mount_points
            .iter()
            .filter(|m| path.starts_with(m))
            .max_by_key(|m| m.components().count())
            .map(PathBuf::as_path)
    }
}

impl Engine for MockEngine {
    type Handle = MockHandle;
    type Buffer = MockBuffer;

    fn open_repository(&self, path: &Path) -> Result<MockHandle, EngineFailure> {
        let mut inner = self.lock();
        Self::injected_failure(&inner, FailOn::Open)?;

        match Self::repository_at(&inner, path) {
            Some(repo) => {
                inner.stats.handles_allocated += 1;
                Ok(MockHandle { repo })
            }
            None => {
                set_last_error(
                    6,
                    format!("could not find repository at '{}'", path.display()),
                );
                Err(EngineFailure)
            }
        }
    }

    fn release_repository(&self, _handle: MockHandle) {
        self.lock().stats.handles_released += 1;
    }

    fn new_buffer(&self) -> MockBuffer {
        self.lock().stats.buffers_allocated += 1;
        MockBuffer::default()
    }

    fn discover_repository(
        &self,
        out: &mut MockBuffer,
        start: &Path,
        across_fs: bool,
        ceiling_dirs: &OsStr,
    ) -> Result<(), EngineFailure> {
        let mut inner = self.lock();
        inner.ceiling_lists.push(ceiling_dirs.to_os_string());
        Self::injected_failure(&inner, FailOn::Discover)?;

        let ceilings: Vec<PathBuf> = std::env::split_paths(ceiling_dirs)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        let start_device = Self::device_of(&inner, start).map(Path::to_path_buf);

        out.path.clear();
        let mut current = Some(start);
        while let Some(dir) = current {
            // The start directory is always searched; ceilings and device
            // boundaries only stop the walk from going further up.
            if dir != start {
                if ceilings.iter().any(|c| c == dir) {
                    break;
                }
                if !across_fs && Self::device_of(&inner, dir) != start_device.as_deref() {
                    break;
                }
            }
            if let Some(repo) = Self::repository_at(&inner, dir) {
                out.path = repo.git_dir.into_os_string();
                break;
            }
            current = dir.parent();
        }
        Ok(())
    }

    fn release_buffer(&self, _buffer: MockBuffer) {
        self.lock().stats.buffers_released += 1;
    }
}
