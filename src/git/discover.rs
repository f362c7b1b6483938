//! git::discover
//!
//! Repository discovery: find the nearest repository at or above a path.
//!
//! # Walk
//!
//! The start path is always examined, even when it is listed as a ceiling.
//! From there the engine walks parent directories until it finds a
//! repository (bare or non-bare), reaches a ceiling directory, crosses onto
//! another filesystem (unless `across_filesystems` is set), or runs out of
//! parents. Running out is reported as `Ok(None)`, not as an error.
//!
//! # Ceilings
//!
//! Ceilings are given as locations: plain filesystem paths or URLs. Only
//! `file:` URLs naming a local path are kept. Other schemes, and `file:` URLs
//! pointing at a remote host, are dropped before the engine is called.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use super::engine::{Engine, Git2Engine, PathBuffer};
use super::GitError;

/// Directories at which the upward walk stops.
///
/// # Example
///
/// ```
/// use gitwalk::git::CeilingSet;
///
/// let ceilings: CeilingSet = ["/home", "file:///srv", "https://example.com/repo"]
///     .into_iter()
///     .collect();
///
/// assert_eq!(ceilings.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CeilingSet {
    dirs: Vec<PathBuf>,
}

impl CeilingSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ceiling given as a path or URL.
    ///
    /// Returns `false` if the location was dropped; see
    /// [`CeilingSet::try_push`] for the reason.
    pub fn push(&mut self, location: impl AsRef<str>) -> bool {
        let location = location.as_ref();
        match self.try_push(location) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(location, %reason, "dropping ceiling directory");
                false
            }
        }
    }

    /// Add a ceiling given as a path or URL, reporting why it was dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CeilingRejection`] for URLs with a scheme other than `file`
    /// and for `file:` URLs that do not name a local path.
    pub fn try_push(&mut self, location: &str) -> Result<(), CeilingRejection> {
        let path = parse_location(location)?;
        self.dirs.push(path);
        Ok(())
    }

    /// Add a ceiling given as a filesystem path.
    pub fn push_path(&mut self, path: impl Into<PathBuf>) {
        self.dirs.push(path.into());
    }

    /// Number of ceilings kept.
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Whether no ceilings are set.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Iterate over the kept ceiling directories.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    /// Serialize as a platform path list (`:`-separated on Unix).
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Invalid`] if a ceiling contains the list
    /// separator itself.
    pub fn to_path_list(&self) -> Result<OsString, GitError> {
        std::env::join_paths(&self.dirs).map_err(|e| GitError::Invalid {
            message: format!("invalid ceiling directory: {}", e),
        })
    }
}

impl<S: AsRef<str>> FromIterator<S> for CeilingSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = CeilingSet::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for CeilingSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for location in iter {
            self.push(location);
        }
    }
}

/// Why a ceiling location was not kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CeilingRejection {
    /// A URL whose scheme is not `file`.
    #[error("only file: URLs are supported, not '{scheme}:'")]
    NonFileScheme { scheme: String },

    /// A `file:` URL that names a remote host or is otherwise not a local path.
    #[error("file: URL does not name a local path (host '{host}')")]
    NonLocalFile { host: String },
}

/// Resolve a location to a filesystem path.
///
/// Strings that do not parse as URLs are plain paths. A one-letter scheme is
/// a Windows drive letter, not a URL.
fn parse_location(location: &str) -> Result<PathBuf, CeilingRejection> {
    match Url::parse(location) {
        Ok(url) if url.scheme() == "file" => {
            url.to_file_path()
                .map_err(|()| CeilingRejection::NonLocalFile {
                    host: url.host_str().unwrap_or_default().to_string(),
                })
        }
        Ok(url) if url.scheme().len() == 1 => Ok(PathBuf::from(location)),
        Ok(url) => Err(CeilingRejection::NonFileScheme {
            scheme: url.scheme().to_string(),
        }),
        Err(_) => Ok(PathBuf::from(location)),
    }
}

/// Releases the engine buffer when the discovery call returns, whichever
/// way it returns.
struct BufferGuard<'e, E: Engine> {
    engine: &'e E,
    buffer: Option<E::Buffer>,
}

impl<'e, E: Engine> BufferGuard<'e, E> {
    fn new(engine: &'e E) -> Self {
        Self {
            engine,
            buffer: Some(engine.new_buffer()),
        }
    }

    fn buffer(&self) -> &E::Buffer {
        match self.buffer.as_ref() {
            Some(buffer) => buffer,
            None => unreachable!("discovery buffer already released"),
        }
    }

    fn buffer_mut(&mut self) -> &mut E::Buffer {
        match self.buffer.as_mut() {
            Some(buffer) => buffer,
            None => unreachable!("discovery buffer already released"),
        }
    }
}

impl<E: Engine> Drop for BufferGuard<'_, E> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.engine.release_buffer(buffer);
        }
    }
}

/// Look for a repository at or above `start_path` using libgit2.
///
/// Returns the repository's git directory (`.git` for a working copy, the
/// repository itself when bare), or `None` if the walk found nothing.
///
/// # Errors
///
/// Returns the engine's error, translated through [`GitError::last`], if the
/// walk itself fails.
///
/// # Example
///
/// ```no_run
/// use gitwalk::git::{discover, CeilingSet, Repository};
///
/// let ceilings: CeilingSet = ["/home"].into_iter().collect();
/// if let Some(git_dir) = discover("/home/me/project/src", false, &ceilings)? {
///     let repo = Repository::open(&git_dir)?;
///     println!("found {}", repo.git_dir().display());
/// }
/// # Ok::<(), gitwalk::git::GitError>(())
/// ```
pub fn discover(
    start_path: impl AsRef<Path>,
    across_filesystems: bool,
    ceiling_dirs: &CeilingSet,
) -> Result<Option<PathBuf>, GitError> {
    discover_with(&Git2Engine, start_path, across_filesystems, ceiling_dirs)
}

/// Like [`discover`], against an arbitrary engine.
pub fn discover_with<E: Engine>(
    engine: &E,
    start_path: impl AsRef<Path>,
    across_filesystems: bool,
    ceiling_dirs: &CeilingSet,
) -> Result<Option<PathBuf>, GitError> {
    let start_path = start_path.as_ref();
    let ceilings = ceiling_dirs.to_path_list()?;
    tracing::debug!(
        start = %start_path.display(),
        across_filesystems,
        ceilings = ?ceilings,
        "discovering repository"
    );

    let mut guard = BufferGuard::new(engine);
    if engine
        .discover_repository(guard.buffer_mut(), start_path, across_filesystems, &ceilings)
        .is_err()
    {
        return Err(GitError::last());
    }

    let found = guard.buffer().contents();
    if found.is_empty() {
        return Ok(None);
    }

    let path = PathBuf::from(found);
    Ok(Some(std::fs::canonicalize(&path).unwrap_or(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::last_error::set_last_error;
    use crate::git::mock::{FailOn, MockEngine};

    mod ceiling_set {
        use super::*;

        #[test]
        fn plain_paths_are_kept() {
            let set: CeilingSet = ["/home", "relative/dir"].into_iter().collect();
            let dirs: Vec<&Path> = set.iter().collect();
            assert_eq!(dirs, vec![Path::new("/home"), Path::new("relative/dir")]);
        }

        #[test]
        fn file_urls_become_paths() {
            let mut set = CeilingSet::new();
            assert!(set.push("file:///srv/git"));
            assert_eq!(set.iter().next(), Some(Path::new("/srv/git")));
        }

        #[test]
        fn other_schemes_are_dropped() {
            let mut set = CeilingSet::new();
            assert!(!set.push("https://example.com/repo"));
            assert!(!set.push("ssh://git@example.com/repo"));
            assert!(set.is_empty());
        }

        #[test]
        fn rejection_names_the_scheme() {
            let mut set = CeilingSet::new();
            assert_eq!(
                set.try_push("https://example.com/repo"),
                Err(CeilingRejection::NonFileScheme {
                    scheme: "https".to_string()
                })
            );
        }

        #[cfg(unix)]
        #[test]
        fn remote_host_file_url_is_rejected_as_non_local() {
            let mut set = CeilingSet::new();
            let err = set.try_push("file://server/share").unwrap_err();

            assert_eq!(
                err,
                CeilingRejection::NonLocalFile {
                    host: "server".to_string()
                }
            );
            assert!(err.to_string().contains("server"));
            assert!(!err.to_string().contains("only file: URLs"));
            assert!(set.is_empty());
        }

        #[test]
        fn serializes_with_path_separator() {
            let set: CeilingSet = ["/a", "ftp://nope", "file:///b"].into_iter().collect();
            let list = set.to_path_list().unwrap();

            #[cfg(unix)]
            assert_eq!(list, "/a:/b");
            let parts: Vec<PathBuf> = std::env::split_paths(&list).collect();
            assert_eq!(parts, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        }

        #[test]
        fn empty_set_serializes_empty() {
            assert_eq!(CeilingSet::new().to_path_list().unwrap(), "");
        }

        #[cfg(unix)]
        #[test]
        fn separator_in_path_is_invalid() {
            let mut set = CeilingSet::new();
            set.push_path("/odd:dir");
            assert!(matches!(set.to_path_list(), Err(GitError::Invalid { .. })));
        }
    }

    mod with_mock {
        use super::*;

        #[test]
        fn start_path_is_searched_even_if_ceiling() {
            let engine = MockEngine::new();
            engine.add_repository("/w/project");
            let ceilings: CeilingSet = ["/w/project"].into_iter().collect();

            let found = discover_with(&engine, "/w/project", false, &ceilings).unwrap();
            assert_eq!(found, Some(PathBuf::from("/w/project/.git")));
        }

        #[test]
        fn non_file_ceilings_never_reach_engine() {
            let engine = MockEngine::new();
            let ceilings: CeilingSet = ["https://example.com/x", "/stop"].into_iter().collect();

            discover_with(&engine, "/stop/here", false, &ceilings).unwrap();

            let lists = engine.ceiling_lists();
            assert_eq!(lists.len(), 1);
            assert_eq!(lists[0], "/stop");
        }

        #[test]
        fn empty_result_is_not_found() {
            let engine = MockEngine::new();
            let found = discover_with(&engine, "/nothing/here", false, &CeilingSet::new()).unwrap();
            assert_eq!(found, None);
        }

        #[test]
        fn engine_failure_is_translated() {
            let engine = MockEngine::new();
            engine.fail_on(FailOn::Discover, 2, "failed to resolve path");

            let err = discover_with(&engine, "/x", false, &CeilingSet::new()).unwrap_err();
            assert_eq!(
                err,
                GitError::Os {
                    message: "failed to resolve path".to_string()
                }
            );
            assert!(GitError::last().is_none());
        }

        #[test]
        fn buffer_released_once_on_every_path() {
            let engine = MockEngine::new();
            engine.add_repository("/r");

            // found
            discover_with(&engine, "/r/src", false, &CeilingSet::new()).unwrap();
            // not found
            discover_with(&engine, "/elsewhere", false, &CeilingSet::new()).unwrap();
            // error
            engine.fail_on(FailOn::Discover, 6, "boom");
            discover_with(&engine, "/r", false, &CeilingSet::new()).unwrap_err();

            let stats = engine.stats();
            assert_eq!(stats.buffers_allocated, 3);
            assert_eq!(stats.buffers_released, 3);
        }

        #[cfg(unix)]
        #[test]
        fn invalid_ceiling_fails_before_engine_call() {
            let engine = MockEngine::new();
            let mut ceilings = CeilingSet::new();
            ceilings.push_path("/a:b");

            let err = discover_with(&engine, "/a", false, &ceilings).unwrap_err();
            assert!(matches!(err, GitError::Invalid { .. }));
            assert!(engine.ceiling_lists().is_empty());
            assert_eq!(engine.stats().buffers_allocated, 0);
        }

        #[test]
        fn stale_error_does_not_leak_into_success() {
            let engine = MockEngine::new();
            engine.add_repository("/r");
            set_last_error(12, "unrelated earlier failure");

            let found = discover_with(&engine, "/r", false, &CeilingSet::new()).unwrap();
            assert!(found.is_some());
            // The unrelated record is still pending for whoever owns it.
            assert!(matches!(GitError::last(), GitError::Network { .. }));
        }
    }

    mod with_git2 {
        use super::*;
        use tempfile::TempDir;

        fn canonical(path: &Path) -> PathBuf {
            std::fs::canonicalize(path).unwrap()
        }

        #[test]
        fn finds_repository_from_subdirectory() {
            let dir = TempDir::new().unwrap();
            git2::Repository::init(dir.path()).unwrap();
            let nested = dir.path().join("src/deep");
            std::fs::create_dir_all(&nested).unwrap();

            let found = discover(&nested, false, &CeilingSet::new()).unwrap();
            assert_eq!(found, Some(canonical(&dir.path().join(".git"))));
        }

        #[test]
        fn start_in_ceiling_still_found() {
            let dir = TempDir::new().unwrap();
            git2::Repository::init(dir.path()).unwrap();
            let mut ceilings = CeilingSet::new();
            ceilings.push_path(dir.path());

            let found = discover(dir.path(), false, &ceilings).unwrap();
            assert_eq!(found, Some(canonical(&dir.path().join(".git"))));
        }

        #[test]
        fn ceiling_hides_repository_above() {
            let dir = TempDir::new().unwrap();
            git2::Repository::init(dir.path()).unwrap();
            let middle = dir.path().join("middle");
            let leaf = middle.join("leaf");
            std::fs::create_dir_all(&leaf).unwrap();
            let mut ceilings = CeilingSet::new();
            ceilings.push_path(canonical(&middle));

            let found = discover(&leaf, false, &ceilings).unwrap();
            assert_eq!(found, None);
        }

        #[test]
        fn finds_bare_repository() {
            let dir = TempDir::new().unwrap();
            let bare = dir.path().join("store.git");
            git2::Repository::init_bare(&bare).unwrap();

            let found = discover(&bare, false, &CeilingSet::new()).unwrap();
            assert_eq!(found, Some(canonical(&bare)));
        }
    }
}
