//! Integration tests for the git doorway.
//!
//! These tests use real repositories created via tempfile and git2 to verify
//! open and discover against libgit2.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use gitwalk::git::{discover, CeilingSet, GitError, Repository};

/// A temporary directory tree holding one or more repositories.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Canonical root of the fixture.
    fn root(&self) -> PathBuf {
        fs::canonicalize(self.dir.path()).unwrap()
    }

    /// Create a non-bare repository at `rel` and return its work dir.
    fn init(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(&path).unwrap();
        git2::Repository::init(&path).unwrap();
        path
    }

    /// Create a bare repository at `rel` and return its path.
    fn init_bare(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        git2::Repository::init_bare(&path).unwrap();
        path
    }

    fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// A ceiling set that keeps the walk inside the fixture.
    fn fence(&self) -> CeilingSet {
        let mut ceilings = CeilingSet::new();
        ceilings.push_path(self.root());
        ceilings
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap()
}

mod open {
    use super::*;

    #[test]
    fn work_dir_and_git_dir_both_open() {
        let fx = Fixture::new();
        let work = fx.init("project");

        let from_work = Repository::open(&work).unwrap();
        let from_git_dir = Repository::open(work.join(".git")).unwrap();

        assert_eq!(
            canonical(from_work.git_dir()),
            canonical(from_git_dir.git_dir())
        );
        assert!(!from_work.is_bare());
        assert_eq!(
            from_work.work_dir().map(canonical),
            Some(canonical(&work))
        );
    }

    #[test]
    fn bare_repository_has_no_work_dir() {
        let fx = Fixture::new();
        let bare = fx.init_bare("store.git");

        let repo = Repository::open(&bare).unwrap();

        assert!(repo.is_bare());
        assert!(repo.work_dir().is_none());
        assert_eq!(canonical(repo.git_dir()), bare);
    }

    #[test]
    fn plain_directory_is_a_repository_error() {
        let fx = Fixture::new();
        let plain = fx.mkdir("plain");

        let err = Repository::open(&plain).unwrap_err();

        assert!(matches!(err, GitError::Repository { .. }), "got {:?}", err);
        assert_eq!(err.class_code(), Some(6));
        assert!(!err.message().is_empty());
    }

    #[test]
    fn open_does_not_search_parents() {
        let fx = Fixture::new();
        let work = fx.init("project");
        let nested = work.join("src");
        fs::create_dir_all(&nested).unwrap();

        assert!(Repository::open(&nested).is_err());
    }

    #[test]
    fn missing_path_fails() {
        let fx = Fixture::new();
        assert!(Repository::open(fx.root().join("absent")).is_err());
    }

    #[test]
    fn error_is_consumed_by_the_failed_call() {
        let fx = Fixture::new();
        let plain = fx.mkdir("plain");

        let _ = Repository::open(&plain).unwrap_err();

        assert!(GitError::last().is_none());
    }
}

mod discovery {
    use super::*;

    #[test]
    fn finds_git_dir_from_nested_directory() {
        let fx = Fixture::new();
        let work = fx.init("project");
        let deep = fx.mkdir("project/a/b/c");

        let found = discover(&deep, false, &fx.fence()).unwrap();

        assert_eq!(found, Some(canonical(&work.join(".git"))));
    }

    #[test]
    fn nearest_repository_wins() {
        let fx = Fixture::new();
        fx.init("outer");
        let inner = fx.init("outer/vendor/inner");
        let start = fx.mkdir("outer/vendor/inner/src");

        let found = discover(&start, false, &fx.fence()).unwrap();

        assert_eq!(found, Some(canonical(&inner.join(".git"))));
    }

    #[test]
    fn nothing_found_is_none() {
        let fx = Fixture::new();
        let start = fx.mkdir("empty/dir");

        assert_eq!(discover(&start, false, &fx.fence()).unwrap(), None);
    }

    #[test]
    fn unbounded_walk_without_repository_is_not_an_error() {
        let fx = Fixture::new();
        let start = fx.mkdir("no/repo/here");

        let found = discover(&start, false, &CeilingSet::new()).unwrap();

        // The temp dir itself may sit inside some repository; anything found
        // must then lie above the fixture.
        if let Some(git_dir) = found {
            assert!(
                !git_dir.starts_with(fx.root()),
                "found {} inside the fixture",
                git_dir.display()
            );
        }
    }

    #[test]
    fn start_is_examined_even_when_it_is_a_ceiling() {
        let fx = Fixture::new();
        let work = fx.init("project");
        let mut ceilings = CeilingSet::new();
        ceilings.push_path(&work);

        let found = discover(&work, false, &ceilings).unwrap();

        assert_eq!(found, Some(canonical(&work.join(".git"))));
    }

    #[test]
    fn ceiling_between_start_and_repository_stops_the_walk() {
        let fx = Fixture::new();
        fx.init("project");
        let middle = fx.mkdir("project/middle");
        let leaf = fx.mkdir("project/middle/leaf");
        let mut ceilings = CeilingSet::new();
        ceilings.push_path(&middle);

        assert_eq!(discover(&leaf, false, &ceilings).unwrap(), None);
    }

    #[test]
    fn file_url_ceiling_is_honoured() {
        let fx = Fixture::new();
        fx.init("project");
        let middle = fx.mkdir("project/middle");
        let leaf = fx.mkdir("project/middle/leaf");
        let url = url::Url::from_file_path(&middle).unwrap();

        let ceilings: CeilingSet = [url.as_str()].into_iter().collect();
        assert_eq!(ceilings.len(), 1);

        assert_eq!(discover(&leaf, false, &ceilings).unwrap(), None);
    }

    #[test]
    fn non_file_url_ceiling_is_ignored() {
        let fx = Fixture::new();
        let work = fx.init("project");
        let leaf = fx.mkdir("project/middle/leaf");

        let ceilings: CeilingSet = ["https://example.com/project/middle"]
            .into_iter()
            .collect();
        assert!(ceilings.is_empty());

        let found = discover(&leaf, false, &ceilings).unwrap();
        assert_eq!(found, Some(canonical(&work.join(".git"))));
    }

    #[test]
    fn bare_repository_is_discovered() {
        let fx = Fixture::new();
        let bare = fx.init_bare("store.git");

        let found = discover(&bare, false, &fx.fence()).unwrap();

        assert_eq!(found, Some(bare));
    }

    #[test]
    fn discovered_path_opens() {
        let fx = Fixture::new();
        let work = fx.init("project");
        let deep = fx.mkdir("project/src");

        let git_dir = discover(&deep, false, &fx.fence()).unwrap().unwrap();
        let repo = Repository::open(&git_dir).unwrap();

        assert!(!repo.is_bare());
        assert_eq!(repo.work_dir().map(canonical), Some(work));
    }

    #[test]
    fn across_filesystems_flag_does_not_change_same_device_result() {
        let fx = Fixture::new();
        let work = fx.init("project");
        let deep = fx.mkdir("project/src");

        let bounded = discover(&deep, false, &fx.fence()).unwrap();
        let unbounded = discover(&deep, true, &fx.fence()).unwrap();

        assert_eq!(bounded, unbounded);
        assert_eq!(bounded, Some(canonical(&work.join(".git"))));
    }

    #[test]
    fn repository_discover_matches_free_function() {
        let fx = Fixture::new();
        fx.init("project");
        let deep = fx.mkdir("project/src");

        assert_eq!(
            Repository::discover(&deep, false, &fx.fence()).unwrap(),
            discover(&deep, false, &fx.fence()).unwrap()
        );
    }
}
