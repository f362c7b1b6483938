//! git::error
//!
//! Typed errors for engine failures.
//!
//! The engine reports failures as a numeric error class plus a message,
//! left in the thread's [last-error slot](super::last_error). This module
//! turns that record into a [`GitError`] with one variant per class.
//!
//! The category is a reliable signal for programmatic handling. The message
//! is free text for diagnostics and may change between engine versions.

use thiserror::Error;

use super::last_error;

/// Message carried by the [`GitError::None`] sentinel when no error is
/// pending.
pub const NO_ERROR_MESSAGE: &str = "No error";

/// Errors reported by the git engine, one variant per error class.
///
/// The variant is chosen only by the engine's numeric class code (see
/// [`GitError::from_class`]). Codes the table does not know map to
/// [`GitError::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitError {
    /// Unrecognized error class.
    #[error("unknown error: {message}")]
    Unknown { message: String },

    /// No error is recorded. This is a sentinel, not a failure.
    #[error("{message}")]
    None { message: String },

    /// Out of memory.
    #[error("out of memory: {message}")]
    NoMemory { message: String },

    /// Operating system error.
    #[error("os error: {message}")]
    Os { message: String },

    /// Invalid input.
    #[error("invalid: {message}")]
    Invalid { message: String },

    /// Reference error.
    #[error("reference error: {message}")]
    Reference { message: String },

    /// zlib error.
    #[error("zlib error: {message}")]
    Zlib { message: String },

    /// Repository error (including "not a repository").
    #[error("repository error: {message}")]
    Repository { message: String },

    /// Configuration error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Regular expression error.
    #[error("regex error: {message}")]
    RegularExpression { message: String },

    /// Object database error.
    #[error("object database error: {message}")]
    ObjectDatabase { message: String },

    /// Index error.
    #[error("index error: {message}")]
    Index { message: String },

    /// Object error.
    #[error("object error: {message}")]
    Object { message: String },

    /// Network error.
    #[error("network error: {message}")]
    Network { message: String },

    /// Tag error.
    #[error("tag error: {message}")]
    Tag { message: String },

    /// Tree error.
    #[error("tree error: {message}")]
    Tree { message: String },

    /// Indexer error.
    #[error("indexer error: {message}")]
    Indexer { message: String },

    /// SSL error.
    #[error("ssl error: {message}")]
    Ssl { message: String },

    /// Submodule error.
    #[error("submodule error: {message}")]
    Submodule { message: String },

    /// Threading error.
    #[error("thread error: {message}")]
    Thread { message: String },

    /// Stash error.
    #[error("stash error: {message}")]
    Stash { message: String },

    /// Checkout error.
    #[error("checkout error: {message}")]
    Checkout { message: String },

    /// FETCH_HEAD error.
    #[error("fetch head error: {message}")]
    FetchHead { message: String },

    /// Merge error.
    #[error("merge error: {message}")]
    Merge { message: String },

    /// SSH error.
    #[error("ssh error: {message}")]
    Ssh { message: String },

    /// Filter error.
    #[error("filter error: {message}")]
    Filter { message: String },

    /// Revert error.
    #[error("revert error: {message}")]
    Revert { message: String },

    /// Error raised by a user callback.
    #[error("callback error: {message}")]
    Callback { message: String },

    /// Cherry-pick error.
    #[error("cherry-pick error: {message}")]
    CherryPick { message: String },

    /// Describe error.
    #[error("describe error: {message}")]
    Describe { message: String },

    /// Rebase error.
    #[error("rebase error: {message}")]
    Rebase { message: String },

    /// Filesystem error.
    #[error("filesystem error: {message}")]
    FileSystem { message: String },
}

impl GitError {
    /// Consume the calling thread's last engine error.
    ///
    /// Returns [`GitError::None`] with the message `"No error"` when nothing
    /// is recorded. Otherwise the record is cleared and mapped through
    /// [`GitError::from_class`].
    ///
    /// This is not idempotent: after one failure the first call returns the
    /// real error and a second call returns the sentinel. Call it right after
    /// the failing engine call, before any other fallible engine call on the
    /// same thread.
    ///
    /// # Example
    ///
    /// ```
    /// use gitwalk::git::GitError;
    /// use gitwalk::git::last_error::set_last_error;
    ///
    /// set_last_error(6, "could not find repository at '/tmp'");
    ///
    /// let err = GitError::last();
    /// assert!(matches!(err, GitError::Repository { .. }));
    /// assert!(GitError::last().is_none());
    /// ```
    pub fn last() -> GitError {
        match last_error::take_last_error() {
            Some(raw) => Self::from_class(raw.class, raw.message),
            None => GitError::None {
                message: NO_ERROR_MESSAGE.to_string(),
            },
        }
    }

    /// Map an engine error class to its variant.
    pub fn from_class(class: i32, message: impl Into<String>) -> GitError {
        let message = message.into();
        match class {
            0 => GitError::None { message },
            1 => GitError::NoMemory { message },
            2 => GitError::Os { message },
            3 => GitError::Invalid { message },
            4 => GitError::Reference { message },
            5 => GitError::Zlib { message },
            6 => GitError::Repository { message },
            7 => GitError::Config { message },
            8 => GitError::RegularExpression { message },
            9 => GitError::ObjectDatabase { message },
            10 => GitError::Index { message },
            11 => GitError::Object { message },
            12 => GitError::Network { message },
            13 => GitError::Tag { message },
            14 => GitError::Tree { message },
            15 => GitError::Indexer { message },
            16 => GitError::Ssl { message },
            17 => GitError::Submodule { message },
            18 => GitError::Thread { message },
            19 => GitError::Stash { message },
            20 => GitError::Checkout { message },
            21 => GitError::FetchHead { message },
            22 => GitError::Merge { message },
            23 => GitError::Ssh { message },
            24 => GitError::Filter { message },
            25 => GitError::Revert { message },
            26 => GitError::Callback { message },
            27 => GitError::CherryPick { message },
            28 => GitError::Describe { message },
            29 => GitError::Rebase { message },
            30 => GitError::FileSystem { message },
            _ => GitError::Unknown { message },
        }
    }

    /// The engine class code for this variant, `None` for
    /// [`GitError::Unknown`].
    pub fn class_code(&self) -> Option<i32> {
        let code = match self {
            GitError::Unknown { .. } => return None,
            GitError::None { .. } => 0,
            GitError::NoMemory { .. } => 1,
            GitError::Os { .. } => 2,
            GitError::Invalid { .. } => 3,
            GitError::Reference { .. } => 4,
            GitError::Zlib { .. } => 5,
            GitError::Repository { .. } => 6,
            GitError::Config { .. } => 7,
            GitError::RegularExpression { .. } => 8,
            GitError::ObjectDatabase { .. } => 9,
            GitError::Index { .. } => 10,
            GitError::Object { .. } => 11,
            GitError::Network { .. } => 12,
            GitError::Tag { .. } => 13,
            GitError::Tree { .. } => 14,
            GitError::Indexer { .. } => 15,
            GitError::Ssl { .. } => 16,
            GitError::Submodule { .. } => 17,
            GitError::Thread { .. } => 18,
            GitError::Stash { .. } => 19,
            GitError::Checkout { .. } => 20,
            GitError::FetchHead { .. } => 21,
            GitError::Merge { .. } => 22,
            GitError::Ssh { .. } => 23,
            GitError::Filter { .. } => 24,
            GitError::Revert { .. } => 25,
            GitError::Callback { .. } => 26,
            GitError::CherryPick { .. } => 27,
            GitError::Describe { .. } => 28,
            GitError::Rebase { .. } => 29,
            GitError::FileSystem { .. } => 30,
        };
        Some(code)
    }

    /// Name of the error class, e.g. `"Repository"`.
    pub fn class_name(&self) -> &'static str {
        match self {
            GitError::Unknown { .. } => "Unknown",
            GitError::None { .. } => "None",
            GitError::NoMemory { .. } => "NoMemory",
            GitError::Os { .. } => "OS",
            GitError::Invalid { .. } => "Invalid",
            GitError::Reference { .. } => "Reference",
            GitError::Zlib { .. } => "ZLib",
            GitError::Repository { .. } => "Repository",
            GitError::Config { .. } => "Config",
            GitError::RegularExpression { .. } => "RegularExpression",
            GitError::ObjectDatabase { .. } => "ObjectDatabase",
            GitError::Index { .. } => "Index",
            GitError::Object { .. } => "Object",
            GitError::Network { .. } => "Network",
            GitError::Tag { .. } => "Tag",
            GitError::Tree { .. } => "Tree",
            GitError::Indexer { .. } => "Indexer",
            GitError::Ssl { .. } => "SSL",
            GitError::Submodule { .. } => "Submodule",
            GitError::Thread { .. } => "Thread",
            GitError::Stash { .. } => "Stash",
            GitError::Checkout { .. } => "Checkout",
            GitError::FetchHead { .. } => "FetchHead",
            GitError::Merge { .. } => "Merge",
            GitError::Ssh { .. } => "SSH",
            GitError::Filter { .. } => "Filter",
            GitError::Revert { .. } => "Revert",
            GitError::Callback { .. } => "Callback",
            GitError::CherryPick { .. } => "CherryPick",
            GitError::Describe { .. } => "Describe",
            GitError::Rebase { .. } => "Rebase",
            GitError::FileSystem { .. } => "FileSystem",
        }
    }

    /// The engine-supplied message.
    pub fn message(&self) -> &str {
        match self {
            GitError::Unknown { message }
            | GitError::None { message }
            | GitError::NoMemory { message }
            | GitError::Os { message }
            | GitError::Invalid { message }
            | GitError::Reference { message }
            | GitError::Zlib { message }
            | GitError::Repository { message }
            | GitError::Config { message }
            | GitError::RegularExpression { message }
            | GitError::ObjectDatabase { message }
            | GitError::Index { message }
            | GitError::Object { message }
            | GitError::Network { message }
            | GitError::Tag { message }
            | GitError::Tree { message }
            | GitError::Indexer { message }
            | GitError::Ssl { message }
            | GitError::Submodule { message }
            | GitError::Thread { message }
            | GitError::Stash { message }
            | GitError::Checkout { message }
            | GitError::FetchHead { message }
            | GitError::Merge { message }
            | GitError::Ssh { message }
            | GitError::Filter { message }
            | GitError::Revert { message }
            | GitError::Callback { message }
            | GitError::CherryPick { message }
            | GitError::Describe { message }
            | GitError::Rebase { message }
            | GitError::FileSystem { message } => message,
        }
    }

    /// Whether this is the "no error" sentinel.
    ///
    /// Callers must not treat the sentinel as a failure.
    pub fn is_none(&self) -> bool {
        matches!(self, GitError::None { .. })
    }
}

/// Class code of a `git2` error as a signed code.
///
/// libgit2's class type is unsigned on most targets. A value that does not
/// fit lands on `-1`, which maps to [`GitError::Unknown`].
pub(crate) fn class_of(err: &git2::Error) -> i32 {
    i32::try_from(err.raw_class()).unwrap_or(-1)
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::from_class(class_of(&err), err.message())
    }
}
