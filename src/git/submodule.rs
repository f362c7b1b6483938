//! git::submodule
//!
//! Values of the `submodule.<name>.ignore` setting, which controls how deeply
//! the working directory is inspected when computing submodule status.

use std::fmt;
use std::str::FromStr;

/// How much of a submodule's state to ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmoduleIgnore {
    /// Use the submodule's configuration.
    Unspecified,
    /// Ignore nothing; even untracked files make the submodule dirty.
    None,
    /// Ignore untracked files.
    Untracked,
    /// Ignore working directory changes, only a moved HEAD counts.
    Dirty,
    /// Never consider the submodule dirty.
    All,
}

impl SubmoduleIgnore {
    /// The engine's numeric value.
    pub fn raw(self) -> i32 {
        match self {
            SubmoduleIgnore::Unspecified => -1,
            SubmoduleIgnore::None => 1,
            SubmoduleIgnore::Untracked => 2,
            SubmoduleIgnore::Dirty => 3,
            SubmoduleIgnore::All => 4,
        }
    }

    /// Parse the engine's numeric value.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            -1 => Some(SubmoduleIgnore::Unspecified),
            1 => Some(SubmoduleIgnore::None),
            2 => Some(SubmoduleIgnore::Untracked),
            3 => Some(SubmoduleIgnore::Dirty),
            4 => Some(SubmoduleIgnore::All),
            _ => None,
        }
    }

    /// The spelling used in git config files.
    pub fn as_str(self) -> &'static str {
        match self {
            SubmoduleIgnore::Unspecified => "unspecified",
            SubmoduleIgnore::None => "none",
            SubmoduleIgnore::Untracked => "untracked",
            SubmoduleIgnore::Dirty => "dirty",
            SubmoduleIgnore::All => "all",
        }
    }
}

impl fmt::Display for SubmoduleIgnore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmoduleIgnore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unspecified" => Ok(SubmoduleIgnore::Unspecified),
            "none" => Ok(SubmoduleIgnore::None),
            "untracked" => Ok(SubmoduleIgnore::Untracked),
            "dirty" => Ok(SubmoduleIgnore::Dirty),
            "all" => Ok(SubmoduleIgnore::All),
            other => Err(format!(
                "invalid submodule ignore value '{}', must be one of: none, untracked, dirty, all",
                other
            )),
        }
    }
}

impl From<git2::SubmoduleIgnore> for SubmoduleIgnore {
    fn from(value: git2::SubmoduleIgnore) -> Self {
        match value {
            git2::SubmoduleIgnore::Unspecified => SubmoduleIgnore::Unspecified,
            git2::SubmoduleIgnore::None => SubmoduleIgnore::None,
            git2::SubmoduleIgnore::Untracked => SubmoduleIgnore::Untracked,
            git2::SubmoduleIgnore::Dirty => SubmoduleIgnore::Dirty,
            git2::SubmoduleIgnore::All => SubmoduleIgnore::All,
        }
    }
}

impl From<SubmoduleIgnore> for git2::SubmoduleIgnore {
    fn from(value: SubmoduleIgnore) -> Self {
        match value {
            SubmoduleIgnore::Unspecified => git2::SubmoduleIgnore::Unspecified,
            SubmoduleIgnore::None => git2::SubmoduleIgnore::None,
            SubmoduleIgnore::Untracked => git2::SubmoduleIgnore::Untracked,
            SubmoduleIgnore::Dirty => git2::SubmoduleIgnore::Dirty,
            SubmoduleIgnore::All => git2::SubmoduleIgnore::All,
        }
    }
}
