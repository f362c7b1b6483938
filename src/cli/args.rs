//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gitwalk - open and discover git repositories
#[derive(Parser, Debug)]
#[command(name = "gitwalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if gitwalk was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the repository enclosing a path
    #[command(
        name = "discover",
        long_about = "Find the repository enclosing a path.\n\n\
            Starts at PATH (default: the current directory) and walks up through \
            parent directories until a repository is found. The start directory is \
            always checked. The walk stops early at any ceiling directory and, \
            unless --across-fs is given, at filesystem boundaries.\n\n\
            Prints the repository's git directory. Finding nothing is not an error.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Where is the repository for this directory?
    gitwalk discover

    # Don't look above your home directory
    gitwalk discover src/deep/dir --ceiling ~

    # Ceilings may be given as file: URLs
    gitwalk discover --ceiling file:///srv

    # Keep walking across mount points
    gitwalk discover --across-fs"
    )]
    Discover {
        /// Directory to start from
        path: Option<PathBuf>,

        /// Keep walking across filesystem boundaries
        #[arg(long, conflicts_with = "no_across_fs")]
        across_fs: bool,

        /// Stop at filesystem boundaries (overrides config)
        #[arg(long)]
        no_across_fs: bool,

        /// Directory at which to stop walking up (path or file: URL)
        #[arg(long = "ceiling", value_name = "LOCATION")]
        ceilings: Vec<String>,
    },

    /// Open a repository and describe it
    #[command(
        name = "open",
        long_about = "Open a repository and describe it.\n\n\
            PATH must be a git directory (bare or .git) or a working directory; \
            parent directories are not searched. Bare and non-bare layouts are \
            detected automatically.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Open a working copy
    gitwalk open ~/src/project

    # Open a bare repository
    gitwalk open /srv/git/project.git

    # Combine with discover
    gitwalk open \"$(gitwalk discover -q)\""
    )]
    Open {
        /// Repository or working directory to open
        path: PathBuf,
    },

    /// Show configuration values
    #[command(
        name = "config",
        long_about = "Show gitwalk configuration.\n\n\
            Configuration is read from $GITWALK_CONFIG, \
            $XDG_CONFIG_HOME/gitwalk/config.toml or ~/.gitwalk/config.toml.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List all configuration values
    gitwalk config list

    # Get a specific value
    gitwalk config get discover.across_filesystems"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for gitwalk commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    gitwalk completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    gitwalk completion zsh >> ~/.zshrc

    # Fish
    gitwalk completion fish > ~/.config/fish/completions/gitwalk.fish

    # PowerShell
    gitwalk completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn discover_collects_ceilings() {
        let cli = Cli::try_parse_from([
            "gitwalk",
            "discover",
            "src",
            "--ceiling",
            "/home",
            "--ceiling",
            "file:///srv",
        ])
        .unwrap();

        match cli.command {
            Command::Discover {
                path,
                across_fs,
                ceilings,
                ..
            } => {
                assert_eq!(path, Some(PathBuf::from("src")));
                assert!(!across_fs);
                assert_eq!(ceilings, vec!["/home", "file:///srv"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn across_fs_flags_conflict() {
        let result = Cli::try_parse_from(["gitwalk", "discover", "--across-fs", "--no-across-fs"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gitwalk", "open", "/tmp/x", "--json", "-q"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
    }
}
