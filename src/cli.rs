// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The global flags configure the API client (and fall back to environment
// variables); each subcommand is one way of looking at a repository.
// =============================================================================

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "repo-browser",
    version,
    about = "Browse the files of a public GitHub repository from the terminal",
    long_about = "repo-browser walks the directory tree of a public GitHub repository, \
                  shows file contents and downloads individual files without cloning."
)]
pub struct Cli {
    /// Base URL of the GitHub REST API
    #[arg(long, global = true, env = "REPO_BROWSER_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "REPO_BROWSER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, global = true, env = "REPO_BROWSER_USER_AGENT")]
    pub user_agent: Option<String>,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show repository details and its top-level files
    ///
    /// Example: repo-browser info https://github.com/rust-lang/rust
    Info {
        /// Repository URL or owner/name shorthand
        repo: String,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List a directory
    ///
    /// Example: repo-browser ls tokio-rs/tokio tokio/src
    Ls {
        /// Repository URL or owner/name shorthand
        repo: String,

        /// Directory path inside the repository (default: root)
        path: Option<String>,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a file's content
    ///
    /// Example: repo-browser cat serde-rs/serde README.md
    Cat {
        /// Repository URL or owner/name shorthand
        repo: String,

        /// File path inside the repository
        path: String,
    },

    /// Save a file to disk
    ///
    /// Example: repo-browser download serde-rs/serde serde/Cargo.toml -o serde.toml
    Download {
        /// Repository URL or owner/name shorthand
        repo: String,

        /// File path inside the repository
        path: String,

        /// Where to write the file (default: the file's name, in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Browse interactively (type `help` at the prompt)
    Browse {
        /// Repository to open right away
        repo: Option<String>,
    },
}
