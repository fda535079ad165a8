// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitbulk using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitbulk [global options] <command>
//! sync   [-n]
//! switch -b BRANCH [-n] [-p]
//! prune  -b BRANCH [-f] [-y]
//! status
//! options
//! ```

pub mod global;
pub mod ops;


use crate::cli::global::GlobalOptions;
use crate::cli::ops::{PruneArgs, SwitchArgs, SyncArgs};
use clap::{Parser, Subcommand};

/// Bulk Git operations across a directory tree.
#[derive(Debug, Parser)]
#[command(
    name = "gitbulk",
    author,
    version,
    about = "Sync, switch and prune branches across many Git repositories",
    long_about = "gitbulk Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Walks a directory tree, finds every Git repository below it and\n\
                  applies one operation to each of them in turn. See\n\
                  `gitbulk <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  gitbulk reads `gitbulk.toml` from the current directory when it\n\
                  exists, then every file given with --config, in order. GITBULK_*\n\
                  environment variables (GITBULK_SYNC__PRUNE=false) override files,\n\
                  and command-line flags override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetches every remote and fast-forwards every tracking branch.
    Sync(SyncArgs),

    /// Checks out a branch, creating it from a remote when needed.
    Switch(SwitchArgs),

    /// Deletes a local branch.
    Prune(PruneArgs),

    /// Lists the current branch, dirtiness and remotes of each repository.
    Status,

    /// Lists all options and their values, and the config files read.
    Options,
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
