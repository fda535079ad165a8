// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the bulk operations.
//!
//! ```text
//! sync   [-n]                → fetch, fast-forward tracking branches
//! switch -b BRANCH [-n] [-p] → checkout or create from a remote
//! prune  -b BRANCH [-f] [-y] → delete a local branch
//! ```

use clap::Args;

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    /// Reports what would be updated without changing anything.
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Fetches without --prune.
    #[arg(long = "no-prune")]
    pub no_prune: bool,

    /// Number of upstream commits listed for a branch that cannot be fast-forwarded.
    #[arg(long = "preview", value_name = "N")]
    pub preview_commits: Option<usize>,
}

/// Arguments for the `switch` command.
#[derive(Debug, Clone, Args)]
pub struct SwitchArgs {
    /// Branch to check out.
    #[arg(short = 'b', long = "branch", value_name = "NAME", required = true)]
    pub branch: String,

    /// Reports what would be switched without changing anything.
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Fast-forward pulls after switching, or when already on the branch.
    #[arg(short = 'p', long)]
    pub pull: bool,
}

/// Arguments for the `prune` command.
#[derive(Debug, Clone, Args)]
pub struct PruneArgs {
    /// Branch to delete.
    #[arg(short = 'b', long = "branch", value_name = "NAME", required = true)]
    pub branch: String,

    /// Deletes even when the branch has unmerged commits (`git branch -D`).
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Skips the confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}
