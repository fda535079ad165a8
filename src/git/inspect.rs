// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository state snapshots.
//!
//! A [`RepositoryState`] is taken once per repository per run and never
//! cached. Facts that can change while an operation runs (upstreams,
//! ahead/behind counts) are queried by the executors right before use.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::trace;

use super::backend::GitQuery;
use crate::error::{BulkResult, GitError};

/// Snapshot of one repository at inspection time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryState {
    /// Repository root is a git work tree.
    pub is_valid: bool,
    /// Checked-out branch; `None` when HEAD is detached or has no commits.
    pub current_branch: Option<String>,
    /// Staged, unstaged or untracked changes are present.
    pub has_uncommitted_changes: bool,
    /// Configured remotes in git's order.
    pub remotes: Vec<String>,
    /// Local branch names.
    pub local_branches: BTreeSet<String>,
}

impl RepositoryState {
    /// Whether `branch` exists locally.
    #[must_use]
    pub fn has_local_branch(&self, branch: &str) -> bool {
        self.local_branches.contains(branch)
    }

    /// Whether `branch` is the checked-out branch.
    #[must_use]
    pub fn is_current(&self, branch: &str) -> bool {
        self.current_branch.as_deref() == Some(branch)
    }
}

/// Inspect the repository rooted at `repo`.
///
/// A repository with no commits reports no current branch and a clean tree.
///
/// # Errors
///
/// Returns `GitError::NotARepository` if `repo` is not a work tree (bare
/// repositories included), or a `GitError` if a query fails.
pub fn inspect<G: GitQuery + ?Sized>(git: &G, repo: &Path) -> BulkResult<RepositoryState> {
    if !git.is_work_tree(repo) {
        return Err(GitError::NotARepository {
            path: repo.display().to_string(),
        }
        .into());
    }

    let has_commits = git.has_commits(repo);
    let (current_branch, has_uncommitted_changes) = if has_commits {
        (
            git.current_branch(repo)?,
            git.has_uncommitted_changes(repo)?,
        )
    } else {
        (None, false)
    };

    let state = RepositoryState {
        is_valid: true,
        current_branch,
        has_uncommitted_changes,
        remotes: git.remotes(repo)?,
        local_branches: git.local_branches(repo)?.into_iter().collect(),
    };
    trace!(repo = %repo.display(), ?state, "inspected");
    Ok(state)
}
