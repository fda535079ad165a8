// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fetch every remote and fast-forward every tracked branch.
//!
//! ```text
//! preconditions: branch checked out, clean tree, >= 1 remote
//!   |
//!   v
//! fetch each remote (failure -> warning)
//!   |
//!   v
//! for branch in local branches (sorted), with upstream:
//!   upstream ref pruned  -> Skipped upstream-gone
//!   behind == 0          -> Skipped up-to-date
//!   ahead > 0            -> Failed  non-fast-forward (+ preview)
//!   dry-run              -> Updated (would update, +behind)
//!   checkout, merge --ff -> Updated +behind | Failed
//!   |
//!   v
//! restore original branch (failure -> warning)
//! ```

use bon::Builder;
use std::path::Path;
use tracing::{debug, info};

use super::{
    BranchOutcome, Executor, Operation, OperationOutcome, OutcomeKind, Reason, restore_branch,
};
use crate::git::{GitBackend, RepositoryState};

/// Sync executor settings.
#[derive(Debug, Clone, Builder)]
pub struct SyncExecutor {
    /// Report intended merges without touching HEAD or branches.
    #[builder(default = false)]
    dry_run: bool,
    /// Pass `--prune` to every fetch.
    #[builder(default = true)]
    prune: bool,
    /// Upstream commits shown when a fast-forward is impossible.
    #[builder(default = 5)]
    preview_commits: usize,
}

impl Default for SyncExecutor {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SyncExecutor {
    fn sync_branch(
        &self,
        git: &dyn GitBackend,
        repo: &Path,
        branch: &str,
        upstream: &str,
        head: &mut String,
    ) -> BranchOutcome {
        let counts = match git.ahead_behind(repo, branch, upstream) {
            Ok(counts) => counts,
            Err(e) => {
                return BranchOutcome::failed(branch, Reason::CompareFailed, e.diagnostic());
            }
        };

        if counts.behind == 0 {
            debug!(branch, upstream, "up to date");
            return BranchOutcome::skipped(branch, Reason::UpToDate);
        }

        if counts.ahead > 0 {
            let mut outcome = BranchOutcome::failed(
                branch,
                Reason::NonFastForward,
                format!(
                    "diverged from {upstream} ({} ahead, {} behind)",
                    counts.ahead, counts.behind
                ),
            );
            outcome.preview = self.preview(git, repo, branch, upstream);
            return outcome;
        }

        if self.dry_run {
            info!(branch, behind = counts.behind, "would fast-forward");
            return BranchOutcome::updated(branch, counts.behind);
        }

        if head.as_str() != branch {
            if let Err(e) = git.checkout(repo, branch) {
                return BranchOutcome::failed(branch, Reason::CheckoutFailed, e.diagnostic());
            }
            branch.clone_into(head);
        }

        match git.merge_ff_only(repo, upstream) {
            Ok(()) => {
                info!(branch, commits = counts.behind, "fast-forwarded");
                BranchOutcome::updated(branch, counts.behind)
            }
            Err(e) => {
                let mut outcome =
                    BranchOutcome::failed(branch, Reason::NonFastForward, e.diagnostic());
                outcome.preview = self.preview(git, repo, branch, upstream);
                outcome
            }
        }
    }

    /// First `preview_commits` upstream-only commits, plus an "N more" line.
    fn preview(
        &self,
        git: &dyn GitBackend,
        repo: &Path,
        branch: &str,
        upstream: &str,
    ) -> Vec<String> {
        let Ok(mut commits) = git.commits_between(repo, branch, upstream) else {
            return Vec::new();
        };
        if commits.len() > self.preview_commits {
            let hidden = commits.len() - self.preview_commits;
            commits.truncate(self.preview_commits);
            commits.push(format!("... and {hidden} more"));
        }
        commits
    }
}

impl Executor for SyncExecutor {
    fn operation(&self) -> Operation {
        Operation::Sync
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn execute(
        &self,
        git: &dyn GitBackend,
        repo: &Path,
        state: &RepositoryState,
    ) -> OperationOutcome {
        let Some(original) = state.current_branch.as_deref() else {
            return OperationOutcome::skipped(Reason::DetachedHead);
        };
        if state.has_uncommitted_changes {
            return OperationOutcome::skipped(Reason::DirtyTree);
        }
        if state.remotes.is_empty() {
            return OperationOutcome::skipped(Reason::NoRemotes);
        }

        let mut warnings = Vec::new();
        for remote in &state.remotes {
            if let Err(e) = git.fetch(repo, remote, self.prune) {
                debug!(remote, error = %e, "fetch failed");
                warnings.push(format!("fetch from '{remote}' failed: {}", e.diagnostic()));
            }
        }

        let mut head = original.to_string();
        let mut branches = Vec::new();
        for branch in &state.local_branches {
            let upstream = match git.upstream(repo, branch) {
                Ok(Some(upstream)) => upstream,
                Ok(None) if git.has_upstream_config(repo, branch) => {
                    debug!(branch, "upstream gone");
                    branches.push(BranchOutcome::skipped(branch, Reason::UpstreamGone));
                    continue;
                }
                Ok(None) => {
                    debug!(branch, "no upstream");
                    continue;
                }
                Err(e) => {
                    branches.push(BranchOutcome::failed(
                        branch,
                        Reason::CompareFailed,
                        e.diagnostic(),
                    ));
                    continue;
                }
            };
            branches.push(self.sync_branch(git, repo, branch, &upstream, &mut head));
        }

        if head != original
            && let Some(warning) = restore_branch(git, repo, original)
        {
            warnings.push(warning);
        }

        let commits: u32 = branches
            .iter()
            .filter(|b| b.kind == OutcomeKind::Updated)
            .filter_map(|b| b.commits)
            .sum();

        let outcome = if branches.iter().any(|b| b.kind == OutcomeKind::Failed) {
            let failed: Vec<_> = branches
                .iter()
                .filter(|b| b.kind == OutcomeKind::Failed)
                .map(|b| b.branch.as_str())
                .collect();
            let reason = branches
                .iter()
                .find(|b| b.kind == OutcomeKind::Failed)
                .and_then(|b| b.reason)
                .unwrap_or(Reason::NonFastForward);
            OperationOutcome::failed(reason).with_detail(failed.join(", "))
        } else if branches.iter().any(|b| b.kind == OutcomeKind::Updated) {
            OperationOutcome::new(OutcomeKind::Updated)
        } else if branches.is_empty() {
            OperationOutcome::skipped(Reason::NoUpstream)
        } else if branches.iter().any(|b| b.reason == Some(Reason::UpToDate)) {
            OperationOutcome::skipped(Reason::UpToDate)
        } else {
            OperationOutcome::skipped(Reason::UpstreamGone)
        };

        OperationOutcome {
            commits: (commits > 0).then_some(commits),
            branches,
            ..outcome
        }
        .with_warnings(warnings)
    }
}
