// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Check out (or create from a remote) a target branch.
//!
//! ```text
//! current == target   -> Skipped already-on-branch (optional pull)
//! target is local     -> checkout                  -> Switched
//! target on a remote  -> fetch, checkout -b --track -> Created
//! nowhere             -> Failed branch-not-found
//! ```
//!
//! Remotes are searched in configured order; the first one advertising
//! the branch wins.

use bon::Builder;
use std::path::Path;
use tracing::{debug, info};

use super::{Executor, Operation, OperationOutcome, OutcomeKind, Reason, restore_branch};
use crate::git::{GitBackend, RepositoryState};

/// Switch executor settings.
#[derive(Debug, Clone, Builder)]
pub struct SwitchExecutor {
    /// Branch to switch to.
    #[builder(into)]
    target: String,
    #[builder(default = false)]
    dry_run: bool,
    /// `git pull --ff-only` after switching, or when already on the target.
    #[builder(default = false)]
    pull: bool,
}

impl SwitchExecutor {
    /// Fast-forward pull the checked-out target if it tracks an upstream.
    ///
    /// Returns a warning when the pull fails; the outcome tag never changes.
    fn pull_if_tracking(
        &self,
        git: &dyn GitBackend,
        repo: &Path,
    ) -> (Option<&'static str>, Option<String>) {
        if !self.pull || self.dry_run {
            return (None, None);
        }
        match git.upstream(repo, &self.target) {
            Ok(Some(_)) => match git.pull_ff_only(repo) {
                Ok(()) => (Some("pulled"), None),
                Err(e) => (
                    None,
                    Some(format!("pull --ff-only failed: {}", e.diagnostic())),
                ),
            },
            _ => {
                debug!(branch = %self.target, "no upstream, not pulling");
                (None, None)
            }
        }
    }

    /// Undo a partial switch, then report the failure.
    fn fail(
        &self,
        git: &dyn GitBackend,
        repo: &Path,
        original: Option<&str>,
        reason: Reason,
        detail: String,
    ) -> OperationOutcome {
        let mut warnings = Vec::new();
        if let Some(original) = original
            && git.current_branch(repo).ok().flatten().as_deref() != Some(original)
            && let Some(warning) = restore_branch(git, repo, original)
        {
            warnings.push(warning);
        }
        OperationOutcome::failed(reason)
            .with_detail(detail)
            .with_warnings(warnings)
    }

    fn finish(
        &self,
        git: &dyn GitBackend,
        repo: &Path,
        outcome: OperationOutcome,
    ) -> OperationOutcome {
        let (pulled, warning) = self.pull_if_tracking(git, repo);
        let outcome = match pulled {
            Some(note) => {
                let detail = outcome
                    .detail
                    .clone()
                    .map_or_else(|| note.to_string(), |d| format!("{d}, {note}"));
                outcome.with_detail(detail)
            }
            None => outcome,
        };
        outcome.with_warnings(warning.into_iter().collect())
    }
}

impl Executor for SwitchExecutor {
    fn operation(&self) -> Operation {
        Operation::Switch
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
        if state.has_uncommitted_changes {
            return OperationOutcome::skipped(Reason::DirtyTree);
        }

        let target = self.target.as_str();
        let original = state.current_branch.as_deref();

        if state.is_current(target) {
            let outcome = OperationOutcome::skipped(Reason::AlreadyOnBranch);
            return self.finish(git, repo, outcome);
        }

        let from = original.map_or_else(
            || "from detached HEAD".to_string(),
            |branch| format!("from {branch}"),
        );

        if state.has_local_branch(target) {
            if self.dry_run {
                return OperationOutcome::new(OutcomeKind::Switched).with_detail(from);
            }
            if let Err(e) = git.checkout(repo, target) {
                return self.fail(git, repo, original, Reason::CheckoutFailed, e.diagnostic());
            }
            info!(branch = target, "switched");
            let outcome = OperationOutcome::new(OutcomeKind::Switched).with_detail(from);
            return self.finish(git, repo, outcome);
        }

        let Some(remote) = state
            .remotes
            .iter()
            .find(|remote| git.remote_has_branch(repo, remote, target))
        else {
            return OperationOutcome::failed(Reason::BranchNotFound)
                .with_detail(format!("'{target}' not found locally or on any remote"));
        };

        let tracking = format!("tracking {remote}/{target}");
        if self.dry_run {
            return OperationOutcome::new(OutcomeKind::Created).with_detail(tracking);
        }

        if let Err(e) = git.fetch(repo, remote, false) {
            return self.fail(git, repo, original, Reason::FetchFailed, e.diagnostic());
        }
        if let Err(e) = git.create_tracking_branch(repo, target, remote) {
            return self.fail(git, repo, original, Reason::CheckoutFailed, e.diagnostic());
        }
        info!(branch = target, remote = %remote, "created tracking branch");
        let outcome = OperationOutcome::new(OutcomeKind::Created).with_detail(tracking);
        self.finish(git, repo, outcome)
    }
}
