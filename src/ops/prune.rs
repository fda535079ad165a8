// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Delete a local branch.
//!
//! The checked-out branch is never deleted, whatever the flags. A dirty
//! tree does not block deletion. Confirmation is the caller's job and
//! happens before any repository is visited.

use bon::Builder;
use std::path::Path;
use tracing::info;

use super::{Executor, Operation, OperationOutcome, OutcomeKind, Reason};
use crate::git::{GitBackend, RepositoryState};

/// Prune executor settings.
#[derive(Debug, Clone, Builder)]
pub struct PruneExecutor {
    /// Branch to delete.
    #[builder(into)]
    target: String,
    /// Use `git branch -D` instead of `-d`.
    #[builder(default = false)]
    force: bool,
}

impl Executor for PruneExecutor {
    fn operation(&self) -> Operation {
        Operation::Prune
    }

    fn execute(
        &self,
        git: &dyn GitBackend,
        repo: &Path,
        state: &RepositoryState,
    ) -> OperationOutcome {
        let target = self.target.as_str();

        if !state.has_local_branch(target) {
            return OperationOutcome::skipped(Reason::BranchNotFound);
        }
        if state.is_current(target) {
            return OperationOutcome::skipped(Reason::BranchCheckedOut);
        }

        match git.delete_branch(repo, target, self.force) {
            Ok(()) => {
                info!(branch = target, force = self.force, "deleted");
                OperationOutcome::new(OutcomeKind::Deleted)
            }
            Err(e) => {
                let detail = e.diagnostic();
                let reason = if !self.force && detail.contains("not fully merged") {
                    Reason::UnmergedCommits
                } else {
                    Reason::DeleteFailed
                };
                OperationOutcome::failed(reason).with_detail(detail)
            }
        }
    }
}
