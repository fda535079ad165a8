// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-repository bulk operations.
//!
//! ```text
//! process_repo(executor, git, path)
//!   |
//!   +-- read_dir fails ----------> Skipped  access-error
//!   +-- inspect() fails ---------> Skipped  invalid-repo
//!   |
//!   v
//! Executor::execute(git, path, state)
//!   sync    fetch remotes, ff-merge tracked branches, restore HEAD
//!   switch  checkout or create tracking branch, optional pull
//!   prune   delete local branch (never the checked-out one)
//!   |
//!   v
//! OperationOutcome --> report::Aggregator::record
//! ```
//!
//! Executors never return errors. Every git failure is caught at the
//! narrowest scope (branch or repository) and becomes part of an outcome.

pub mod prune;
pub mod switch;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_utils;

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

use crate::error::FsError;
use crate::git::{GitBackend, RepositoryState, inspect};

pub use prune::PruneExecutor;
pub use switch::SwitchExecutor;
pub use sync::SyncExecutor;

/// The bulk action selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Sync,
    Switch,
    Prune,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Switch => "switch",
            Self::Prune => "prune",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result tag of one repository (or one branch, for sync).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Updated,
    Switched,
    Created,
    Deleted,
    Skipped,
    Failed,
}

impl OutcomeKind {
    /// Whether the repository counts as succeeded in the summary.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(
            self,
            Self::Updated | Self::Switched | Self::Created | Self::Deleted
        )
    }

    /// Report marker.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Skipped => '-',
            Self::Failed => '✗',
            _ => '✓',
        }
    }

    /// Human label, with the conditional form used in dry-run reports.
    #[must_use]
    pub const fn label(self, dry_run: bool) -> &'static str {
        match (self, dry_run) {
            (Self::Updated, false) => "Updated",
            (Self::Updated, true) => "Would update",
            (Self::Switched, false) => "Switched",
            (Self::Switched, true) => "Would switch",
            (Self::Created, false) => "Created",
            (Self::Created, true) => "Would create",
            (Self::Deleted, false) => "Deleted",
            (Self::Deleted, true) => "Would delete",
            (Self::Skipped, _) => "Skipped",
            (Self::Failed, _) => "Failed",
        }
    }
}

/// Machine-readable cause attached to skipped and failed outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    // repository state
    InvalidRepo,
    DetachedHead,
    DirtyTree,
    NoRemotes,
    AccessError,
    // sync
    UpToDate,
    NoUpstream,
    NonFastForward,
    CompareFailed,
    UpstreamGone,
    // switch / prune
    AlreadyOnBranch,
    BranchNotFound,
    BranchCheckedOut,
    UnmergedCommits,
    DeleteFailed,
    CheckoutFailed,
    FetchFailed,
}

impl Reason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRepo => "invalid-repo",
            Self::DetachedHead => "detached-head",
            Self::DirtyTree => "dirty-tree",
            Self::NoRemotes => "no-remotes",
            Self::AccessError => "access-error",
            Self::UpToDate => "up-to-date",
            Self::NoUpstream => "no-upstream",
            Self::NonFastForward => "non-fast-forward",
            Self::CompareFailed => "compare-failed",
            Self::UpstreamGone => "upstream-gone",
            Self::AlreadyOnBranch => "already-on-branch",
            Self::BranchNotFound => "branch-not-found",
            Self::BranchCheckedOut => "branch-checked-out",
            Self::UnmergedCommits => "unmerged-commits",
            Self::DeleteFailed => "delete-failed",
            Self::CheckoutFailed => "checkout-failed",
            Self::FetchFailed => "fetch-failed",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result for a single branch within a sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchOutcome {
    pub branch: String,
    pub kind: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Upstream commits that could not be merged (first few, then "N more").
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preview: Vec<String>,
}

impl BranchOutcome {
    fn new(branch: &str, kind: OutcomeKind) -> Self {
        Self {
            branch: branch.to_string(),
            kind,
            reason: None,
            commits: None,
            detail: None,
            preview: Vec::new(),
        }
    }

    pub(crate) fn updated(branch: &str, commits: u32) -> Self {
        Self {
            commits: Some(commits),
            ..Self::new(branch, OutcomeKind::Updated)
        }
    }

    pub(crate) fn skipped(branch: &str, reason: Reason) -> Self {
        Self {
            reason: Some(reason),
            ..Self::new(branch, OutcomeKind::Skipped)
        }
    }

    pub(crate) fn failed(branch: &str, reason: Reason, detail: impl Into<String>) -> Self {
        Self {
            reason: Some(reason),
            detail: Some(detail.into()).filter(|d: &String| !d.is_empty()),
            ..Self::new(branch, OutcomeKind::Failed)
        }
    }
}

/// Result of running one operation against one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationOutcome {
    /// Display name (path relative to the base directory).
    pub repo: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub kind: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Commits pulled (sync, sum over branches) or would be pulled in dry-run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<BranchOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub dry_run: bool,
}

impl OperationOutcome {
    /// Outcome with the given tag and nothing else filled in.
    #[must_use]
    pub fn new(kind: OutcomeKind) -> Self {
        Self {
            repo: String::new(),
            path: PathBuf::new(),
            kind,
            reason: None,
            detail: None,
            commits: None,
            branches: Vec::new(),
            warnings: Vec::new(),
            dry_run: false,
        }
    }

    #[must_use]
    pub fn skipped(reason: Reason) -> Self {
        Self::new(OutcomeKind::Skipped).with_reason(reason)
    }

    #[must_use]
    pub fn failed(reason: Reason) -> Self {
        Self::new(OutcomeKind::Failed).with_reason(reason)
    }

    #[must_use]
    pub const fn with_reason(mut self, reason: Reason) -> Self {
        self.reason = Some(reason);
        self
    }

    /// Attach a human-readable detail; empty strings are dropped.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if !detail.is_empty() {
            self.detail = Some(detail);
        }
        self
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// Name the repository this outcome belongs to.
    #[must_use]
    pub fn for_repo(mut self, name: impl Into<String>, path: &Path) -> Self {
        self.repo = name.into();
        self.path = path.to_path_buf();
        self
    }

    /// Number of branches with the given tag.
    #[must_use]
    pub fn count_branches(&self, kind: OutcomeKind) -> usize {
        self.branches.iter().filter(|b| b.kind == kind).count()
    }
}

/// One bulk action, applied to a single inspected repository.
pub trait Executor {
    /// Which operation this executor performs.
    fn operation(&self) -> Operation;

    /// Whether the executor only reports intended actions.
    fn dry_run(&self) -> bool {
        false
    }

    /// Run against `repo`, whose state was just inspected.
    fn execute(
        &self,
        git: &dyn GitBackend,
        repo: &Path,
        state: &RepositoryState,
    ) -> OperationOutcome;
}

/// Check access, inspect and execute one repository.
///
/// Always returns exactly one outcome for the repository.
pub fn process_repo(
    executor: &dyn Executor,
    git: &dyn GitBackend,
    repo: &Path,
    name: &str,
) -> OperationOutcome {
    let _span = info_span!("repo", name, op = %executor.operation()).entered();

    let outcome = if let Err(e) = std::fs::read_dir(repo) {
        let err = FsError::from_io(repo, e);
        debug!(error = %err, "repository not accessible");
        OperationOutcome::skipped(Reason::AccessError).with_detail(err.to_string())
    } else {
        match inspect(git, repo) {
            Ok(state) => executor.execute(git, repo, &state),
            Err(e) => {
                debug!(error = %e, "not a valid work tree");
                OperationOutcome::skipped(Reason::InvalidRepo)
            }
        }
    };

    let outcome = outcome.with_dry_run(executor.dry_run());
    debug!(kind = ?outcome.kind, reason = ?outcome.reason, "done");
    outcome.for_repo(name, repo)
}

/// Restore `branch` after HEAD was moved, returning a warning on failure.
pub(crate) fn restore_branch(git: &dyn GitBackend, repo: &Path, branch: &str) -> Option<String> {
    match git.checkout(repo, branch) {
        Ok(()) => {
            debug!(branch, "restored original branch");
            None
        }
        Err(e) => {
            debug!(branch, error = %e, "could not restore original branch");
            Some(format!(
                "could not restore branch '{branch}': {}",
                e.diagnostic()
            ))
        }
    }
}
