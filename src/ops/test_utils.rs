// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory git backend for executor tests.
//!
//! Models a single repository. Every mutating call is appended to a call
//! log so tests can assert what was (or was not) attempted.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::{BulkResult, GitError};
use crate::git::{AheadBehind, GitMutation, GitQuery, RepositoryState};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeBranch {
    pub upstream: Option<String>,
    /// Upstream configured but its remote-tracking ref was pruned.
    pub upstream_gone: bool,
    pub ahead: u32,
    pub behind: u32,
}

#[derive(Debug, Default)]
pub(crate) struct FakeRepo {
    pub work_tree: bool,
    pub head: Option<String>,
    pub dirty: bool,
    pub remotes: Vec<String>,
    pub branches: BTreeMap<String, FakeBranch>,
    /// Branches advertised by each remote.
    pub remote_branches: BTreeMap<String, BTreeSet<String>>,
    /// Branches whose soft delete is refused.
    pub unmerged: BTreeSet<String>,
    pub fail_fetch: BTreeSet<String>,
    pub fail_checkout: BTreeSet<String>,
    pub fail_merge: BTreeSet<String>,
    pub fail_pull: bool,
    /// Stderr of every `git branch -d/-D`, when set.
    pub delete_error: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    pub repo: RefCell<FakeRepo>,
    pub calls: RefCell<Vec<String>>,
}

fn failed(command: &str, message: &str) -> crate::error::BulkError {
    GitError::CommandFailed {
        command: format!("git {command}"),
        message: message.to_string(),
    }
    .into()
}

impl FakeBackend {
    /// Clean repository on `main` with an `origin` remote.
    pub fn new() -> Self {
        let fake = Self::default();
        {
            let mut repo = fake.repo.borrow_mut();
            repo.work_tree = true;
            repo.head = Some("main".to_string());
            repo.remotes = vec!["origin".to_string()];
        }
        fake.with_branch("main", Some("origin/main"), 0, 0)
    }

    pub fn with_branch(self, name: &str, upstream: Option<&str>, ahead: u32, behind: u32) -> Self {
        self.repo.borrow_mut().branches.insert(
            name.to_string(),
            FakeBranch {
                upstream: upstream.map(String::from),
                upstream_gone: false,
                ahead,
                behind,
            },
        );
        self
    }

    pub fn configure(self, f: impl FnOnce(&mut FakeRepo)) -> Self {
        f(&mut self.repo.borrow_mut());
        self
    }

    /// Snapshot in the shape `git::inspect` would produce.
    pub fn state(&self) -> RepositoryState {
        let repo = self.repo.borrow();
        RepositoryState {
            is_valid: repo.work_tree,
            current_branch: repo.head.clone(),
            has_uncommitted_changes: repo.dirty,
            remotes: repo.remotes.clone(),
            local_branches: repo.branches.keys().cloned().collect(),
        }
    }

    pub fn head(&self) -> Option<String> {
        self.repo.borrow().head.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Calls that would have changed HEAD, branches or the index.
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| !call.starts_with("fetch"))
            .collect()
    }

    fn log(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl GitQuery for FakeBackend {
    fn is_work_tree(&self, _repo: &Path) -> bool {
        self.repo.borrow().work_tree
    }

    fn current_branch(&self, _repo: &Path) -> BulkResult<Option<String>> {
        Ok(self.head())
    }

    fn has_commits(&self, _repo: &Path) -> bool {
        !self.repo.borrow().branches.is_empty()
    }

    fn has_uncommitted_changes(&self, _repo: &Path) -> BulkResult<bool> {
        Ok(self.repo.borrow().dirty)
    }

    fn remotes(&self, _repo: &Path) -> BulkResult<Vec<String>> {
        Ok(self.repo.borrow().remotes.clone())
    }

    fn local_branches(&self, _repo: &Path) -> BulkResult<Vec<String>> {
        Ok(self.repo.borrow().branches.keys().cloned().collect())
    }

    fn upstream(&self, _repo: &Path, branch: &str) -> BulkResult<Option<String>> {
        Ok(self
            .repo
            .borrow()
            .branches
            .get(branch)
            .filter(|b| !b.upstream_gone)
            .and_then(|b| b.upstream.clone()))
    }

    fn has_upstream_config(&self, _repo: &Path, branch: &str) -> bool {
        self.repo
            .borrow()
            .branches
            .get(branch)
            .is_some_and(|b| b.upstream.is_some())
    }

    fn ahead_behind(&self, _repo: &Path, branch: &str, _upstream: &str) -> BulkResult<AheadBehind> {
        let repo = self.repo.borrow();
        let b = repo
            .branches
            .get(branch)
            .ok_or_else(|| failed("rev-list", "unknown revision"))?;
        Ok(AheadBehind {
            ahead: b.ahead,
            behind: b.behind,
        })
    }

    fn commits_between(
        &self,
        _repo: &Path,
        branch: &str,
        _upstream: &str,
    ) -> BulkResult<Vec<String>> {
        let behind = self
            .repo
            .borrow()
            .branches
            .get(branch)
            .map_or(0, |b| b.behind);
        Ok((1..=behind).map(|i| format!("c{i:05} upstream commit {i}")).collect())
    }

    fn remote_has_branch(&self, _repo: &Path, remote: &str, branch: &str) -> bool {
        self.repo
            .borrow()
            .remote_branches
            .get(remote)
            .is_some_and(|branches| branches.contains(branch))
    }
}

impl GitMutation for FakeBackend {
    fn fetch(&self, _repo: &Path, remote: &str, prune: bool) -> BulkResult<()> {
        self.log(format!("fetch {remote} prune={prune}"));
        if self.repo.borrow().fail_fetch.contains(remote) {
            return Err(failed("fetch", "could not read from remote repository"));
        }
        Ok(())
    }

    fn checkout(&self, _repo: &Path, branch: &str) -> BulkResult<()> {
        self.log(format!("checkout {branch}"));
        let mut repo = self.repo.borrow_mut();
        if repo.fail_checkout.contains(branch) || !repo.branches.contains_key(branch) {
            return Err(failed("checkout", "pathspec did not match"));
        }
        repo.head = Some(branch.to_string());
        Ok(())
    }

    fn create_tracking_branch(&self, _repo: &Path, branch: &str, remote: &str) -> BulkResult<()> {
        self.log(format!("create {branch} from {remote}"));
        let mut repo = self.repo.borrow_mut();
        if repo.fail_checkout.contains(branch) {
            return Err(failed("checkout", "cannot create branch"));
        }
        repo.branches.insert(
            branch.to_string(),
            FakeBranch {
                upstream: Some(format!("{remote}/{branch}")),
                ..FakeBranch::default()
            },
        );
        repo.head = Some(branch.to_string());
        Ok(())
    }

    fn merge_ff_only(&self, _repo: &Path, upstream: &str) -> BulkResult<()> {
        self.log(format!("merge {upstream}"));
        let mut repo = self.repo.borrow_mut();
        let head = repo.head.clone().unwrap_or_default();
        if repo.fail_merge.contains(&head) {
            return Err(failed("merge", "Not possible to fast-forward, aborting."));
        }
        let branch = repo
            .branches
            .get_mut(&head)
            .ok_or_else(|| failed("merge", "no current branch"))?;
        if branch.ahead > 0 {
            return Err(failed("merge", "Not possible to fast-forward, aborting."));
        }
        branch.behind = 0;
        Ok(())
    }

    fn pull_ff_only(&self, _repo: &Path) -> BulkResult<()> {
        self.log("pull".to_string());
        if self.repo.borrow().fail_pull {
            return Err(failed("pull", "Not possible to fast-forward, aborting."));
        }
        Ok(())
    }

    fn delete_branch(&self, _repo: &Path, branch: &str, force: bool) -> BulkResult<()> {
        self.log(format!("delete {branch} force={force}"));
        let mut repo = self.repo.borrow_mut();
        if let Some(message) = &repo.delete_error {
            return Err(failed("branch", message));
        }
        if !force && repo.unmerged.contains(branch) {
            return Err(failed(
                "branch",
                &format!("error: the branch '{branch}' is not fully merged"),
            ));
        }
        repo.branches.remove(branch);
        Ok(())
    }
}
