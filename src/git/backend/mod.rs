// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)  --+
//!                    +--> GitBackend --> ShellBackend (git CLI)
//! GitMutation (write)+               \-> FakeBackend (unit tests)
//! ```
//!
//! Every call takes the repository root explicitly; nothing changes the
//! process working directory.

use std::path::{Path, PathBuf};

use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{BulkResult, ConfigError, GitError};

/// Commit counts of a branch relative to its upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AheadBehind {
    /// Commits on the branch that upstream does not have.
    pub ahead: u32,
    /// Commits on upstream that the branch does not have.
    pub behind: u32,
}

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Check if `repo` is the root of a git work tree (bare repos are not).
    fn is_work_tree(&self, repo: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be run at all.
    fn current_branch(&self, repo: &Path) -> BulkResult<Option<String>>;

    /// Check whether HEAD resolves to a commit.
    fn has_commits(&self, repo: &Path) -> bool;

    /// Check for uncommitted changes (staged, unstaged, or untracked files).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status check fails.
    fn has_uncommitted_changes(&self, repo: &Path) -> BulkResult<bool>;

    /// Configured remotes, in git's order.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remotes cannot be listed.
    fn remotes(&self, repo: &Path) -> BulkResult<Vec<String>>;

    /// Local branch names.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the refs cannot be listed.
    fn local_branches(&self, repo: &Path) -> BulkResult<Vec<String>>;

    /// Upstream of `branch` (e.g. `origin/main`), None if not tracking or
    /// if the remote-tracking ref no longer exists.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be run at all.
    fn upstream(&self, repo: &Path, branch: &str) -> BulkResult<Option<String>>;

    /// Whether `branch` has `branch.<name>.merge` set, resolvable or not.
    fn has_upstream_config(&self, repo: &Path, branch: &str) -> bool;

    /// Ahead/behind counts of local `branch` against `upstream`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the revisions cannot be compared.
    fn ahead_behind(&self, repo: &Path, branch: &str, upstream: &str) -> BulkResult<AheadBehind>;

    /// One-line summaries of commits on `upstream` that local `branch` lacks.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the log cannot be read.
    fn commits_between(
        &self,
        repo: &Path,
        branch: &str,
        upstream: &str,
    ) -> BulkResult<Vec<String>>;

    /// Whether `remote` advertises `branch`. Unreachable remotes report false.
    fn remote_has_branch(&self, repo: &Path, remote: &str, branch: &str) -> bool;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
pub trait GitMutation {
    /// Fetch from a remote, optionally pruning deleted remote branches.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the fetch fails.
    fn fetch(&self, repo: &Path, remote: &str, prune: bool) -> BulkResult<()>;

    /// Checkout an existing local branch.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout fails.
    fn checkout(&self, repo: &Path, branch: &str) -> BulkResult<()>;

    /// Create `branch` tracking `remote/branch` and check it out.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branch cannot be created.
    fn create_tracking_branch(&self, repo: &Path, branch: &str, remote: &str) -> BulkResult<()>;

    /// Fast-forward the checked-out branch to `upstream`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if a fast-forward is not possible.
    fn merge_ff_only(&self, repo: &Path, upstream: &str) -> BulkResult<()>;

    /// `git pull --ff-only` on the checked-out branch.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the pull fails or would need a merge commit.
    fn pull_ff_only(&self, repo: &Path) -> BulkResult<()>;

    /// Delete a local branch (`-d`, or `-D` when `force`).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git refuses to delete the branch.
    fn delete_branch(&self, repo: &Path, branch: &str, force: bool) -> BulkResult<()>;
}

/// Everything an executor needs from git.
pub trait GitBackend: GitQuery + GitMutation {}

impl<T: GitQuery + GitMutation> GitBackend for T {}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    program: PathBuf,
}

impl ShellBackend {
    /// Resolve `program` (usually `"git"`) on PATH.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ToolNotFound` if the executable cannot be found.
    pub fn locate(program: &str) -> std::result::Result<Self, ConfigError> {
        ProcessBuilder::find(program)
            .map(|program| Self { program })
            .ok_or_else(|| ConfigError::ToolNotFound {
                name: program.to_string(),
            })
    }

    /// Path of the git executable in use.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run git in `cwd`, returning the raw output regardless of exit status.
    ///
    /// Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0` so no
    /// credential prompt can block, and `GIT_CEILING_DIRECTORIES` to the
    /// parent of `cwd` so a broken `.git` never falls through to an
    /// enclosing repository.
    pub(crate) fn git_output(&self, args: &[&str], cwd: &Path) -> BulkResult<ProcessOutput> {
        let mut builder = ProcessBuilder::new(&self.program)
            .name("git")
            .args(args)
            .cwd(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .flag(ProcessFlags::ALLOW_FAILURE);
        if let Some(parent) = cwd.parent() {
            builder = builder.env(
                "GIT_CEILING_DIRECTORIES",
                parent.to_string_lossy().into_owned(),
            );
        }
        builder.run()
    }

    /// Run git in `cwd` and return trimmed stdout, failing on non-zero exit.
    pub(crate) fn git_command(&self, args: &[&str], cwd: &Path) -> BulkResult<String> {
        let output = self.git_output(args, cwd)?;
        if !output.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: output.stderr().to_string(),
            }
            .into());
        }
        Ok(output.stdout().to_string())
    }

    fn git_lines(&self, args: &[&str], cwd: &Path) -> BulkResult<Vec<String>> {
        Ok(self
            .git_command(args, cwd)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Full ref of a local branch. Short names are resolved tags-first, so a
/// tag sharing the branch's name would win.
fn local_ref(branch: &str) -> String {
    format!("refs/heads/{branch}")
}

/// Parse `git rev-list --left-right --count` output (`"<ahead>\t<behind>"`).
pub(crate) fn parse_ahead_behind(output: &str) -> Option<AheadBehind> {
    let mut parts = output.split_whitespace();
    let ahead = parts.next()?.parse().ok()?;
    let behind = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(AheadBehind { ahead, behind })
}

impl GitQuery for ShellBackend {
    fn is_work_tree(&self, repo: &Path) -> bool {
        self.git_command(&["rev-parse", "--is-inside-work-tree"], repo)
            .is_ok_and(|out| out == "true")
    }

    fn current_branch(&self, repo: &Path) -> BulkResult<Option<String>> {
        let output = self.git_output(&["symbolic-ref", "--quiet", "HEAD"], repo)?;
        if !output.success() {
            return Ok(None);
        }
        Ok(output
            .stdout()
            .strip_prefix("refs/heads/")
            .filter(|branch| !branch.is_empty())
            .map(String::from))
    }

    fn has_commits(&self, repo: &Path) -> bool {
        self.git_output(&["rev-parse", "--verify", "--quiet", "HEAD"], repo)
            .is_ok_and(|out| out.success())
    }

    fn has_uncommitted_changes(&self, repo: &Path) -> BulkResult<bool> {
        let output = self.git_command(&["status", "--porcelain"], repo)?;
        Ok(!output.is_empty())
    }

    fn remotes(&self, repo: &Path) -> BulkResult<Vec<String>> {
        self.git_lines(&["remote"], repo)
    }

    fn local_branches(&self, repo: &Path) -> BulkResult<Vec<String>> {
        self.git_lines(
            &["for-each-ref", "--format=%(refname:lstrip=2)", "refs/heads/"],
            repo,
        )
    }

    fn upstream(&self, repo: &Path, branch: &str) -> BulkResult<Option<String>> {
        let spec = format!("{branch}@{{upstream}}");
        let output = self.git_output(
            &["rev-parse", "--abbrev-ref", "--symbolic-full-name", &spec],
            repo,
        )?;
        Ok(if output.success() && !output.stdout().is_empty() {
            Some(output.stdout().to_string())
        } else {
            None
        })
    }

    fn has_upstream_config(&self, repo: &Path, branch: &str) -> bool {
        let key = format!("branch.{branch}.merge");
        self.git_command(&["config", "--get", &key], repo)
            .is_ok_and(|out| !out.is_empty())
    }

    fn ahead_behind(&self, repo: &Path, branch: &str, upstream: &str) -> BulkResult<AheadBehind> {
        let range = format!("{}...{upstream}", local_ref(branch));
        let output = self.git_command(&["rev-list", "--left-right", "--count", &range], repo)?;
        parse_ahead_behind(&output).ok_or_else(|| {
            GitError::UnexpectedOutput {
                command: format!("git rev-list --left-right --count {range}"),
                output,
            }
            .into()
        })
    }

    fn commits_between(
        &self,
        repo: &Path,
        branch: &str,
        upstream: &str,
    ) -> BulkResult<Vec<String>> {
        let range = format!("{}..{upstream}", local_ref(branch));
        self.git_lines(&["log", "--oneline", "--no-decorate", &range], repo)
    }

    fn remote_has_branch(&self, repo: &Path, remote: &str, branch: &str) -> bool {
        let refname = format!("refs/heads/{branch}");
        self.git_command(&["ls-remote", "--heads", remote, &refname], repo)
            .is_ok_and(|out| !out.is_empty())
    }
}

impl GitMutation for ShellBackend {
    fn fetch(&self, repo: &Path, remote: &str, prune: bool) -> BulkResult<()> {
        let mut args = vec!["fetch", "--quiet"];
        if prune {
            args.push("--prune");
        }
        args.push(remote);
        self.git_command(&args, repo)?;
        Ok(())
    }

    fn checkout(&self, repo: &Path, branch: &str) -> BulkResult<()> {
        self.git_command(&["checkout", "--quiet", branch, "--"], repo)?;
        Ok(())
    }

    fn create_tracking_branch(&self, repo: &Path, branch: &str, remote: &str) -> BulkResult<()> {
        let start = format!("{remote}/{branch}");
        self.git_command(
            &["checkout", "--quiet", "-b", branch, "--track", &start],
            repo,
        )?;
        Ok(())
    }

    fn merge_ff_only(&self, repo: &Path, upstream: &str) -> BulkResult<()> {
        self.git_command(&["merge", "--ff-only", "--quiet", upstream], repo)?;
        Ok(())
    }

    fn pull_ff_only(&self, repo: &Path) -> BulkResult<()> {
        self.git_command(&["pull", "--ff-only", "--quiet"], repo)?;
        Ok(())
    }

    fn delete_branch(&self, repo: &Path, branch: &str, force: bool) -> BulkResult<()> {
        let flag = if force { "-D" } else { "-d" };
        self.git_command(&["branch", flag, branch], repo)?;
        Ok(())
    }
}
