// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git repository discovery.
//!
//! ```text
//! base/
//!   app/          (yielded: has app/.git/)
//!     .git/       (never descended)
//!     plugins/
//!       extra/    (yielded: nested repos are found too)
//!   docs/         (descended, not a repo)
//!   vendor/       (pruned by exclude = ["vendor/**"])
//! ```
//!
//! Entries are sorted by file name at every level so the yield order, and
//! therefore the report order, is deterministic.

use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use wax::{Glob, Program};

use crate::error::{BulkResult, ConfigError};

/// Finds repository roots below a base directory.
#[derive(Debug, Clone)]
pub struct RepoDiscovery {
    base_dir: PathBuf,
    exclude: Vec<String>,
    max_depth: Option<usize>,
}

impl RepoDiscovery {
    /// Create a discoverer rooted at `base_dir`.
    ///
    /// The base directory is canonicalized so every yielded path is absolute.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::BaseDirNotFound` if `base_dir` does not exist or
    /// is not a directory.
    pub fn new(base_dir: impl AsRef<Path>) -> BulkResult<Self> {
        let base_dir = base_dir.as_ref();
        let not_found = || ConfigError::BaseDirNotFound {
            path: base_dir.display().to_string(),
        };

        let canonical = base_dir.canonicalize().map_err(|_| not_found())?;
        if !canonical.is_dir() {
            return Err(not_found().into());
        }

        Ok(Self {
            base_dir: canonical,
            exclude: Vec::new(),
            max_depth: None,
        })
    }

    /// Glob patterns (relative to the base directory) whose subtrees are skipped.
    #[must_use]
    pub fn with_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Limit descent to `depth` levels below the base directory.
    #[must_use]
    pub const fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// The canonical base directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Name used for `repo` in reports: its path relative to the base
    /// directory, or the base directory's own name when they are equal.
    #[must_use]
    pub fn display_name(&self, repo: &Path) -> String {
        match repo.strip_prefix(&self.base_dir) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
            _ => repo.file_name().map_or_else(
                || repo.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            ),
        }
    }

    /// Lazily walk the tree, yielding every repository root.
    ///
    /// Each call starts a fresh walk, so the sequence can be restarted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if an exclude pattern is not a
    /// valid glob.
    pub fn iter(&self) -> BulkResult<impl Iterator<Item = PathBuf> + '_> {
        let globs = self
            .exclude
            .iter()
            .map(|pattern| {
                Glob::new(pattern)
                    .map(Glob::into_owned)
                    .map_err(|e| ConfigError::InvalidValue {
                        section: "global".to_string(),
                        key: "exclude".to_string(),
                        message: format!("invalid glob pattern '{pattern}': {e}"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let base_dir = self.base_dir.clone();

        // Evaluated before descending, so pruned directories are never read.
        let mut builder = WalkBuilder::new(&self.base_dir);
        builder
            .standard_filters(false)
            .follow_links(false)
            .max_depth(self.max_depth)
            .sort_by_file_name(OsStr::cmp)
            .filter_entry(move |entry| {
                if entry.path_is_symlink() {
                    debug!(path = %entry.path().display(), "skipping symbolic link");
                    return false;
                }
                if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }
                if entry.file_name() == OsStr::new(".git") {
                    return false;
                }
                if is_excluded(&globs, &base_dir, entry.path()) {
                    debug!(path = %entry.path().display(), "excluded");
                    return false;
                }
                true
            });

        let walk = builder.build().filter_map(|entry| match entry {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return None;
                }
                let path = entry.into_path();
                if !path.join(".git").is_dir() {
                    return None;
                }
                debug!(repo = %path.display(), "discovered repository");
                Some(path)
            }
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                None
            }
        });

        Ok(walk)
    }
}

/// True if `path`, relative to `base_dir`, matches an exclude pattern.
///
/// Only the directory itself is tested: ancestors that matched were never
/// entered.
pub(crate) fn is_excluded(globs: &[Glob<'_>], base_dir: &Path, path: &Path) -> bool {
    if globs.is_empty() {
        return false;
    }
    match path.strip_prefix(base_dir) {
        Ok(rel) if !rel.as_os_str().is_empty() => globs.iter().any(|glob| glob.is_match(rel)),
        _ => false,
    }
}
