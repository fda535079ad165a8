// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolved settings for a single invocation.
//!
//! ```text
//! Config (files, env, overrides) --+
//!                                  +--> RunConfig (immutable)
//! per-invocation CLI flags --------+
//! ```

use bon::Builder;
use std::path::PathBuf;

use super::Config;
use crate::error::ConfigError;
use crate::ops::Operation;

/// Everything one run needs, fixed before the first repository is touched.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct RunConfig {
    #[builder(into, default = PathBuf::from("."))]
    pub base_dir: PathBuf,
    #[builder(into, default = "git".to_string())]
    pub git: String,
    #[builder(default = false)]
    pub dry_run: bool,
    #[builder(into)]
    pub target_branch: Option<String>,
    #[builder(default = false)]
    pub force_delete: bool,
    #[builder(default = false)]
    pub skip_confirm: bool,
    #[builder(default = false)]
    pub pull_after_switch: bool,
    #[builder(default = true)]
    pub fetch_prune: bool,
    #[builder(default = 5)]
    pub preview_commits: usize,
    #[builder(default)]
    pub exclude: Vec<String>,
    pub max_depth: Option<usize>,
    #[builder(default = false)]
    pub json: bool,
}

impl RunConfig {
    /// Settings carried by the file and env layers of `config`.
    ///
    /// Per-invocation flags (dry run, target branch, confirmation) keep their
    /// defaults; callers fill them in with struct update syntax.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::builder()
            .base_dir(config.global.base_dir.clone())
            .git(config.global.git.clone())
            .exclude(config.global.exclude.clone())
            .maybe_max_depth(config.global.max_depth)
            .fetch_prune(config.sync.prune)
            .preview_commits(config.sync.preview_commits)
            .pull_after_switch(config.switch.pull)
            .force_delete(config.prune.force)
            .build()
    }

    /// Target branch, required by switch and prune.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` when no usable branch name was given.
    pub fn require_target(&self, operation: Operation) -> Result<&str, ConfigError> {
        match self.target_branch.as_deref().map(str::trim) {
            Some(branch) if !branch.is_empty() => Ok(branch),
            _ => Err(ConfigError::MissingKey {
                section: operation.to_string(),
                key: "--branch".to_string(),
            }),
        }
    }
}
