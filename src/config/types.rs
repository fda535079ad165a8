// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: GlobalConfig, SyncConfig, SwitchConfig, PruneConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Options shared by every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Directory scanned for repositories.
    pub base_dir: PathBuf,
    /// Git executable (name looked up on PATH, or a path).
    pub git: String,
    /// Console log level (0-6).
    pub log_level: LogLevel,
    /// Log file level (0-6), used when `log_file` is set.
    pub file_log_level: LogLevel,
    /// Optional log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Glob patterns, relative to `base_dir`, whose subtrees are not scanned.
    pub exclude: Vec<String>,
    /// Maximum directory depth below `base_dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            git: "git".to_string(),
            log_level: LogLevel::WARN,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
            exclude: Vec::new(),
            max_depth: None,
        }
    }
}

impl GlobalConfig {
    pub(super) fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.git.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "git".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.max_depth == Some(0) {
            return Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "max_depth".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// `sync` options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Fetch with `--prune`.
    pub prune: bool,
    /// Upstream commits listed when a branch cannot be fast-forwarded.
    pub preview_commits: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            prune: true,
            preview_commits: 5,
        }
    }
}

/// `switch` options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwitchConfig {
    /// Fast-forward pull after switching.
    pub pull: bool,
}

/// `prune` options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PruneConfig {
    /// Force delete (`git branch -D`).
    pub force: bool,
}
