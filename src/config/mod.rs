// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gitbulk.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitbulk.toml (cwd, optional)
//! 3. --config files
//! 4. GITBULK_* env vars
//! 5. CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! Sections and keys are separated by a double underscore:
//!
//! ```text
//! GITBULK_GLOBAL__BASE_DIR=/srv/src  → global.base_dir = "/srv/src"
//! GITBULK_SYNC__PRUNE=false       → sync.prune = false
//! GITBULK_SWITCH__PULL=true       → switch.pull = true
//! ```
//!
//! # Example
//!
//! ```toml
//! [global]
//! base_dir = "/srv/src"
//! exclude = ["vendor/**", "archive/**"]
//! max_depth = 4
//!
//! [sync]
//! preview_commits = 10
//! ```

pub mod loader;
pub mod run;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

pub use loader::ConfigLoader;
pub use run::RunConfig;
use types::{GlobalConfig, PruneConfig, SwitchConfig, SyncConfig};

/// Name of the optional config file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "gitbulk.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "GITBULK";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Options shared by every operation.
    pub global: GlobalConfig,
    pub sync: SyncConfig,
    pub switch: SwitchConfig,
    pub prune: PruneConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitbulk::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitbulk.toml")
    ///     .with_env_prefix("GITBULK")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check values serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.global.validate()?;
        Ok(())
    }

    /// Resolved options as aligned `key = value` lines, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        let g = &self.global;
        options.insert("global.base_dir", g.base_dir.display().to_string());
        options.insert("global.git", g.git.clone());
        options.insert("global.log_level", g.log_level.as_u8().to_string());
        options.insert(
            "global.file_log_level",
            g.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            g.log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("global.exclude", format!("{:?}", g.exclude));
        options.insert(
            "global.max_depth",
            g.max_depth.map_or_else(String::new, |d| d.to_string()),
        );
        options.insert("sync.prune", self.sync.prune.to_string());
        options.insert(
            "sync.preview_commits",
            self.sync.preview_commits.to_string(),
        );
        options.insert("switch.pull", self.switch.pull.to_string());
        options.insert("prune.force", self.prune.force.to_string());

        let width = options.keys().map(|k| k.len()).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<width$} = {value}"))
            .collect()
    }
}
