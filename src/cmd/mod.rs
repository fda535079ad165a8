// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   sync, switch, prune, status, options
//!
//! RunConfig --> prepare() --> (ShellBackend, RepoDiscovery)
//!                                   |
//!          for each repo: process_repo --> render_outcome --> Aggregator
//!                                   |
//!                              Report --> summary / JSON, exit code
//! ```
//!
//! Configuration errors surface here, before any repository is visited.

pub mod config;
pub mod ops;
pub mod status;


use std::io::Write;

use tracing::{debug, info};

use crate::cli::global::GlobalOptions;
use crate::config::{Config, ConfigLoader, ENV_PREFIX, LOCAL_CONFIG_FILE, RunConfig};
use crate::error::Result;
use crate::git::{GitBackend, RepoDiscovery, ShellBackend};
use crate::ops::{Executor, process_repo};
use crate::report::{Aggregator, Report, render_outcome};

/// Loader for every config layer: `gitbulk.toml`, `--config` files,
/// `GITBULK_*` variables and global CLI overrides.
///
/// # Errors
///
/// Returns an error if a CLI override is rejected.
pub fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let loader = ConfigLoader::new().add_toml_file_optional(LOCAL_CONFIG_FILE);
    Ok(global.apply(loader)?.with_env_prefix(ENV_PREFIX))
}

/// Run settings shared by every command; per-command flags are added on top.
#[must_use]
pub fn base_run_config(config: &Config, global: &GlobalOptions) -> RunConfig {
    RunConfig {
        json: global.json,
        ..RunConfig::from_config(config)
    }
}

/// Locate git and open the base directory.
///
/// # Errors
///
/// Returns `ConfigError::ToolNotFound` if git is not on PATH, or
/// `ConfigError::BaseDirNotFound` if the base directory does not exist.
pub fn prepare(run: &RunConfig) -> Result<(ShellBackend, RepoDiscovery)> {
    let git = ShellBackend::locate(&run.git)?;
    debug!(git = %git.program().display(), "using git");

    let discovery = RepoDiscovery::new(&run.base_dir)?
        .with_exclude(run.exclude.iter().cloned())
        .with_max_depth(run.max_depth);
    info!(base_dir = %discovery.base_dir().display(), "scanning");
    Ok((git, discovery))
}

/// Apply `executor` to every discovered repository, streaming one block per
/// repository and the summary (or the JSON report) to `out`.
///
/// # Errors
///
/// Returns an error if an exclude pattern is invalid or `out` cannot be
/// written. Per-repository failures are part of the report.
pub fn run_executor(
    executor: &dyn Executor,
    git: &dyn GitBackend,
    discovery: &RepoDiscovery,
    json: bool,
    out: &mut dyn Write,
) -> Result<Report> {
    let mut aggregator = Aggregator::new(executor.operation(), executor.dry_run());

    for repo in discovery.iter()? {
        let name = discovery.display_name(&repo);
        let outcome = process_repo(executor, git, &repo, &name);
        if !json {
            write!(out, "{}", render_outcome(&outcome))?;
            out.flush()?;
        }
        aggregator.record(outcome);
    }

    let report = aggregator.finalize();
    if json {
        writeln!(out, "{}", report.render_json()?)?;
    } else {
        writeln!(out)?;
        write!(out, "{}", report.render_summary())?;
    }
    Ok(report)
}
