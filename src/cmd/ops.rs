// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `sync`, `switch` and `prune` handlers.

use std::io;

use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use tracing::info;

use super::{base_run_config, prepare, run_executor};
use crate::cli::global::GlobalOptions;
use crate::cli::ops::{PruneArgs, SwitchArgs, SyncArgs};
use crate::config::{Config, RunConfig};
use crate::error::Result;
use crate::git::RepoDiscovery;
use crate::ops::{Operation, PruneExecutor, SwitchExecutor, SyncExecutor};

/// Run settings for `sync`.
#[must_use]
pub fn sync_run_config(args: &SyncArgs, config: &Config, global: &GlobalOptions) -> RunConfig {
    let base = base_run_config(config, global);
    RunConfig {
        dry_run: args.dry_run,
        fetch_prune: base.fetch_prune && !args.no_prune,
        preview_commits: args.preview_commits.unwrap_or(base.preview_commits),
        ..base
    }
}

/// Run settings for `switch`.
#[must_use]
pub fn switch_run_config(args: &SwitchArgs, config: &Config, global: &GlobalOptions) -> RunConfig {
    let base = base_run_config(config, global);
    RunConfig {
        dry_run: args.dry_run,
        target_branch: Some(args.branch.clone()),
        pull_after_switch: base.pull_after_switch || args.pull,
        ..base
    }
}

/// Run settings for `prune`.
#[must_use]
pub fn prune_run_config(args: &PruneArgs, config: &Config, global: &GlobalOptions) -> RunConfig {
    let base = base_run_config(config, global);
    RunConfig {
        target_branch: Some(args.branch.clone()),
        force_delete: base.force_delete || args.force,
        skip_confirm: args.yes,
        ..base
    }
}

/// Main handler for the sync command.
///
/// # Errors
///
/// Returns an error on configuration failures (git missing, base directory
/// missing, invalid exclude pattern) or if stdout cannot be written.
pub fn run_sync_command(args: &SyncArgs, config: &Config, global: &GlobalOptions) -> Result<u8> {
    let run = sync_run_config(args, config, global);
    let (git, discovery) = prepare(&run)?;

    let executor = SyncExecutor::builder()
        .dry_run(run.dry_run)
        .prune(run.fetch_prune)
        .preview_commits(run.preview_commits)
        .build();
    let report = run_executor(&executor, &git, &discovery, run.json, &mut io::stdout().lock())?;
    Ok(report.exit_code())
}

/// Main handler for the switch command.
///
/// # Errors
///
/// Returns an error on configuration failures or if stdout cannot be written.
pub fn run_switch_command(
    args: &SwitchArgs,
    config: &Config,
    global: &GlobalOptions,
) -> Result<u8> {
    let run = switch_run_config(args, config, global);
    let target = run.require_target(Operation::Switch)?;
    let (git, discovery) = prepare(&run)?;

    let executor = SwitchExecutor::builder()
        .target(target)
        .dry_run(run.dry_run)
        .pull(run.pull_after_switch)
        .build();
    let report = run_executor(&executor, &git, &discovery, run.json, &mut io::stdout().lock())?;
    Ok(report.exit_code())
}

/// Main handler for the prune command.
///
/// Asks for confirmation unless `--yes` was given. Declining ends the run
/// with exit code 0 before any repository is visited.
///
/// # Errors
///
/// Returns an error on configuration failures, if the prompt cannot be shown
/// (no terminal), or if stdout cannot be written.
pub fn run_prune_command(args: &PruneArgs, config: &Config, global: &GlobalOptions) -> Result<u8> {
    let run = prune_run_config(args, config, global);
    let target = run.require_target(Operation::Prune)?;
    let (git, discovery) = prepare(&run)?;

    if !run.skip_confirm && !confirm_prune(target, run.force_delete, &discovery)? {
        println!("Aborted, no repository was changed.");
        return Ok(0);
    }

    let executor = PruneExecutor::builder()
        .target(target)
        .force(run.force_delete)
        .build();
    let report = run_executor(&executor, &git, &discovery, run.json, &mut io::stdout().lock())?;
    Ok(report.exit_code())
}

fn confirm_prune(target: &str, force: bool, discovery: &RepoDiscovery) -> Result<bool> {
    let mode = if force { "Force delete" } else { "Delete" };
    let theme = ColorfulTheme::default();
    let confirmed = Confirm::with_theme(&theme)
        .with_prompt(format!(
            "{mode} branch '{target}' in every repository under {}?",
            discovery.base_dir().display()
        ))
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("confirmation prompt failed (use --yes to skip it): {e}"))?;
    info!(confirmed, "prune confirmation");
    Ok(confirmed)
}
