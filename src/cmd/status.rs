// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only `status` listing.
//!
//! ```text
//! ✓ app: main [origin, upstream]
//! ✓ lib: feature/x* [origin]
//! - old: (detached) []
//! ✗ broken: invalid-repo
//! ```
//!
//! `*` marks uncommitted changes.

use std::io::{self, Write};

use serde::Serialize;
use tracing::{debug, info_span};

use super::{base_run_config, prepare};
use crate::cli::global::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::git::{GitQuery, RepoDiscovery, RepositoryState, inspect};

/// One repository in the status listing.
#[derive(Debug, Clone, Serialize)]
pub struct StatusEntry {
    pub repo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<RepositoryState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusEntry {
    fn render(&self) -> String {
        match (&self.state, &self.error) {
            (Some(state), _) => {
                let marker = if state.current_branch.is_some() { '✓' } else { '-' };
                let branch = state.current_branch.as_deref().unwrap_or("(detached)");
                let dirty = if state.has_uncommitted_changes { "*" } else { "" };
                format!(
                    "{marker} {}: {branch}{dirty} [{}]",
                    self.repo,
                    state.remotes.join(", ")
                )
            }
            (None, error) => format!(
                "✗ {}: {}",
                self.repo,
                error.as_deref().unwrap_or("invalid-repo")
            ),
        }
    }
}

/// Inspect every discovered repository without changing anything.
///
/// # Errors
///
/// Returns an error if an exclude pattern is invalid.
pub fn collect_status<G: GitQuery + ?Sized>(
    git: &G,
    discovery: &RepoDiscovery,
) -> Result<Vec<StatusEntry>> {
    let mut entries = Vec::new();
    for repo in discovery.iter()? {
        let name = discovery.display_name(&repo);
        let _span = info_span!("repo", name = %name).entered();
        let entry = match inspect(git, &repo) {
            Ok(state) => StatusEntry {
                repo: name,
                state: Some(state),
                error: None,
            },
            Err(e) => {
                debug!(error = %e, "inspection failed");
                StatusEntry {
                    repo: name,
                    state: None,
                    error: Some("invalid-repo".to_string()),
                }
            }
        };
        entries.push(entry);
    }
    Ok(entries)
}

/// Text listing, one line per repository.
#[must_use]
pub fn render_status(entries: &[StatusEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.render());
        out.push('\n');
    }
    out
}

/// Main handler for the status command. Always exits 0.
///
/// # Errors
///
/// Returns an error on configuration failures or if stdout cannot be written.
pub fn run_status_command(config: &Config, global: &GlobalOptions) -> Result<u8> {
    let run = base_run_config(config, global);
    let (git, discovery) = prepare(&run)?;
    let entries = collect_status(&git, &discovery)?;

    let mut out = io::stdout().lock();
    if run.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else if entries.is_empty() {
        writeln!(out, "No repositories found")?;
    } else {
        write!(out, "{}", render_status(&entries))?;
    }
    Ok(0)
}
