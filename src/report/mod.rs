// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run summary aggregation and rendering.
//!
//! ```text
//! OperationOutcome --record()--> Aggregator --finalize()--> Report
//!                                  counters                 outcomes
//!                                                           RunSummary
//!                                                           exit_code()
//! ```
//!
//! Counters live in the aggregator only; the control loop owns it and
//! records exactly one outcome per repository.

use serde::Serialize;
use std::fmt::Write as _;

use crate::ops::{BranchOutcome, Operation, OperationOutcome, OutcomeKind};

/// Final counters of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total_repos: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Sum of commits fast-forwarded (or that would be, in dry-run).
    pub commits_pulled: usize,
    pub branches_updated: usize,
    pub branches_failed: usize,
    /// Tracking branches created by switch.
    pub branches_created: usize,
    /// Repositories switched, created branches included.
    pub switched: usize,
    pub deleted: usize,
}

impl RunSummary {
    /// 0 when nothing failed, 1 otherwise. Same convention for every operation.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.failed == 0 { 0 } else { 1 }
    }
}

/// Accumulates outcomes for one run.
#[derive(Debug)]
pub struct Aggregator {
    operation: Operation,
    dry_run: bool,
    outcomes: Vec<OperationOutcome>,
    summary: RunSummary,
}

impl Aggregator {
    #[must_use]
    pub fn new(operation: Operation, dry_run: bool) -> Self {
        Self {
            operation,
            dry_run,
            outcomes: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    /// Count one repository's outcome.
    pub fn record(&mut self, outcome: OperationOutcome) {
        let summary = &mut self.summary;
        summary.total_repos += 1;

        match outcome.kind {
            OutcomeKind::Skipped => summary.skipped += 1,
            OutcomeKind::Failed => summary.failed += 1,
            _ => summary.succeeded += 1,
        }
        match outcome.kind {
            OutcomeKind::Switched => summary.switched += 1,
            OutcomeKind::Created => {
                summary.switched += 1;
                summary.branches_created += 1;
            }
            OutcomeKind::Deleted => summary.deleted += 1,
            _ => {}
        }

        summary.commits_pulled += outcome.commits.map_or(0, |c| c as usize);
        summary.branches_updated += outcome.count_branches(OutcomeKind::Updated);
        summary.branches_failed += outcome.count_branches(OutcomeKind::Failed);

        self.outcomes.push(outcome);
    }

    /// Counters so far.
    #[must_use]
    pub const fn summary(&self) -> &RunSummary {
        &self.summary
    }

    #[must_use]
    pub fn finalize(self) -> Report {
        Report {
            operation: self.operation,
            dry_run: self.dry_run,
            outcomes: self.outcomes,
            summary: self.summary,
        }
    }
}

/// Immutable result of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub operation: Operation,
    pub dry_run: bool,
    pub outcomes: Vec<OperationOutcome>,
    pub summary: RunSummary,
}

impl Report {
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.summary.exit_code()
    }

    /// Full text report: every outcome followed by the summary block.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for outcome in &self.outcomes {
            out.push_str(&render_outcome(outcome));
        }
        out.push('\n');
        out.push_str(&self.render_summary());
        out
    }

    /// Report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Summary block with operation-specific counters.
    #[must_use]
    pub fn render_summary(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();
        let mode = if self.dry_run { ", dry run" } else { "" };
        let _ = writeln!(out, "Summary ({}{mode}):", self.operation);

        let mut line = |label: &str, value: usize| {
            let _ = writeln!(out, "  {:<18}{value}", format!("{label}:"));
        };
        line("Repositories", s.total_repos);
        line("Succeeded", s.succeeded);
        line("Skipped", s.skipped);
        line("Failed", s.failed);
        match self.operation {
            Operation::Sync => {
                line("Branches updated", s.branches_updated);
                line("Branches failed", s.branches_failed);
                line("Commits pulled", s.commits_pulled);
            }
            Operation::Switch => {
                line("Switched", s.switched);
                line("Branches created", s.branches_created);
            }
            Operation::Prune => line("Deleted", s.deleted),
        }
        out
    }
}

/// Lines for one repository: status line, branch lines, warnings.
#[must_use]
pub fn render_outcome(outcome: &OperationOutcome) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "{} {}: {}",
        outcome.kind.marker(),
        outcome.repo,
        outcome.kind.label(outcome.dry_run)
    );
    if let Some(reason) = outcome.reason {
        let _ = write!(out, ": {reason}");
    }
    match (outcome.commits, &outcome.detail) {
        (Some(commits), _) if outcome.kind == OutcomeKind::Updated => {
            let _ = write!(out, " (+{commits} commit(s))");
        }
        (_, Some(detail)) => {
            let _ = write!(out, " ({})", first_line(detail));
        }
        _ => {}
    }
    out.push('\n');

    for branch in &outcome.branches {
        render_branch(&mut out, branch, outcome.dry_run);
    }
    for warning in &outcome.warnings {
        let _ = writeln!(out, "    ! {}", first_line(warning));
    }
    out
}

fn render_branch(out: &mut String, branch: &BranchOutcome, dry_run: bool) {
    let _ = write!(
        out,
        "    {} {} {}",
        branch.kind.marker(),
        branch.kind.label(dry_run),
        branch.branch
    );
    if let Some(commits) = branch.commits {
        let _ = write!(out, " (+{commits} commit(s))");
    }
    if let Some(reason) = branch.reason {
        let _ = write!(out, ": {reason}");
    }
    if let Some(detail) = &branch.detail {
        let _ = write!(out, " ({})", first_line(detail));
    }
    out.push('\n');
    for line in &branch.preview {
        let _ = writeln!(out, "        {line}");
    }
}

/// Git diagnostics can span several lines; reports show the first.
fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests;
