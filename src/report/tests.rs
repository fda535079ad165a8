// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Aggregator, render_outcome};
use crate::ops::{BranchOutcome, Operation, OperationOutcome, OutcomeKind, Reason};
use std::path::Path;

fn sync_outcomes() -> Vec<OperationOutcome> {
    let updated = OperationOutcome {
        commits: Some(3),
        branches: vec![
            BranchOutcome::updated("main", 3),
            BranchOutcome::skipped("dev", Reason::UpToDate),
        ],
        ..OperationOutcome::new(OutcomeKind::Updated)
    }
    .for_repo("app", Path::new("/work/app"));

    let dirty = OperationOutcome::skipped(Reason::DirtyTree).for_repo("lib", Path::new("/work/lib"));

    let mut diverged = BranchOutcome::failed(
        "main",
        Reason::NonFastForward,
        "diverged from origin/main (1 ahead, 2 behind)",
    );
    diverged.preview = vec!["abc1234 fix".to_string(), "def5678 feat".to_string()];
    let failed = OperationOutcome {
        branches: vec![diverged],
        ..OperationOutcome::failed(Reason::NonFastForward).with_detail("main")
    }
    .with_warnings(vec![
        "fetch from 'backup' failed: fatal: unable to access\nsecond line".to_string(),
    ])
    .for_repo("svc", Path::new("/work/svc"));

    vec![updated, dirty, failed]
}

#[test]
fn test_sync_report_text() {
    let mut aggregator = Aggregator::new(Operation::Sync, false);
    for outcome in sync_outcomes() {
        aggregator.record(outcome);
    }
    let report = aggregator.finalize();

    insta::assert_snapshot!(report.render_text().trim_end(), @r"
    ✓ app: Updated (+3 commit(s))
        ✓ Updated main (+3 commit(s))
        - Skipped dev: up-to-date
    - lib: Skipped: dirty-tree
    ✗ svc: Failed: non-fast-forward (main)
        ✗ Failed main: non-fast-forward (diverged from origin/main (1 ahead, 2 behind))
            abc1234 fix
            def5678 feat
        ! fetch from 'backup' failed: fatal: unable to access

    Summary (sync):
      Repositories:     3
      Succeeded:        1
      Skipped:          1
      Failed:           1
      Branches updated: 1
      Branches failed:  1
      Commits pulled:   3
    ");
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_counters() {
    let mut aggregator = Aggregator::new(Operation::Sync, false);
    for outcome in sync_outcomes() {
        aggregator.record(outcome);
    }
    let summary = *aggregator.summary();
    assert_eq!(summary.total_repos, 3);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.commits_pulled, 3);
    assert_eq!(summary.branches_updated, 1);
    assert_eq!(summary.branches_failed, 1);
}

#[test]
fn test_exit_code_zero_without_failures() {
    for operation in [Operation::Sync, Operation::Switch, Operation::Prune] {
        let mut aggregator = Aggregator::new(operation, false);
        aggregator.record(OperationOutcome::skipped(Reason::UpToDate));
        aggregator.record(OperationOutcome::new(OutcomeKind::Deleted));
        assert_eq!(aggregator.finalize().exit_code(), 0);
    }

    let empty = Aggregator::new(Operation::Prune, false).finalize();
    assert_eq!(empty.exit_code(), 0);
    assert_eq!(empty.summary.total_repos, 0);
}

#[test]
fn test_exit_code_one_regardless_of_failure_count() {
    let mut aggregator = Aggregator::new(Operation::Prune, false);
    for _ in 0..3 {
        aggregator.record(OperationOutcome::failed(Reason::UnmergedCommits));
    }
    assert_eq!(aggregator.finalize().exit_code(), 1);
}

#[test]
fn test_switch_summary_counts_created_as_switched() {
    let mut aggregator = Aggregator::new(Operation::Switch, true);
    aggregator.record(
        OperationOutcome::new(OutcomeKind::Switched)
            .with_detail("from main")
            .with_dry_run(true)
            .for_repo("a", Path::new("/a")),
    );
    aggregator.record(
        OperationOutcome::new(OutcomeKind::Created)
            .with_detail("tracking origin/release/v2")
            .with_dry_run(true)
            .for_repo("b", Path::new("/b")),
    );
    let report = aggregator.finalize();

    assert_eq!(report.summary.switched, 2);
    assert_eq!(report.summary.branches_created, 1);
    insta::assert_snapshot!(report.render_text().trim_end(), @r"
    ✓ a: Would switch (from main)
    ✓ b: Would create (tracking origin/release/v2)

    Summary (switch, dry run):
      Repositories:     2
      Succeeded:        2
      Skipped:          0
      Failed:           0
      Switched:         2
      Branches created: 1
    ");
}

#[test]
fn test_prune_outcome_line() {
    let outcome = OperationOutcome::failed(Reason::UnmergedCommits)
        .with_detail("error: the branch 'old-feature' is not fully merged")
        .for_repo("e", Path::new("/e"));
    insta::assert_snapshot!(
        render_outcome(&outcome).trim_end(),
        @"✗ e: Failed: unmerged-commits (error: the branch 'old-feature' is not fully merged)"
    );
}

#[test]
fn test_json_report() {
    let mut aggregator = Aggregator::new(Operation::Prune, false);
    aggregator.record(
        OperationOutcome::skipped(Reason::BranchCheckedOut).for_repo("d", Path::new("/d")),
    );
    let json = aggregator.finalize().render_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["operation"], "prune");
    assert_eq!(value["outcomes"][0]["repo"], "d");
    assert_eq!(value["outcomes"][0]["kind"], "skipped");
    assert_eq!(value["outcomes"][0]["reason"], "branch-checked-out");
    assert!(value["outcomes"][0].get("path").is_none());
    assert_eq!(value["summary"]["skipped"], 1);
}
