// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{BulkError, BulkResult, ConfigError, FsError, GitError};
use std::path::Path;

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "switch".to_string(),
        key: "branch".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'branch' in section '[switch]'");
}

#[test]
fn test_tool_not_found_display() {
    let err = ConfigError::ToolNotFound {
        name: "git".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"required tool 'git' not found in PATH");
}

#[test]
fn test_diagnostic_prefers_git_stderr() {
    let err: BulkError = GitError::CommandFailed {
        command: "git branch -d old".to_string(),
        message: "error: the branch 'old' is not fully merged".to_string(),
    }
    .into();
    assert_eq!(
        err.diagnostic(),
        "error: the branch 'old' is not fully merged"
    );

    let other: BulkError = GitError::NotARepository {
        path: "/srv/src/app".to_string(),
    }
    .into();
    assert_eq!(
        other.diagnostic(),
        "git error: not a git working tree: /srv/src/app"
    );
}

#[test]
fn test_fs_error_classification() {
    let denied = FsError::from_io(
        Path::new("/locked"),
        std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    );
    assert!(matches!(denied, FsError::PermissionDenied(_)));

    let missing = FsError::from_io(
        Path::new("/missing"),
        std::io::Error::from(std::io::ErrorKind::NotFound),
    );
    assert!(matches!(missing, FsError::NotFound(_)));
}

#[test]
fn test_bulk_error_size() {
    // Every variant is a thin Box, plus discriminant.
    let size = std::mem::size_of::<BulkError>();
    assert!(size <= 16, "BulkError is {size} bytes, expected <= 16");
}

#[test]
fn test_bulk_result_size() {
    let size = std::mem::size_of::<BulkResult<()>>();
    assert!(size <= 24, "BulkResult<()> is {size} bytes, expected <= 24");
}
