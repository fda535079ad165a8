// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{BulkError, ProcessError};

#[cfg(not(windows))]
#[test]
fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .args(["hello"])
        .run()
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout(), @"hello");
}

#[cfg(not(windows))]
#[test]
fn test_process_exit_code_allowed() {
    let output = ProcessBuilder::new("/bin/sh")
        .args(["-c", "exit 42"])
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
}

#[cfg(not(windows))]
#[test]
fn test_process_exit_code_rejected() {
    let err = ProcessBuilder::new("/bin/sh")
        .args(["-c", "exit 3"])
        .run()
        .expect_err("non-zero exit should fail");

    assert!(matches!(
        err,
        BulkError::Process(ref e) if matches!(**e, ProcessError::NonZeroExit { code: 3, .. })
    ));
}

#[cfg(not(windows))]
#[test]
fn test_process_env_and_cwd() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let output = ProcessBuilder::new("/bin/sh")
        .args(["-c", "echo \"$GITBULK_TEST_VAR\" && pwd"])
        .env("GITBULK_TEST_VAR", "test_value")
        .cwd(temp.path())
        .run()
        .expect("process should succeed");

    let mut lines = output.stdout().lines();
    assert_eq!(lines.next(), Some("test_value"));
    let cwd = std::path::PathBuf::from(lines.next().expect("pwd line"));
    assert_eq!(
        cwd.canonicalize().unwrap(),
        temp.path().canonicalize().unwrap()
    );
}

#[test]
fn test_spawn_failure() {
    let err = ProcessBuilder::new("gitbulk-definitely-not-a-real-program")
        .run()
        .expect_err("spawning a missing program should fail");
    assert!(err.to_string().contains("failed to spawn"));
}

#[test]
fn test_executable_lookup_not_found() {
    assert!(ProcessBuilder::find("gitbulk-definitely-not-a-real-program").is_none());
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("/usr/bin/git").args(["log", "--format=%h %s"]);
    insta::assert_snapshot!(builder.command_line(), @r#"git log "--format=%h %s""#);
}

#[test]
fn test_name_override() {
    let builder = ProcessBuilder::new("/usr/bin/git").name("vcs").args(["status"]);
    assert_eq!(builder.command_line(), "vcs status");
}
