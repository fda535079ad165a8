// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use gitbulk::config::{Config, ConfigLoader, RunConfig};
use gitbulk::logging::LogLevel;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_empty_is_default() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_parse_full_file() {
    let toml = r#"
[global]
base_dir = "/srv/src"
git = "/usr/bin/git"
log_level = 3
file_log_level = 5
log_file = "/var/log/gitbulk.log"
exclude = ["vendor/**", "third_party/**"]
max_depth = 6

[sync]
prune = false
preview_commits = 3

[switch]
pull = true

[prune]
force = false
"#;
    let config = Config::parse(toml).unwrap();
    insta::assert_json_snapshot!(config, @r#"
    {
      "global": {
        "base_dir": "/srv/src",
        "git": "/usr/bin/git",
        "log_level": 3,
        "file_log_level": 5,
        "log_file": "/var/log/gitbulk.log",
        "exclude": [
          "vendor/**",
          "third_party/**"
        ],
        "max_depth": 6
      },
      "sync": {
        "prune": false,
        "preview_commits": 3
      },
      "switch": {
        "pull": true
      },
      "prune": {
        "force": false
      }
    }
    "#);
}

#[test]
fn config_rejects_wrong_types() {
    assert!(Config::parse("[global]\nmax_depth = \"deep\"\n").is_err());
    assert!(Config::parse("[global]\nexclude = \"vendor/**\"\n").is_err());
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_files_layer_in_order() {
    let mut base = NamedTempFile::new().unwrap();
    writeln!(base, "[global]\nlog_level = 1\n\n[sync]\npreview_commits = 2").unwrap();
    let mut local = NamedTempFile::new().unwrap();
    writeln!(local, "[global]\nlog_level = 4").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(base.path())
        .add_toml_file_optional(local.path())
        .add_toml_file_optional("/nonexistent/gitbulk.toml");
    assert_eq!(loader.loaded_files().len(), 2);

    let config = loader.build().unwrap();
    assert_eq!(config.global.log_level, LogLevel::DEBUG);
    assert_eq!(config.sync.preview_commits, 2);
}

#[test]
fn config_overrides_beat_files() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[global]\nbase_dir = \"/from/file\"\n\n[prune]\nforce = false").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .set("global.base_dir", "/from/cli")
        .unwrap()
        .set("prune.force", true)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.global.base_dir, PathBuf::from("/from/cli"));
    assert!(config.prune.force);
}

#[test]
fn config_env_overrides_files() {
    // SAFETY: variable names are unique to this test.
    unsafe {
        std::env::set_var("GBINTEG_SWITCH__PULL", "true");
        std::env::set_var("GBINTEG_GLOBAL__MAX_DEPTH", "2");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[switch]\npull = false")
        .with_env_prefix("GBINTEG")
        .build();

    // SAFETY: same as above.
    unsafe {
        std::env::remove_var("GBINTEG_SWITCH__PULL");
        std::env::remove_var("GBINTEG_GLOBAL__MAX_DEPTH");
    }

    let config = config.unwrap();
    assert!(config.switch.pull);
    assert_eq!(config.global.max_depth, Some(2));
}

// =============================================================================
// RunConfig
// =============================================================================

#[test]
fn run_config_builder_defaults() {
    let run = RunConfig::builder().build();
    assert_eq!(run.base_dir, PathBuf::from("."));
    assert_eq!(run.git, "git");
    assert!(run.fetch_prune);
    assert_eq!(run.preview_commits, 5);
    assert!(!run.dry_run && !run.force_delete && !run.skip_confirm && !run.json);
    assert_eq!(run.target_branch, None);
    assert_eq!(run.max_depth, None);
}

#[test]
fn run_config_from_default_config_matches_builder() {
    assert_eq!(
        RunConfig::from_config(&Config::default()),
        RunConfig::builder().build()
    );
}
