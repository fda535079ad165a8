// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::try_parse() --> Config --> Logging --> Command Dispatch
//!   Sync | Switch | Prune | Status | Options
//! ```
//!
//! Exit status: 0 when no repository failed, 1 otherwise. Usage and
//! configuration errors also exit 1; `--help` and `--version` exit 0.

use std::process::ExitCode;

use gitbulk::cli::global::GlobalOptions;
use gitbulk::cli::{self, Command};
use gitbulk::cmd::build_config_loader;
use gitbulk::cmd::config::run_options_command;
use gitbulk::cmd::ops::{run_prune_command, run_switch_command, run_sync_command};
use gitbulk::cmd::status::run_status_command;
use gitbulk::config::Config;
use gitbulk::logging::LogConfig;
use gitbulk::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = match cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let (config, config_files) = match load_config(&cli.global) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&cli.global, &config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config, &config_files)
}

fn build_log_config(global: &GlobalOptions, config: &Config) -> LogConfig {
    let console_level = if global.verbose {
        config.global.log_level.verbose()
    } else {
        config.global.log_level
    };

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

fn dispatch_command(cli: &cli::Cli, config: &Config, config_files: &[String]) -> ExitCode {
    let result = match &cli.command {
        Command::Sync(args) => run_sync_command(args, config, &cli.global),
        Command::Switch(args) => run_switch_command(args, config, &cli.global),
        Command::Prune(args) => run_prune_command(args, config, &cli.global),
        Command::Status => run_status_command(config, &cli.global),
        Command::Options => {
            run_options_command(config, config_files);
            Ok(0)
        }
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(global: &GlobalOptions) -> gitbulk::error::Result<(Config, Vec<String>)> {
    let loader = build_config_loader(global)?;
    let files = loader.format_loaded_files();
    let config = loader.build()?;
    Ok((config, files))
}
