// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --dir DIR         ← global.base_dir override
//! --log-level N     ← Console verbosity (0-6)
//! --log-file FILE   ← global.log_file override
//! --verbose         ← Console level raised to debug
//!
//! Precedence: CLI flags > env > --config > gitbulk.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::ConfigLoader;
use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Directory scanned for repositories (default: current directory).
    #[arg(short = 'd', long = "dir", value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append, global = true)]
    pub configs: Vec<PathBuf>,

    /// Shows per-step diagnostic detail.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prints the report as JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Adds the config files and overrides named on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if an override key is rejected by the loader.
    pub fn apply(&self, loader: ConfigLoader) -> Result<ConfigLoader> {
        let mut loader = loader;
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }
        loader
            .set_opt(
                "global.base_dir",
                self.dir.as_ref().map(|p| p.display().to_string()),
            )?
            .set_opt("global.log_level", self.log_level.map(i64::from))?
            .set_opt(
                "global.log_file",
                self.log_file.as_ref().map(|p| p.display().to_string()),
            )
    }
}
