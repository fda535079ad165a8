// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Blocking process spawning.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .flag()
//!   .run()
//!       --> std::process::Command::output()
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```
//!
//! Every invocation blocks until the child exits; there is no timeout.

pub mod builder;
mod runner;
#[cfg(test)]
mod tests;
