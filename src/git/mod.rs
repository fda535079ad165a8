// gitbulk: bulk Git operations across a directory tree
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git access layer.
//!
//! ```text
//!   discovery.rs       inspect.rs
//!   base dir walk      RepositoryState
//!   -> repo roots           |
//!                           v
//!      ,----------------------------,
//!      |      backend (traits)      |
//!      '--+----------------------+--'
//!         |                      |
//!         v                      v
//!     GitQuery              GitMutation
//!   branch, status,       fetch, checkout,
//!   remotes, upstream     merge, delete
//!         \                      /
//!          v                    v
//!             ShellBackend (git CLI)
//! ```
//!
//! Nothing here touches the process working directory; every call names
//! the repository it acts on.

pub mod backend;
pub mod discovery;
pub mod inspect;

pub use backend::{AheadBehind, GitBackend, GitMutation, GitQuery, ShellBackend};
pub use discovery::RepoDiscovery;
pub use inspect::{RepositoryState, inspect};
