//! Windlass updater library.
//!
//! This crate keeps the game's community locale override files in sync
//! with a remote-published release: it discovers the latest version,
//! downloads and checksum-verifies each managed file, snapshots the
//! previous state before any write, and can restore any snapshot later.
//! It is used by the `windlass-updater` CLI binary and can be consumed
//! programmatically for testing or custom sync workflows.
//!
//! # Modules
//!
//! - [`backup`] - Timestamped snapshots and restoration
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Compiled-in defaults and TOML overrides
//! - [`dirs`] - Per-user state directory resolution
//! - [`engine`] - The install/restore/check orchestrator
//! - [`error`] - Semantic error types for the whole pipeline
//! - [`locate`] - Target directory resolution through Steam metadata
//! - [`marker`] - Installed-version marker persistence
//! - [`output`] - User-facing rendering for the CLI
//! - [`release`] - Remote release model and access

pub mod backup;
pub mod cli;
pub mod config;
pub mod dirs;
pub mod engine;
pub mod error;
pub mod locate;
pub mod marker;
pub mod output;
pub mod release;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
