//! CLI argument definitions for the Windlass updater.
//!
//! Defined with clap derive and separated from the main entrypoint to
//! keep the binary focused on orchestration.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Synchronize the Windlass community locale pack.
#[derive(Parser, Debug)]
#[command(name = "windlass-updater")]
#[command(version, about)]
#[command(long_about = concat!(
    "Synchronize the Windlass community locale pack.\n\n",
    "The updater keeps the game's locale override files aligned with the ",
    "latest published release. Every install first snapshots the files ",
    "currently on disk, downloads and checksum-verifies the new set, and ",
    "only then replaces anything, so a previous state can always be ",
    "restored.\n\n",
    "With no subcommand, the updater installs the latest release.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Check whether a newer release is published:\n",
    "    $ windlass-updater check\n\n",
    "  Install or update, auto-discovering the game through Steam:\n",
    "    $ windlass-updater install\n\n",
    "  Install into an explicitly chosen game root:\n",
    "    $ windlass-updater install --game-root \"D:/Games/Where Winds Meet\"\n\n",
    "  List backup snapshots, then roll back to the newest one:\n",
    "    $ windlass-updater backups\n",
    "    $ windlass-updater restore --latest\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Install arguments (used when no subcommand is given).
    #[command(flatten)]
    pub install: InstallArgs,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compare the installed version with the latest release.
    Check(SharedArgs),

    /// Install or update the locale pack (default when no subcommand
    /// given).
    Install(InstallArgs),

    /// Copy a backup snapshot's files back into the game directory.
    Restore(RestoreArgs),

    /// List backup snapshots, oldest first.
    Backups(SharedArgs),
}

/// Arguments shared by every subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct SharedArgs {
    /// Game root directory [default: discovered through Steam].
    #[arg(short, long, value_name = "DIR")]
    pub game_root: Option<Utf8PathBuf>,

    /// Configuration file overriding the compiled-in defaults.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// State directory for the version marker and backups
    /// [default: platform-specific].
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<Utf8PathBuf>,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the install command.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallArgs {
    /// Shared options.
    #[command(flatten)]
    pub shared: SharedArgs,

    /// Install even when the installed version is already current.
    #[arg(long)]
    pub force: bool,

    /// Show what would be done without downloading or writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the restore command.
#[derive(Parser, Debug, Clone)]
pub struct RestoreArgs {
    /// Shared options.
    #[command(flatten)]
    pub shared: SharedArgs,

    /// Snapshot id to restore (as listed by `backups`).
    #[arg(long, value_name = "ID", conflicts_with = "latest")]
    pub snapshot: Option<String>,

    /// Restore the most recent snapshot.
    #[arg(long)]
    pub latest: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
