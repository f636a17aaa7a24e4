//! Windlass updater CLI entrypoint.
//!
//! Wires the sync engine to its collaborators: configuration, the Steam
//! locator, the per-user state directory, the HTTP release client, and
//! stderr rendering. All business state lives in the engine; this binary
//! only dispatches subcommands and renders results.

use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;
use windlass_updater::backup::{BackupStore, SnapshotId};
use windlass_updater::cli::{Cli, Command, InstallArgs, RestoreArgs, SharedArgs};
use windlass_updater::config::SyncConfig;
use windlass_updater::dirs::{StatePaths, SystemBaseDirs, default_state_dir};
use windlass_updater::engine::{CancelFlag, SyncEngine};
use windlass_updater::error::{Result, SyncError};
use windlass_updater::locate::{LocationResolver, SteamLocator, ensure_writable, locale_dir};
use windlass_updater::marker::VersionMarker;
use windlass_updater::output::{
    StderrProgress, render_restore_report, render_sync_report, render_update_check,
    write_stderr_line,
};
use windlass_updater::release::client::{HttpReleaseClient, ReleaseEndpoints};

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Dispatch the selected subcommand.
fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Some(Command::Check(shared)) => cmd_check(shared, stderr),
        Some(Command::Install(args)) => cmd_install(args, stderr),
        Some(Command::Restore(args)) => cmd_restore(args, stderr),
        Some(Command::Backups(shared)) => cmd_backups(shared, stderr),
        None => cmd_install(&cli.install, stderr),
    }
}

/// Map the run outcome to a process exit code, reporting errors.
fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            write_stderr_line(stderr, format!("error: {e}"));
            1
        }
    }
}

/// Everything a subcommand needs that derives from shared arguments.
struct Context {
    config: SyncConfig,
    marker: VersionMarker,
    backups: BackupStore,
}

impl Context {
    fn from_shared(shared: &SharedArgs) -> Result<Self> {
        let config = match &shared.config {
            Some(path) => SyncConfig::load(path)?,
            None => SyncConfig::default(),
        };
        let state_dir = match &shared.state_dir {
            Some(dir) => dir.clone(),
            None => default_state_dir(&SystemBaseDirs).ok_or_else(|| SyncError::NotFound {
                what: "a per-user data directory for updater state".to_owned(),
            })?,
        };
        let paths = StatePaths::under(&state_dir);
        Ok(Self {
            config,
            marker: VersionMarker::new(paths.marker),
            backups: BackupStore::new(paths.backups),
        })
    }

    fn client(&self) -> HttpReleaseClient {
        HttpReleaseClient::new(
            ReleaseEndpoints::for_repository(&self.config.repository),
            self.config.timeout(),
        )
    }

    /// The locale directory to sync into: an explicit game root when
    /// given, otherwise Steam auto-discovery.
    fn resolve_target(&self, shared: &SharedArgs) -> Result<Utf8PathBuf> {
        match &shared.game_root {
            Some(root) => {
                let dir = locale_dir(root, &self.config);
                if !dir.is_dir() {
                    return Err(SyncError::NotFound {
                        what: format!("locale directory {dir} under the given game root"),
                    });
                }
                Ok(dir)
            }
            None => SteamLocator::from_config(&self.config).resolve(),
        }
    }
}

fn cmd_check(shared: &SharedArgs, stderr: &mut dyn Write) -> Result<()> {
    let context = Context::from_shared(shared)?;
    let client = context.client();
    let engine = SyncEngine::new(
        &client,
        context.marker.clone(),
        context.backups.clone(),
        context.config.artifact_names()?,
    );
    let check = engine.check()?;
    write_stderr_line(stderr, render_update_check(&check));
    Ok(())
}

fn cmd_install(args: &InstallArgs, stderr: &mut dyn Write) -> Result<()> {
    let context = Context::from_shared(&args.shared)?;
    let target = context.resolve_target(&args.shared)?;
    let client = context.client();
    let engine = SyncEngine::new(
        &client,
        context.marker.clone(),
        context.backups.clone(),
        context.config.artifact_names()?,
    );

    if args.dry_run {
        print_dry_run(&context, &target, stderr);
        return Ok(());
    }

    let check = engine.check()?;
    if !check.update_available() && !args.force {
        write_stderr_line(stderr, render_update_check(&check));
        write_stderr_line(stderr, "Nothing to do; pass --force to reinstall.");
        return Ok(());
    }

    ensure_writable(&target)?;
    if !args.shared.quiet {
        write_stderr_line(stderr, format!("Installing {} into {target}", check.remote));
    }
    let mut progress = StderrProgress::new(stderr, args.shared.quiet);
    let report = engine.install(&target, &mut progress, &CancelFlag::new())?;
    write_stderr_line(stderr, render_sync_report(&report));
    Ok(())
}

fn cmd_restore(args: &RestoreArgs, stderr: &mut dyn Write) -> Result<()> {
    let context = Context::from_shared(&args.shared)?;
    let target = context.resolve_target(&args.shared)?;
    let client = context.client();
    let engine = SyncEngine::new(
        &client,
        context.marker.clone(),
        context.backups.clone(),
        context.config.artifact_names()?,
    );

    let id = select_snapshot(args, engine.backups())?;
    let report = engine.restore(&id, &target)?;
    write_stderr_line(stderr, render_restore_report(&id, &report));
    if !report.is_complete() {
        return Err(SyncError::Io(std::io::Error::other(format!(
            "{} file(s) could not be restored",
            report.failed.len()
        ))));
    }
    Ok(())
}

/// Pick the snapshot to restore from the arguments.
fn select_snapshot(args: &RestoreArgs, backups: &BackupStore) -> Result<SnapshotId> {
    if let Some(raw) = &args.snapshot {
        return SnapshotId::try_from(raw.as_str());
    }
    if args.latest {
        return backups.latest()?.ok_or_else(|| SyncError::NotFound {
            what: "any backup snapshot to restore".to_owned(),
        });
    }
    Err(SyncError::NotFound {
        what: "a snapshot selection; pass --snapshot ID or --latest".to_owned(),
    })
}

fn cmd_backups(shared: &SharedArgs, stderr: &mut dyn Write) -> Result<()> {
    let context = Context::from_shared(shared)?;
    let ids = context.backups.snapshots()?;
    if ids.is_empty() {
        write_stderr_line(stderr, "No backup snapshots.");
        return Ok(());
    }
    for id in ids {
        write_stderr_line(stderr, id.as_str());
    }
    Ok(())
}

/// Show what an install would do without side effects.
fn print_dry_run(context: &Context, target: &Utf8PathBuf, stderr: &mut dyn Write) {
    write_stderr_line(stderr, "Dry run; nothing will be downloaded or written.");
    write_stderr_line(stderr, format!("  repository: {}", context.config.repository));
    write_stderr_line(stderr, format!("  target:     {target}"));
    write_stderr_line(
        stderr,
        format!("  marker:     {}", context.marker.path()),
    );
    write_stderr_line(
        stderr,
        format!("  backups:    {}", context.backups.root()),
    );
    write_stderr_line(
        stderr,
        format!("  artifacts:  {}", context.config.artifacts.join(", ")),
    );
}
