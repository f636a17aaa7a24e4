//! Unit tests for CLI argument parsing.

use super::*;

#[test]
fn no_subcommand_defaults_to_install_args() {
    let cli = Cli::parse_from(["windlass-updater"]);
    assert!(cli.command.is_none());
    assert!(!cli.install.dry_run);
    assert!(cli.install.shared.game_root.is_none());
}

#[test]
fn install_accepts_game_root_and_dry_run() {
    let cli = Cli::parse_from([
        "windlass-updater",
        "install",
        "--game-root",
        "/games/wwm",
        "--dry-run",
    ]);
    match cli.command {
        Some(Command::Install(args)) => {
            assert_eq!(
                args.shared.game_root.as_deref(),
                Some(camino::Utf8Path::new("/games/wwm"))
            );
            assert!(args.dry_run);
            assert!(!args.force);
        }
        other => panic!("expected Install, got {other:?}"),
    }
}

#[test]
fn check_accepts_config_override() {
    let cli = Cli::parse_from(["windlass-updater", "check", "--config", "windlass.toml"]);
    match cli.command {
        Some(Command::Check(shared)) => {
            assert_eq!(
                shared.config.as_deref(),
                Some(camino::Utf8Path::new("windlass.toml"))
            );
        }
        other => panic!("expected Check, got {other:?}"),
    }
}

#[test]
fn restore_accepts_snapshot_id() {
    let cli = Cli::parse_from([
        "windlass-updater",
        "restore",
        "--snapshot",
        "2026-02-03_10-00-00",
    ]);
    match cli.command {
        Some(Command::Restore(args)) => {
            assert_eq!(args.snapshot.as_deref(), Some("2026-02-03_10-00-00"));
            assert!(!args.latest);
        }
        other => panic!("expected Restore, got {other:?}"),
    }
}

#[test]
fn restore_snapshot_conflicts_with_latest() {
    let result = Cli::try_parse_from([
        "windlass-updater",
        "restore",
        "--snapshot",
        "2026-02-03_10-00-00",
        "--latest",
    ]);
    assert!(result.is_err());
}

#[test]
fn quiet_flag_parses_on_every_subcommand() {
    for args in [
        vec!["windlass-updater", "check", "--quiet"],
        vec!["windlass-updater", "install", "--quiet"],
        vec!["windlass-updater", "backups", "--quiet"],
    ] {
        assert!(Cli::try_parse_from(args).is_ok());
    }
}

#[test]
fn state_dir_override_parses() {
    let cli = Cli::parse_from(["windlass-updater", "backups", "--state-dir", "/tmp/state"]);
    match cli.command {
        Some(Command::Backups(shared)) => {
            assert_eq!(
                shared.state_dir.as_deref(),
                Some(camino::Utf8Path::new("/tmp/state"))
            );
        }
        other => panic!("expected Backups, got {other:?}"),
    }
}
