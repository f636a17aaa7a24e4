//! Release-side checksum manifest generator.
//!
//! Publishing counterpart of the manifest the updater consumes: hashes
//! each artifact in a files directory and writes `checksums.json` next
//! to them. Run before tagging a release so clients can verify what they
//! download.

use camino::Utf8PathBuf;
use clap::Parser;
use std::collections::BTreeMap;
use std::io::Write;
use windlass_updater::config::SyncConfig;
use windlass_updater::error::{Result, SyncError};
use windlass_updater::output::write_stderr_line;
use windlass_updater::release::digest::Sha256Digest;

/// Generate the checksum manifest for a locale pack release.
#[derive(Parser, Debug)]
#[command(name = "windlass-package-files")]
#[command(version, about)]
struct Args {
    /// Directory containing the artifact files to hash.
    #[arg(short, long, value_name = "DIR", default_value = "files")]
    files_dir: Utf8PathBuf,

    /// Manifest output path [default: `<files-dir>`/checksums.json].
    #[arg(short, long, value_name = "FILE")]
    output: Option<Utf8PathBuf>,

    /// Configuration file naming the artifact set.
    #[arg(short, long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,
}

fn main() {
    let args = Args::parse();
    let mut stderr = std::io::stderr();
    if let Err(e) = run(&args, &mut stderr) {
        write_stderr_line(&mut stderr, format!("error: {e}"));
        std::process::exit(1);
    }
}

fn run(args: &Args, stderr: &mut dyn Write) -> Result<()> {
    let config = match &args.config {
        Some(path) => SyncConfig::load(path)?,
        None => SyncConfig::default(),
    };

    let mut entries: BTreeMap<String, String> = BTreeMap::new();
    for name in config.artifact_names()? {
        let path = args.files_dir.join(name.as_str());
        let bytes = std::fs::read(&path)?;
        entries.insert(
            name.as_str().to_owned(),
            Sha256Digest::of_bytes(&bytes).as_str().to_owned(),
        );
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.files_dir.join("checksums.json"));
    let json = serde_json::to_string_pretty(&entries).map_err(|e| SyncError::Parse {
        reason: e.to_string(),
    })?;
    std::fs::write(&output, format!("{json}\n"))?;

    write_stderr_line(
        stderr,
        format!("Wrote {} entr(ies) to {output}", entries.len()),
    );
    Ok(())
}
