use std::path::PathBuf;

use anyhow::{Context, Result};

use fwbundle::FingerprintStatus;

use crate::cli::host;

pub fn run(data_dir: Option<&PathBuf>, active_dir: Option<&PathBuf>, json: bool) -> Result<()> {
    let manager = host::open(data_dir, active_dir)?;
    let checks = manager
        .verify_active_set()
        .context("failed to verify active images")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
    } else if checks.is_empty() {
        println!("No active images.");
    } else {
        for check in &checks {
            let label = match check.status {
                FingerprintStatus::Match => "ok",
                FingerprintStatus::Mismatch => "MISMATCH",
                FingerprintStatus::MissingFingerprint => "missing fingerprint",
                FingerprintStatus::OrphanFingerprint => "fingerprint without image",
            };
            println!("  {}: {label}", check.name);
        }
    }

    let failed = checks
        .iter()
        .filter(|c| c.status != FingerprintStatus::Match)
        .count();
    if failed > 0 {
        anyhow::bail!("{failed} active image(s) failed verification");
    }
    Ok(())
}
