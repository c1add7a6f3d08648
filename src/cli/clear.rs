use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::host;

pub fn run(data_dir: Option<&PathBuf>, active_dir: Option<&PathBuf>) -> Result<()> {
    let mut manager = host::open(data_dir, active_dir)?;
    let previous = manager.active_bundle_name().map(str::to_string);

    manager
        .clear_active_bundle()
        .context("failed to clear active bundle")?;

    match previous {
        Some(name) => println!("Cleared active bundle '{name}'."),
        None => println!("Cleared active images."),
    }
    Ok(())
}
