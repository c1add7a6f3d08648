use std::path::PathBuf;

use anyhow::{Context, Result};

use fwbundle::BundleClass;

use crate::cli::host;

pub fn run(data_dir: Option<&PathBuf>, active_dir: Option<&PathBuf>) -> Result<()> {
    let manager = host::open(data_dir, active_dir)?;

    println!("App-layer store: {}", manager.store(BundleClass::AppLayer).root().display());
    println!("Image store:     {}", manager.store(BundleClass::Image).root().display());
    println!("Active images:   {}", manager.active_dir().display());
    println!();

    match manager.active_bundle_name() {
        Some(name) => println!("Active bundle: {name}"),
        None => println!("Active bundle: (none)"),
    }
    if let Some(updated) = manager.settings().updated_at() {
        println!("Last changed:  {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    let app = manager
        .app_bundles()
        .context("failed to list app-layer bundles")?;
    let images = manager
        .image_bundles()
        .context("failed to list image bundles")?;
    println!("Installed:     {} app-layer, {} image", app.len(), images.len());

    let checks = manager
        .verify_active_set()
        .context("failed to inspect active images")?;
    println!("Active images: {}", checks.len());
    for check in &checks {
        println!("  {}: {:?}", check.name, check.status);
    }
    Ok(())
}
