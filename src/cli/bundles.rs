use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use fwbundle::{Bundle, BundleClass, FirmwareManager, TomlSettings};

use crate::cli::{AppSubcommand, ImageSubcommand, host};

#[derive(Debug, Serialize)]
struct BundleView {
    name: Option<String>,
    class: BundleClass,
    dir: PathBuf,
    active: bool,
    images: Vec<String>,
}

pub fn run_app(
    data_dir: Option<&PathBuf>,
    active_dir: Option<&PathBuf>,
    cmd: AppSubcommand,
) -> Result<()> {
    let mut manager = host::open(data_dir, active_dir)?;
    match cmd {
        AppSubcommand::Add { archive } => {
            let bundle = manager
                .add_app_bundle(&archive)
                .context("failed to install app-layer bundle")?;
            print_added(&bundle)
        }
        AppSubcommand::List { json } => {
            let bundles = manager.app_bundles().context("failed to list app-layer bundles")?;
            print_list(&manager, BundleClass::AppLayer, &bundles, json)
        }
        AppSubcommand::Info { name } => {
            let bundle = manager.app_bundle(&name).context("failed to look up bundle")?;
            print_info(&manager, BundleClass::AppLayer, &bundle)
        }
        AppSubcommand::Activate { name } => {
            manager
                .set_active_app_bundle(&name)
                .with_context(|| format!("failed to activate '{name}'"))?;
            println!("Activated '{name}'.");
            println!("Images published to {}", manager.active_dir().display());
            Ok(())
        }
        AppSubcommand::Remove { name, force } => {
            let bundle = manager.app_bundle(&name).context("failed to look up bundle")?;
            let note = if manager.is_active(&bundle) {
                " (currently active)"
            } else {
                ""
            };
            if !force && !confirm(&format!("Remove app-layer bundle '{name}'{note}?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            manager
                .remove_app_bundle(&name)
                .context("failed to remove bundle")?;
            println!("Removed app-layer bundle '{name}'.");
            Ok(())
        }
    }
}

pub fn run_image(
    data_dir: Option<&PathBuf>,
    active_dir: Option<&PathBuf>,
    cmd: ImageSubcommand,
) -> Result<()> {
    let manager = host::open(data_dir, active_dir)?;
    match cmd {
        ImageSubcommand::Add { archive } => {
            let bundle = manager
                .add_image_bundle(&archive)
                .context("failed to install image bundle")?;
            print_added(&bundle)
        }
        ImageSubcommand::List { json } => {
            let bundles = manager.image_bundles().context("failed to list image bundles")?;
            print_list(&manager, BundleClass::Image, &bundles, json)
        }
        ImageSubcommand::Info { name } => {
            let bundle = manager.image_bundle(&name).context("failed to look up bundle")?;
            print_info(&manager, BundleClass::Image, &bundle)
        }
        ImageSubcommand::Remove { name, force } => {
            if !force && !confirm(&format!("Remove image bundle '{name}'?"))? {
                println!("Cancelled.");
                return Ok(());
            }
            manager
                .remove_image_bundle(&name)
                .context("failed to remove bundle")?;
            println!("Removed image bundle '{name}'.");
            Ok(())
        }
    }
}

fn display_name(bundle: &Bundle) -> &str {
    bundle.name().unwrap_or("(unnamed)")
}

fn image_names(bundle: &Bundle) -> Result<Vec<String>> {
    let mut names: Vec<String> = bundle.images()?.iter().map(|i| i.name()).collect();
    names.sort();
    Ok(names)
}

fn view(
    manager: &FirmwareManager<TomlSettings>,
    class: BundleClass,
    bundle: &Bundle,
) -> Result<BundleView> {
    Ok(BundleView {
        name: bundle.name().map(str::to_string),
        class,
        dir: bundle.dir().to_path_buf(),
        active: class == BundleClass::AppLayer && manager.is_active(bundle),
        images: image_names(bundle)?,
    })
}

fn print_added(bundle: &Bundle) -> Result<()> {
    let images = image_names(bundle)?;
    println!(
        "Installed bundle '{}' ({} images).",
        display_name(bundle),
        images.len()
    );
    Ok(())
}

fn print_list(
    manager: &FirmwareManager<TomlSettings>,
    class: BundleClass,
    bundles: &[Bundle],
    json: bool,
) -> Result<()> {
    if json {
        let views = bundles
            .iter()
            .map(|b| view(manager, class, b))
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if bundles.is_empty() {
        println!("No {class} bundles installed.");
        return Ok(());
    }

    for b in bundles {
        let v = view(manager, class, b)?;
        let marker = if v.active { " *active*" } else { "" };
        println!("  {} ({} images){}", display_name(b), v.images.len(), marker);
    }
    Ok(())
}

fn print_info(
    manager: &FirmwareManager<TomlSettings>,
    class: BundleClass,
    bundle: &Bundle,
) -> Result<()> {
    let v = view(manager, class, bundle)?;
    println!("Name:      {}", display_name(bundle));
    println!("Class:     {class}");
    println!("Directory: {}", v.dir.display());
    if class == BundleClass::AppLayer {
        println!("Active:    {}", if v.active { "yes" } else { "no" });
    }
    println!("Images:");
    for image in &v.images {
        println!("  - {image}");
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
