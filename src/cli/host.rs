use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use fwbundle::{FirmwareManager, GlobalConfig, ManagerPaths, TomlSettings, ZipExtractor};

const SETTINGS_FILE: &str = "settings.toml";

/// Resolve and create the data directory.
pub fn data_dir(data_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let root = match data_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_dir()
            .map(|d| d.join("fwbundle"))
            .context("failed to determine data directory; set FWBUNDLE_DATA_DIR or --data-dir")?,
    };
    fs::create_dir_all(&root)
        .with_context(|| format!("failed to create {}", root.display()))?;
    Ok(root)
}

/// The `--active-dir` flag wins over `config.toml`; with neither, images are
/// published straight into the data directory.
pub fn active_dir(root: &Path, config: &GlobalConfig, active_dir: Option<&PathBuf>) -> PathBuf {
    active_dir
        .cloned()
        .or_else(|| config.active_dir.clone())
        .unwrap_or_else(|| root.to_path_buf())
}

/// Supply the manager's collaborators from local disk: a zip extractor, a
/// TOML settings file and an active-images directory created on demand.
pub fn open(
    data_dir: Option<&PathBuf>,
    active_dir_override: Option<&PathBuf>,
) -> Result<FirmwareManager<TomlSettings>> {
    let root = self::data_dir(data_dir)?;
    let config = GlobalConfig::load(&root).context("failed to load config")?;
    let active = active_dir(&root, &config, active_dir_override);
    fs::create_dir_all(&active)
        .with_context(|| format!("failed to create {}", active.display()))?;

    let settings =
        TomlSettings::open(&root.join(SETTINGS_FILE)).context("failed to open settings")?;
    let algorithm = config
        .fingerprint_algorithm()
        .context("invalid fingerprint setting in config.toml")?;

    FirmwareManager::open(
        ManagerPaths {
            root,
            active_dir: active,
        },
        settings,
        Arc::new(ZipExtractor),
        algorithm,
    )
    .context("failed to open firmware store")
}
