use std::path::PathBuf;

use anyhow::{Context, Result};

use fwbundle::{FingerprintAlgorithm, GlobalConfig};

use crate::cli::{ConfigSubcommand, host};

pub fn run(
    data_dir: Option<&PathBuf>,
    active_dir: Option<&PathBuf>,
    cmd: ConfigSubcommand,
) -> Result<()> {
    let root = host::data_dir(data_dir)?;
    let mut config = GlobalConfig::load(&root).context("failed to load config")?;

    match cmd {
        ConfigSubcommand::Show => {
            let active = host::active_dir(&root, &config, active_dir);
            println!("Data directory: {}", root.display());
            println!("Active dir:     {}", active.display());
            println!("Fingerprint:    {}", config.fingerprint);
            Ok(())
        }
        ConfigSubcommand::Set { key, value } => {
            match key.as_str() {
                "active_dir" => {
                    config.active_dir = if value.is_empty() || value == "none" {
                        None
                    } else {
                        Some(PathBuf::from(&value))
                    };
                }
                "fingerprint" => {
                    let algorithm = FingerprintAlgorithm::from_name(&value)
                        .with_context(|| format!("invalid fingerprint value: {value}"))?;
                    config.fingerprint = algorithm.to_string();
                }
                _ => anyhow::bail!("unknown config key: {key}\nValid keys: active_dir, fingerprint"),
            }
            config.save(&root).context("failed to save config")?;
            println!("Set {key} = {value}");
            Ok(())
        }
        ConfigSubcommand::Get { key } => {
            match key.as_str() {
                "active_dir" => match &config.active_dir {
                    Some(dir) => println!("{}", dir.display()),
                    None => println!("(not set)"),
                },
                "fingerprint" => println!("{}", config.fingerprint),
                _ => anyhow::bail!("unknown config key: {key}"),
            }
            Ok(())
        }
    }
}
