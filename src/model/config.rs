use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::FirmwareError;
use crate::fingerprint::FingerprintAlgorithm;

const CONFIG_FILE: &str = "config.toml";

/// Contents of `config.toml` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Where active images are published; defaults to the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_dir: Option<PathBuf>,
    #[serde(default = "default_fingerprint")]
    pub fingerprint: String,
}

fn default_fingerprint() -> String {
    FingerprintAlgorithm::default().to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            active_dir: None,
            fingerprint: default_fingerprint(),
        }
    }
}

impl GlobalConfig {
    pub fn load(data_dir: &Path) -> Result<Self, FirmwareError> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|source| FirmwareError::FileRead {
            path: path.clone(),
            source,
        })?;
        let config: GlobalConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), FirmwareError> {
        let path = data_dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).map_err(|source| FirmwareError::FileWrite { path, source })?;
        Ok(())
    }

    pub fn fingerprint_algorithm(&self) -> Result<FingerprintAlgorithm, FirmwareError> {
        FingerprintAlgorithm::from_name(&self.fingerprint)
    }
}
