use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to commit settings: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A batch of pending changes. `None` removes the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsEdit {
    changes: BTreeMap<String, Option<String>>,
}

impl SettingsEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(mut self, key: &str, value: Option<&str>) -> Self {
        self.changes
            .insert(key.to_string(), value.map(str::to_string));
        self
    }

    fn apply(self, values: &mut BTreeMap<String, String>) {
        for (key, value) in self.changes {
            match value {
                Some(v) => {
                    values.insert(key, v);
                }
                None => {
                    values.remove(&key);
                }
            }
        }
    }
}

/// Persistent string key-value settings supplied by the host.
///
/// `commit` is all-or-nothing: on error the store must still answer
/// `get_string` with the values it had before the call.
pub trait SettingsStore {
    fn get_string(&self, key: &str) -> Option<String>;

    fn commit(&mut self, edit: SettingsEdit) -> Result<(), SettingsError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Settings namespace backed by a single TOML file. Commits go through a
/// temporary sibling file that is synced and renamed into place.
#[derive(Debug)]
pub struct TomlSettings {
    path: PathBuf,
    data: SettingsFile,
}

impl TomlSettings {
    pub fn open(path: &Path) -> Result<Self, SettingsError> {
        let data = if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            SettingsFile::default()
        };
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.data.updated_at
    }

    fn write_durably(&self, data: &SettingsFile) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(data)?;
        let tmp = self.path.with_extension("toml.tmp");
        let write_err = |source| SettingsError::Write {
            path: self.path.clone(),
            source,
        };

        let mut file = File::create(&tmp).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }
}

impl SettingsStore for TomlSettings {
    fn get_string(&self, key: &str) -> Option<String> {
        self.data.values.get(key).cloned()
    }

    fn commit(&mut self, edit: SettingsEdit) -> Result<(), SettingsError> {
        let mut next = self.data.clone();
        edit.apply(&mut next.values);
        next.updated_at = Some(Utc::now());
        self.write_durably(&next)?;
        self.data = next;
        Ok(())
    }
}

/// Non-persistent settings, for hosts that keep state elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn commit(&mut self, edit: SettingsEdit) -> Result<(), SettingsError> {
        edit.apply(&mut self.values);
        Ok(())
    }
}
