use std::path::PathBuf;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum FirmwareError {
    #[error("bundle '{name}' already exists")]
    AlreadyExists { name: String },

    #[error("bundle does not exist or is not a directory: {path}")]
    NotFound { path: PathBuf },

    #[error("invalid bundle name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("failed to delete: {path}")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract archive: {archive}")]
    Extraction {
        archive: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("failed to initialize {path}: {reason}")]
    Init { path: PathBuf, reason: String },

    #[error("digest algorithm '{algorithm}' is not available")]
    DigestUnavailable { algorithm: String },

    #[error("failed to read: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory: {path}")]
    DirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
