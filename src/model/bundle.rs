use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::FirmwareError;

pub const IMAGE_EXTENSION: &str = "ioio";
pub const FINGERPRINT_EXTENSION: &str = "fp";

/// Which of the two parallel stores a bundle lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleClass {
    AppLayer,
    Image,
}

impl BundleClass {
    /// Directory name of this class's store under the data root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::AppLayer => "app_layer",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for BundleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppLayer => write!(f, "app-layer"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// One image inside a bundle directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageFile {
    path: PathBuf,
}

impl ImageFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// File name without its extension.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A directory-backed set of images. `name` is `None` only for the unnamed
/// app-layer bundle that lives directly in the active-images directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bundle {
    name: Option<String>,
    dir: PathBuf,
}

impl Bundle {
    /// Bundle named after its directory's base name.
    pub fn from_dir(dir: PathBuf) -> Self {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        Self { name, dir }
    }

    pub fn unnamed(dir: PathBuf) -> Self {
        Self { name: None, dir }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// An absent name matches an absent active name.
    pub fn is_active(&self, active_name: Option<&str>) -> bool {
        self.name.as_deref() == active_name
    }

    pub fn images(&self) -> Result<Vec<ImageFile>, FirmwareError> {
        Ok(files_with_extension(&self.dir, IMAGE_EXTENSION)?
            .into_iter()
            .map(ImageFile::new)
            .collect())
    }
}

/// Regular files directly inside `dir` whose extension is `ext`, in
/// directory enumeration order.
pub(crate) fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, FirmwareError> {
    Ok(entries_with_extension(dir, ext)?
        .into_iter()
        .filter(|p| p.is_file())
        .collect())
}

/// Every entry directly inside `dir` whose name carries extension `ext`,
/// whatever its file type.
pub(crate) fn entries_with_extension(
    dir: &Path,
    ext: &str,
) -> Result<Vec<PathBuf>, FirmwareError> {
    let read_err = |source| FirmwareError::FileRead {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.extension().is_some_and(|e| e == ext) {
            entries.push(path);
        }
    }
    Ok(entries)
}
