use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::FirmwareError;
use crate::extract::ArchiveExtractor;
use crate::model::{Bundle, BundleClass};

/// One root directory holding a subdirectory per installed bundle.
pub struct BundleStore {
    root: PathBuf,
    class: BundleClass,
    extractor: Arc<dyn ArchiveExtractor>,
}

impl BundleStore {
    /// Open the store, creating its root if missing. A root that exists but
    /// is not a directory is an initialization error.
    pub fn open(
        root: PathBuf,
        class: BundleClass,
        extractor: Arc<dyn ArchiveExtractor>,
    ) -> Result<Self, FirmwareError> {
        if root.exists() {
            if !root.is_dir() {
                return Err(FirmwareError::Init {
                    path: root,
                    reason: "not a directory".to_string(),
                });
            }
        } else {
            fs::create_dir_all(&root).map_err(|e| FirmwareError::Init {
                path: root.clone(),
                reason: format!("failed to create directory: {e}"),
            })?;
        }

        Ok(Self {
            root,
            class,
            extractor,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn class(&self) -> BundleClass {
        self.class
    }

    /// Directory a bundle of this name lives in, whether or not it exists.
    pub fn bundle_dir(&self, name: &str) -> Result<PathBuf, FirmwareError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }

    /// Install a bundle named after the archive's file name minus its
    /// extension. A failed extraction leaves the new directory behind.
    pub fn install(&self, archive: &Path) -> Result<Bundle, FirmwareError> {
        let name = archive
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = self.bundle_dir(&name)?;
        if dir.exists() {
            return Err(FirmwareError::AlreadyExists { name });
        }

        fs::create_dir_all(&dir).map_err(|source| FirmwareError::DirCreate {
            path: dir.clone(),
            source,
        })?;
        self.extractor
            .extract(archive, &dir)
            .map_err(|source| FirmwareError::Extraction {
                archive: archive.to_path_buf(),
                source,
            })?;

        info!(class = %self.class, bundle = %name, "Installed bundle");
        Ok(Bundle::from_dir(dir))
    }

    /// Bundles in directory enumeration order.
    pub fn list(&self) -> Result<Vec<Bundle>, FirmwareError> {
        let read_err = |source| FirmwareError::FileRead {
            path: self.root.clone(),
            source,
        };
        let mut bundles = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.is_dir() {
                bundles.push(Bundle::from_dir(path));
            }
        }
        Ok(bundles)
    }

    pub fn get(&self, name: &str) -> Result<Bundle, FirmwareError> {
        let dir = self.bundle_dir(name)?;
        if !dir.is_dir() {
            return Err(FirmwareError::NotFound { path: dir });
        }
        Ok(Bundle::from_dir(dir))
    }

    /// Delete the bundle bottom-up. Stops at the first path that cannot be
    /// deleted, leaving the rest of the tree in place.
    pub fn remove(&self, name: &str) -> Result<(), FirmwareError> {
        let dir = self.get(name)?.dir().to_path_buf();

        for entry in walkdir::WalkDir::new(&dir).contents_first(true) {
            let entry = entry.map_err(|e| FirmwareError::FileRead {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone()),
                source: e.into(),
            })?;
            let path = entry.path();
            let result = if entry.file_type().is_dir() {
                fs::remove_dir(path)
            } else {
                fs::remove_file(path)
            };
            result.map_err(|source| FirmwareError::DeleteFailed {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), "Deleted");
        }

        info!(class = %self.class, bundle = %name, "Removed bundle");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), FirmwareError> {
    if name.is_empty() {
        return Err(FirmwareError::InvalidName {
            name: name.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }
    if name == "." || name == ".." {
        return Err(FirmwareError::InvalidName {
            name: name.to_string(),
            reason: "name cannot be a relative path component".to_string(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(FirmwareError::InvalidName {
            name: name.to_string(),
            reason: "name must contain only alphanumeric characters, hyphens, underscores, or dots"
                .to_string(),
        });
    }
    Ok(())
}
