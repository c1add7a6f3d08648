use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::FirmwareError;
use crate::fingerprint::FingerprintAlgorithm;
use crate::model::bundle::{entries_with_extension, files_with_extension};
use crate::model::{FINGERPRINT_EXTENSION, IMAGE_EXTENSION};
use crate::settings::{SettingsEdit, SettingsStore};

/// Settings key holding the name of the active bundle.
pub const ACTIVE_BUNDLE_KEY: &str = "activeBundleName";

const COPY_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintStatus {
    Match,
    Mismatch,
    MissingFingerprint,
    OrphanFingerprint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FingerprintCheck {
    pub name: String,
    pub status: FingerprintStatus,
}

/// Publishes one bundle's images into the active-images directory and keeps
/// the persisted active name in step with it.
///
/// Nothing here is transactional. A failed `activate` can leave a mix of old
/// and new images behind while the name still points at the previous bundle;
/// a failed `clear` leaves files behind with no active name.
///
/// `activate` only writes the new bundle's images. Images of the previous
/// bundle that the new one lacks stay published, so hosts switching bundles
/// should `clear` first to keep the directory matching the active bundle.
pub struct ActiveSetPublisher<S> {
    active_dir: PathBuf,
    algorithm: FingerprintAlgorithm,
    settings: S,
    active_name: Option<String>,
}

impl<S: SettingsStore> ActiveSetPublisher<S> {
    pub fn new(active_dir: PathBuf, algorithm: FingerprintAlgorithm, settings: S) -> Self {
        let active_name = settings.get_string(ACTIVE_BUNDLE_KEY);
        Self {
            active_dir,
            algorithm,
            settings,
            active_name,
        }
    }

    pub fn active_dir(&self) -> &Path {
        &self.active_dir
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active_name.as_deref()
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn activate(&mut self, bundle_dir: &Path, name: &str) -> Result<(), FirmwareError> {
        if !bundle_dir.is_dir() {
            return Err(FirmwareError::NotFound {
                path: bundle_dir.to_path_buf(),
            });
        }

        for image in files_with_extension(bundle_dir, IMAGE_EXTENSION)? {
            let Some(file_name) = image.file_name() else {
                continue;
            };
            let dest = self.active_dir.join(file_name);
            let bytes = copy_in_chunks(&image, &dest)?;

            let digest = self.algorithm.digest_file(&dest)?;
            let fp_path = dest.with_extension(FINGERPRINT_EXTENSION);
            fs::write(&fp_path, digest).map_err(|source| FirmwareError::FileWrite {
                path: fp_path.clone(),
                source,
            })?;
            debug!(image = %dest.display(), bytes, "Published image");
        }

        self.settings
            .commit(SettingsEdit::new().put(ACTIVE_BUNDLE_KEY, Some(name)))?;
        self.active_name = Some(name.to_string());

        info!(bundle = %name, "Activated bundle");
        Ok(())
    }

    /// Forget the active name, then delete every image and fingerprint in
    /// the active-images directory. The in-memory name is dropped even when
    /// the settings commit fails; files are only touched after it succeeds.
    pub fn clear(&mut self) -> Result<(), FirmwareError> {
        let previous = self.active_name.take();
        self.settings
            .commit(SettingsEdit::new().put(ACTIVE_BUNDLE_KEY, None))?;

        for ext in [IMAGE_EXTENSION, FINGERPRINT_EXTENSION] {
            for path in entries_with_extension(&self.active_dir, ext)? {
                fs::remove_file(&path).map_err(|source| FirmwareError::DeleteFailed {
                    path: path.clone(),
                    source,
                })?;
                debug!(path = %path.display(), "Deleted");
            }
        }

        info!(previous = ?previous, "Cleared active bundle");
        Ok(())
    }

    /// Recompute each active image's digest and compare it with its `.fp`.
    pub fn verify(&self) -> Result<Vec<FingerprintCheck>, FirmwareError> {
        let mut checks = Vec::new();

        for image in files_with_extension(&self.active_dir, IMAGE_EXTENSION)? {
            let name = stem(&image);
            let fp_path = image.with_extension(FINGERPRINT_EXTENSION);
            let status = if !fp_path.is_file() {
                FingerprintStatus::MissingFingerprint
            } else {
                let stored = fs::read(&fp_path).map_err(|source| FirmwareError::FileRead {
                    path: fp_path.clone(),
                    source,
                })?;
                let actual = self.algorithm.digest_file(&image)?;
                if stored.as_slice() == actual.as_slice() {
                    FingerprintStatus::Match
                } else {
                    FingerprintStatus::Mismatch
                }
            };
            if status != FingerprintStatus::Match {
                warn!(image = %name, status = ?status, "Active image failed verification");
            }
            checks.push(FingerprintCheck { name, status });
        }

        for fp in files_with_extension(&self.active_dir, FINGERPRINT_EXTENSION)? {
            if !fp.with_extension(IMAGE_EXTENSION).is_file() {
                let name = stem(&fp);
                warn!(fingerprint = %name, "Fingerprint has no image");
                checks.push(FingerprintCheck {
                    name,
                    status: FingerprintStatus::OrphanFingerprint,
                });
            }
        }

        Ok(checks)
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Copy `src` to `dest` verbatim, never holding more than one chunk in memory.
fn copy_in_chunks(src: &Path, dest: &Path) -> Result<u64, FirmwareError> {
    let read_err = |source| FirmwareError::FileRead {
        path: src.to_path_buf(),
        source,
    };
    let write_err = |source| FirmwareError::FileWrite {
        path: dest.to_path_buf(),
        source,
    };

    let mut input = File::open(src).map_err(read_err)?;
    let mut output = File::create(dest).map_err(write_err)?;
    let mut buf = vec![0u8; COPY_CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = input.read(&mut buf).map_err(read_err)?;
        if n == 0 {
            break;
        }
        output.write_all(&buf[..n]).map_err(write_err)?;
        total += n as u64;
    }
    output.flush().map_err(write_err)?;
    Ok(total)
}
