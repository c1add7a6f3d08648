use std::fs::{self, File};
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive entry escapes the destination directory: {0}")]
    UnsafeEntry(String),
}

/// Unpacks a bundle archive into a destination directory.
pub trait ArchiveExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<(), ExtractError>;
}

/// Extracts `.zip` bundle archives, keeping nested directories.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<(), ExtractError> {
        let file = File::open(archive)?;
        let mut zip = zip::ZipArchive::new(file)?;

        for i in 0..zip.len() {
            let mut entry = zip.by_index(i)?;
            let relative = entry
                .enclosed_name()
                .ok_or_else(|| ExtractError::UnsafeEntry(entry.name().to_string()))?;
            let target = destination.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&target)?;
            let written = io::copy(&mut entry, &mut out)?;
            debug!(entry = %target.display(), bytes = written, "Extracted archive entry");
        }
        Ok(())
    }
}
