use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::str::FromStr;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::error::FirmwareError;

/// Length in bytes of every fingerprint written next to an active image.
pub const FINGERPRINT_LEN: usize = 16;

/// Content digest used for `.fp` files. Consumers compare raw bytes, so the
/// output length is fixed regardless of algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintAlgorithm {
    #[default]
    Md5,
}

impl FingerprintAlgorithm {
    pub fn from_name(name: &str) -> Result<Self, FirmwareError> {
        match name.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            _ => Err(FirmwareError::DigestUnavailable {
                algorithm: name.to_string(),
            }),
        }
    }

    /// Digest the whole file, reading it in buffered chunks.
    pub fn digest_file(&self, path: &Path) -> Result<[u8; FINGERPRINT_LEN], FirmwareError> {
        let file = File::open(path).map_err(|source| FirmwareError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        match self {
            Self::Md5 => {
                let mut hasher = Md5::new();
                io::copy(&mut reader, &mut hasher).map_err(|source| {
                    FirmwareError::FileRead {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                let mut out = [0u8; FINGERPRINT_LEN];
                out.copy_from_slice(&hasher.finalize());
                Ok(out)
            }
        }
    }
}

impl FromStr for FingerprintAlgorithm {
    type Err = FirmwareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for FingerprintAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Md5 => write!(f, "md5"),
        }
    }
}
