pub mod error;
pub mod extract;
pub mod fingerprint;
pub mod model;
pub mod settings;
pub mod store;

#[cfg(test)]
mod test_support;

pub use error::FirmwareError;
pub use extract::{ArchiveExtractor, ExtractError, ZipExtractor};
pub use fingerprint::{FINGERPRINT_LEN, FingerprintAlgorithm};
pub use model::{Bundle, BundleClass, GlobalConfig, ImageFile};
pub use settings::{MemorySettings, SettingsEdit, SettingsError, SettingsStore, TomlSettings};
pub use store::{
    ACTIVE_BUNDLE_KEY, ActiveSetPublisher, BundleStore, FingerprintCheck, FingerprintStatus,
    FirmwareManager, ManagerPaths,
};
