pub mod bundle_store;
pub mod manager;
pub mod publisher;

pub use bundle_store::BundleStore;
pub use manager::{FirmwareManager, ManagerPaths};
pub use publisher::{ACTIVE_BUNDLE_KEY, ActiveSetPublisher, FingerprintCheck, FingerprintStatus};
