pub mod bundle;
pub mod config;

pub use bundle::{Bundle, BundleClass, FINGERPRINT_EXTENSION, IMAGE_EXTENSION, ImageFile};
pub use config::GlobalConfig;
