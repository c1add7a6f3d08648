use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::error::FirmwareError;
use crate::extract::ArchiveExtractor;
use crate::fingerprint::FingerprintAlgorithm;
use crate::model::{Bundle, BundleClass};
use crate::settings::SettingsStore;
use crate::store::{ActiveSetPublisher, BundleStore, FingerprintCheck};

/// Filesystem locations supplied by the host.
#[derive(Debug, Clone)]
pub struct ManagerPaths {
    /// Parent of the `app_layer/` and `image/` stores.
    pub root: PathBuf,
    /// Publication directory read by consumers. Must already exist.
    pub active_dir: PathBuf,
}

/// Entry point for both bundle classes. Only app-layer bundles can be
/// activated; image bundles are an unpublished catalog.
pub struct FirmwareManager<S> {
    app_store: BundleStore,
    image_store: BundleStore,
    publisher: ActiveSetPublisher<S>,
}

impl<S: SettingsStore> FirmwareManager<S> {
    pub fn open(
        paths: ManagerPaths,
        settings: S,
        extractor: Arc<dyn ArchiveExtractor>,
        algorithm: FingerprintAlgorithm,
    ) -> Result<Self, FirmwareError> {
        if !paths.active_dir.is_dir() {
            return Err(FirmwareError::Init {
                path: paths.active_dir,
                reason: "active images directory does not exist".to_string(),
            });
        }

        let app_store = BundleStore::open(
            paths.root.join(BundleClass::AppLayer.dir_name()),
            BundleClass::AppLayer,
            Arc::clone(&extractor),
        )?;
        let image_store = BundleStore::open(
            paths.root.join(BundleClass::Image.dir_name()),
            BundleClass::Image,
            extractor,
        )?;
        let publisher = ActiveSetPublisher::new(paths.active_dir, algorithm, settings);

        info!(
            root = %paths.root.display(),
            active = ?publisher.active_name(),
            "Firmware manager ready"
        );
        Ok(Self {
            app_store,
            image_store,
            publisher,
        })
    }

    pub fn active_dir(&self) -> &Path {
        self.publisher.active_dir()
    }

    pub fn active_bundle_name(&self) -> Option<&str> {
        self.publisher.active_name()
    }

    pub fn settings(&self) -> &S {
        self.publisher.settings()
    }

    pub fn store(&self, class: BundleClass) -> &BundleStore {
        match class {
            BundleClass::AppLayer => &self.app_store,
            BundleClass::Image => &self.image_store,
        }
    }

    pub fn is_active(&self, bundle: &Bundle) -> bool {
        bundle.is_active(self.active_bundle_name())
    }

    // --- App-layer bundles ---

    pub fn add_app_bundle(&self, archive: &Path) -> Result<Bundle, FirmwareError> {
        self.app_store.install(archive)
    }

    /// Installed app-layer bundles, plus the unnamed bundle when nothing is
    /// active and the active-images directory holds images of its own.
    pub fn app_bundles(&self) -> Result<Vec<Bundle>, FirmwareError> {
        let mut bundles = self.app_store.list()?;
        if self.active_bundle_name().is_none() {
            let unnamed = Bundle::unnamed(self.active_dir().to_path_buf());
            if !unnamed.images()?.is_empty() {
                bundles.push(unnamed);
            }
        }
        Ok(bundles)
    }

    pub fn app_bundle(&self, name: &str) -> Result<Bundle, FirmwareError> {
        self.app_store.get(name)
    }

    pub fn set_active_app_bundle(&mut self, name: &str) -> Result<(), FirmwareError> {
        let dir = self.app_store.bundle_dir(name)?;
        self.publisher.activate(&dir, name)
    }

    /// Remove an app-layer bundle, clearing the active set first if it is
    /// the one published.
    pub fn remove_app_bundle(&mut self, name: &str) -> Result<(), FirmwareError> {
        let bundle = self.app_store.get(name)?;
        if self.is_active(&bundle) {
            self.publisher.clear()?;
        }
        self.app_store.remove(name)
    }

    pub fn clear_active_bundle(&mut self) -> Result<(), FirmwareError> {
        self.publisher.clear()
    }

    pub fn verify_active_set(&self) -> Result<Vec<FingerprintCheck>, FirmwareError> {
        self.publisher.verify()
    }

    // --- Image bundles ---

    pub fn add_image_bundle(&self, archive: &Path) -> Result<Bundle, FirmwareError> {
        self.image_store.install(archive)
    }

    pub fn image_bundles(&self) -> Result<Vec<Bundle>, FirmwareError> {
        self.image_store.list()
    }

    pub fn image_bundle(&self, name: &str) -> Result<Bundle, FirmwareError> {
        self.image_store.get(name)
    }

    pub fn remove_image_bundle(&self, name: &str) -> Result<(), FirmwareError> {
        self.image_store.remove(name)
    }
}
