//! Application state shared across all handlers

use std::sync::Arc;

use isocert_persistence::PersistenceService;

use crate::service::storage::UploadStorage;

use super::config::Configuration;

pub struct AppState {
    pub configuration: Configuration,
    pub persistence: Arc<dyn PersistenceService>,
    /// Upload root with the logo, template and generated-output directories
    pub storage: UploadStorage,
}

impl AppState {
    pub fn new(
        configuration: Configuration,
        persistence: Arc<dyn PersistenceService>,
        storage: UploadStorage,
    ) -> Self {
        Self {
            configuration,
            persistence,
            storage,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configuration", &self.configuration)
            .field("persistence", &"<dyn PersistenceService>")
            .field("storage", &self.storage)
            .finish()
    }
}
