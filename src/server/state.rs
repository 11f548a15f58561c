use std::sync::Arc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::backend::{HttpBackend, TranslationBackend};
use crate::config::Config;
use crate::controller::TranslatorController;
use crate::downloads::ObjectUrlRegistry;
use crate::preferences::PreferenceStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn TranslationBackend>,
    pub preferences: Arc<PreferenceStore>,
    pub downloads: Arc<ObjectUrlRegistry>,
    /// One controller per connected page, keyed by page uid.
    pub pages: Arc<DashMap<String, TranslatorController>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let backend = HttpBackend::new(config.backend.base_url.clone(), config.backend.timeout())?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    pub fn with_backend(config: Config, backend: Arc<dyn TranslationBackend>) -> Self {
        let preferences = Arc::new(PreferenceStore::open(&config.storage.preferences_path));

        Self {
            config,
            backend,
            preferences,
            downloads: Arc::new(ObjectUrlRegistry::new()),
            pages: Arc::new(DashMap::new()),
        }
    }

    pub fn generate_page_uid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
