pub mod debounce;
pub mod mode;
pub mod clipboard;
pub mod text;
pub mod document;
pub mod events;

use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::TranslationBackend;
use crate::config::ControllerConfig;
use crate::downloads::ObjectUrlRegistry;
use crate::preferences::PreferenceStore;
use crate::view::{ElementId, View};

pub use clipboard::Clipboard;
pub use debounce::Debouncer;
pub use document::{FileInfo, FileSource, SelectedFile};
pub use events::{Action, EventKind, EventTable, UiEvent};
pub use mode::Mode;

/// Values the page's form controls currently hold.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub source_text: String,
    pub target_lang: String,
    pub translated_text: String,
}

/// Drives one page: owns its form state, mode, debounce timer and the
/// object URLs it handed out.
///
/// Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct TranslatorController {
    config: ControllerConfig,
    backend: Arc<dyn TranslationBackend>,
    view: Arc<dyn View>,
    clipboard: Arc<dyn Clipboard>,
    files: Arc<dyn FileSource>,
    preferences: Arc<PreferenceStore>,
    downloads: Arc<ObjectUrlRegistry>,
    form: Arc<RwLock<FormState>>,
    mode: Arc<RwLock<Mode>>,
    debouncer: Arc<Debouncer>,
    text_sequence: Arc<AtomicU64>,
    object_urls: Arc<Mutex<Vec<Uuid>>>,
    events: Arc<EventTable>,
}

impl TranslatorController {
    pub fn new(
        config: ControllerConfig,
        backend: Arc<dyn TranslationBackend>,
        view: Arc<dyn View>,
        clipboard: Arc<dyn Clipboard>,
        files: Arc<dyn FileSource>,
        preferences: Arc<PreferenceStore>,
        downloads: Arc<ObjectUrlRegistry>,
    ) -> Self {
        let form = FormState {
            target_lang: config.default_target_lang.clone(),
            ..FormState::default()
        };

        Self {
            debouncer: Arc::new(Debouncer::new(config.debounce())),
            config,
            backend,
            view,
            clipboard,
            files,
            preferences,
            downloads,
            form: Arc::new(RwLock::new(form)),
            mode: Arc::new(RwLock::new(Mode::Text)),
            text_sequence: Arc::new(AtomicU64::new(0)),
            object_urls: Arc::new(Mutex::new(Vec::new())),
            events: Arc::new(EventTable::new()),
        }
    }

    /// Restore the stored language, show text mode and the idle status.
    pub async fn init(&self) {
        let lang = self
            .preferences
            .preferred_language()
            .unwrap_or_else(|| self.config.default_target_lang.clone());
        info!("Initializing page with target language {}", lang);

        self.form.write().await.target_lang = lang.clone();
        self.view.set_value(ElementId::TargetLang, &lang);
        self.switch_mode(Mode::Text).await;
        self.view.set_status(text::STATUS_IDLE);
    }

    pub async fn form(&self) -> FormState {
        self.form.read().await.clone()
    }

    /// Stop the timer and revoke every object URL the page never fetched.
    pub fn shutdown(&self) {
        if self.debouncer.is_pending() {
            debug!("Dropping the pending translation");
        }
        self.debouncer.cancel();
        let ids = {
            let mut urls = self.object_urls.lock().unwrap_or_else(|p| p.into_inner());
            std::mem::take(&mut *urls)
        };
        let revoked = ids.iter().filter(|id| self.downloads.revoke(id)).count();
        debug!("Controller shut down, revoked {} object URLs", revoked);
    }

    fn track_object_url(&self, id: Uuid) {
        let mut urls = self.object_urls.lock().unwrap_or_else(|p| p.into_inner());
        urls.retain(|existing| self.downloads.contains(existing));
        urls.push(id);
    }
}
